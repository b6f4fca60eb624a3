pub mod app;
pub mod components;
pub mod config;
pub mod models;
pub mod pages;
pub mod services;

// Re-export for convenience
pub use app::App;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    leptos::mount::hydrate_body(App);
}
