#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use signup::{config::ApiConfig, App};

    // Load env vars
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The client bundle talks to the backend directly, with the settings it was built with
    let compiled = match ApiConfig::compiled() {
        Ok(api) => api,
        Err(e) => {
            log::error!("Invalid build-time registration API configuration: {e}");
            std::process::exit(1);
        }
    };
    let runtime = match ApiConfig::from_env() {
        Ok(api) => api,
        Err(e) => {
            log::error!("Invalid registration API configuration: {e}");
            std::process::exit(1);
        }
    };
    if runtime != compiled {
        log::warn!(
            "Environment configures {} ({:?}) but the client was built for {} ({:?}); rebuild the client to use it",
            runtime.base_url,
            runtime.fallback_policy,
            compiled.base_url,
            compiled.fallback_policy
        );
    }
    log::info!(
        "Registration API: {} (fallback {}, {:?})",
        compiled.register_url(),
        compiled.fallback_url(),
        compiled.fallback_policy
    );

    // Leptos config
    let conf = get_configuration(None).expect("Failed to load Leptos configuration");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    // Build router
    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::config::LeptosOptions) -> impl leptos::IntoView {
    use leptos::prelude::*;
    use leptos_meta::*;
    use signup::App;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // Client-side entry point handled by hydrate() in lib.rs
}
