use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="main-nav">
            <div class="nav-brand">
                <A href="/">"Sign Up"</A>
            </div>

            <div class="nav-links">
                <A href="/login">"Sign In"</A>
                <A href="/register">"Register"</A>
            </div>
        </nav>
    }
}
