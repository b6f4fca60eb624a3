use leptos::prelude::*;
use leptos_router::components::A;

/// Landing view after a successful registration. Signing in is handled by the
/// backend service.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign In"</h1>
                <p class="instructions">"Your account is ready. Sign in with the email and password you registered."</p>

                <div class="auth-links">
                    <span>"Don't have an account? "</span>
                    <A href="/register">"Create account"</A>
                </div>
            </div>
        </div>
    }
}
