use leptos::prelude::*;
use leptos::task::spawn_local;
#[cfg(feature = "hydrate")]
use leptos::web_sys;
use leptos_router::hooks::use_navigate;

use crate::config::ApiConfig;
use crate::models::{ErrorMap, Field, FormData};
use crate::services::http::HttpRegistrationApi;
use crate::services::registration::{Registrar, SubmissionEffects};

/// Binds the workflow's side effects to the page's signals, the router and the
/// browser alert.
struct PageEffects<F> {
    errors: RwSignal<ErrorMap>,
    submitting: RwSignal<bool>,
    to_login: F,
}

impl<F: Fn()> SubmissionEffects for PageEffects<F> {
    // try_set: the page may already be unmounted after navigating away.
    fn show_errors(&self, errors: &ErrorMap) {
        let _ = self.errors.try_set(errors.clone());
    }

    fn set_submitting(&self, submitting: bool) {
        let _ = self.submitting.try_set(submitting);
    }

    fn notify(&self, message: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        log::info!("{message}");
    }

    fn go_to_login(&self) {
        (self.to_login)();
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let form = RwSignal::new(FormData::default());
    let errors = RwSignal::new(ErrorMap::new());
    let submitting = RwSignal::new(false);
    let show_password = RwSignal::new(false);
    let navigate = use_navigate();

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            // The button is disabled while submitting, but Enter still submits.
            if submitting.get_untracked() {
                return;
            }

            let entered = form.get_untracked();
            let navigate = navigate.clone();
            spawn_local(async move {
                let registrar = Registrar::new(HttpRegistrationApi::new(), ApiConfig::default());
                let effects = PageEffects {
                    errors,
                    submitting,
                    to_login: move || navigate("/login", Default::default()),
                };
                registrar.submit(&entered, &effects).await;
            });
        }
    };

    let password_type = Signal::derive(move || if show_password.get() { "text" } else { "password" });

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign Up"</h1>
                <p class="subtitle">"Create your account to get started"</p>

                <form on:submit=on_submit novalidate>
                    <FormField field=Field::Username label="Username" input_type="text" form=form errors=errors/>
                    <FormField field=Field::Phone label="Phone" input_type="tel" form=form errors=errors/>
                    <FormField field=Field::Email label="Email" input_type="email" form=form errors=errors/>
                    <FormField field=Field::Password label="Password" input_type=password_type form=form errors=errors>
                        <button
                            type="button"
                            class="btn btn-small toggle-password"
                            on:click=move |_| show_password.update(|shown| *shown = !*shown)
                        >
                            {move || if show_password.get() { "Hide" } else { "Show" }}
                        </button>
                    </FormField>

                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() {
                            view! { <span class="spinner"></span>"Creating Account..." }.into_any()
                        } else {
                            "Get Started".into_any()
                        }}
                    </button>
                </form>

                <div class="auth-links">
                    <span>"Already have an account? "</span>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        on:click=move |_| navigate("/login", Default::default())
                    >
                        "Login"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// A labelled input bound to one field of the form. Typing clears that field's error.
#[component]
fn FormField(
    field: Field,
    label: &'static str,
    #[prop(into)] input_type: Signal<&'static str>,
    form: RwSignal<FormData>,
    errors: RwSignal<ErrorMap>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let name = field.as_str();

    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            <div class="input-row">
                <input
                    type=move || input_type.get()
                    id=name
                    name=name
                    placeholder=label
                    class=("input-error", move || errors.with(|e| e.contains(field)))
                    prop:value=move || form.with(|f| f.get(field).to_string())
                    on:input=move |ev| {
                        form.update(|f| f.set(field, event_target_value(&ev)));
                        if errors.with_untracked(|e| e.contains(field)) {
                            errors.update(|e| e.clear(field));
                        }
                    }
                />
                {children.map(|c| c())}
            </div>
            {move || errors.with(|e| e.get(field).map(str::to_string)).map(|message| {
                view! { <p class="error">{message}</p> }
            })}
        </div>
    }
}
