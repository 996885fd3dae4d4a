use finance_tracker_domain::validation::validate_email;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::input_field::InputField;
use crate::hooks::use_auth::use_auth;
use crate::pages::{auth_link, bind, AuthPage};

#[derive(Properties, PartialEq)]
pub struct ResetPasswordPageProps {
    pub on_navigate: Callback<AuthPage>,
}

/// Request a password-reset email
#[function_component(ResetPasswordPage)]
pub fn reset_password_page(props: &ResetPasswordPageProps) -> Html {
    let auth = use_auth();
    let email = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let sent = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let error = error.clone();
        let loading = loading.clone();
        let sent = sent.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            if let Err(problem) = validate_email(&email) {
                error.set(Some(problem.to_string()));
                return;
            }
            let Some(auth) = auth.clone() else {
                return;
            };

            error.set(None);
            loading.set(true);
            let email = (*email).clone();
            let error = error.clone();
            let loading = loading.clone();
            let sent = sent.clone();
            spawn_local(async move {
                match auth.request_password_reset(&email).await {
                    Ok(()) => sent.set(true),
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="auth-screen">
            <form class="auth-card" {onsubmit}>
                <h1>{ "Reset your password" }</h1>
                { if *sent {
                    html! {
                        <p class="form-success">
                            { "If an account exists for that email, a reset link is on its way." }
                        </p>
                    }
                } else {
                    html! {
                        <>
                            { if let Some(message) = (*error).clone() {
                                html! { <p class="form-error">{ message }</p> }
                            } else { html! {} } }
                            <InputField label="Email" input_type="email" autocomplete="email"
                                value={(*email).clone()} on_input={bind(&email)} />
                            <button type="submit" disabled={*loading}>
                                { if *loading { "Sending..." } else { "Send reset link" } }
                            </button>
                        </>
                    }
                } }
                <div class="auth-links">
                    { auth_link("Back to sign in", AuthPage::Login, &props.on_navigate) }
                </div>
            </form>
        </div>
    }
}
