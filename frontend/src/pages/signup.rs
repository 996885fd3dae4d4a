use finance_tracker_domain::validation::validate_sign_up;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::input_field::InputField;
use crate::contexts::SignUpOutcome;
use crate::hooks::use_auth::use_auth;
use crate::pages::{auth_link, bind, AuthPage};

#[derive(Properties, PartialEq)]
pub struct SignupPageProps {
    pub on_navigate: Callback<AuthPage>,
}

#[function_component(SignupPage)]
pub fn signup_page(props: &SignupPageProps) -> Html {
    let auth = use_auth();
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let confirmation_sent = use_state(|| false);

    let onsubmit = {
        let full_name = full_name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let confirmation_sent = confirmation_sent.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            if let Err(problem) = validate_sign_up(&full_name, &email, &password, &confirm_password) {
                error.set(Some(problem.to_string()));
                return;
            }
            let Some(auth) = auth.clone() else {
                return;
            };

            error.set(None);
            loading.set(true);
            let (full_name, email, password) = ((*full_name).clone(), (*email).clone(), (*password).clone());
            let error = error.clone();
            let loading = loading.clone();
            let confirmation_sent = confirmation_sent.clone();
            spawn_local(async move {
                match auth.sign_up(&full_name, &email, &password).await {
                    Ok(SignUpOutcome::ConfirmationSent) => confirmation_sent.set(true),
                    Ok(SignUpOutcome::SignedIn) => {}
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        })
    };

    if *confirmation_sent {
        return html! {
            <div class="auth-screen">
                <div class="auth-card">
                    <h1>{ "Check your email" }</h1>
                    <p>{ format!("We sent a confirmation link to {}. Follow it to finish creating your account.", *email) }</p>
                    { auth_link("Back to sign in", AuthPage::Login, &props.on_navigate) }
                </div>
            </div>
        };
    }

    html! {
        <div class="auth-screen">
            <form class="auth-card" {onsubmit}>
                <h1>{ "Create an account" }</h1>
                { if let Some(message) = (*error).clone() {
                    html! { <p class="form-error">{ message }</p> }
                } else { html! {} } }
                <InputField label="Full name" autocomplete="name"
                    value={(*full_name).clone()} on_input={bind(&full_name)} />
                <InputField label="Email" input_type="email" autocomplete="email"
                    value={(*email).clone()} on_input={bind(&email)} />
                <InputField label="Password" input_type="password" autocomplete="new-password"
                    value={(*password).clone()} on_input={bind(&password)} />
                <InputField label="Confirm password" input_type="password" autocomplete="new-password"
                    value={(*confirm_password).clone()} on_input={bind(&confirm_password)} />
                <button type="submit" disabled={*loading}>
                    { if *loading { "Creating account..." } else { "Sign up" } }
                </button>
                <div class="auth-links">
                    { auth_link("Already have an account? Sign in", AuthPage::Login, &props.on_navigate) }
                </div>
            </form>
        </div>
    }
}
