use finance_tracker_domain::validation::validate_sign_in;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::input_field::InputField;
use crate::hooks::use_auth::use_auth;
use crate::pages::{auth_link, bind, AuthPage};

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub on_navigate: Callback<AuthPage>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let auth = use_auth();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            if let Err(problem) = validate_sign_in(&email, &password) {
                error.set(Some(problem.to_string()));
                return;
            }
            let Some(auth) = auth.clone() else {
                return;
            };

            error.set(None);
            loading.set(true);
            let (email, password) = ((*email).clone(), (*password).clone());
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                if let Err(e) = auth.sign_in(&email, &password).await {
                    error.set(Some(e.to_string()));
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="auth-screen">
            <form class="auth-card" {onsubmit}>
                <h1>{ "Sign in" }</h1>
                { if let Some(message) = (*error).clone() {
                    html! { <p class="form-error">{ message }</p> }
                } else { html! {} } }
                <InputField label="Email" input_type="email" autocomplete="email"
                    value={(*email).clone()} on_input={bind(&email)} />
                <InputField label="Password" input_type="password" autocomplete="current-password"
                    value={(*password).clone()} on_input={bind(&password)} />
                <button type="submit" disabled={*loading}>
                    { if *loading { "Signing in..." } else { "Sign in" } }
                </button>
                <div class="auth-links">
                    { auth_link("Forgot your password?", AuthPage::ResetPassword, &props.on_navigate) }
                    { auth_link("Create an account", AuthPage::Signup, &props.on_navigate) }
                </div>
            </form>
        </div>
    }
}
