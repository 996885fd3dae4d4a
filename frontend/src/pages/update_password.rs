use finance_tracker_domain::validation::validate_new_password;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::input_field::InputField;
use crate::hooks::use_auth::use_auth;
use crate::pages::bind;

#[derive(Properties, PartialEq)]
pub struct UpdatePasswordPageProps {
    /// Called once the new password is saved
    pub on_done: Callback<()>,
}

/// Choose a new password for the signed-in (or recovering) user
#[function_component(UpdatePasswordPage)]
pub fn update_password_page(props: &UpdatePasswordPageProps) -> Html {
    let auth = use_auth();
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let onsubmit = {
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_done = props.on_done.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            if let Err(problem) = validate_new_password(&password, &confirm_password) {
                error.set(Some(problem.to_string()));
                return;
            }
            let Some(auth) = auth.clone() else {
                return;
            };

            error.set(None);
            loading.set(true);
            let password = (*password).clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_done = on_done.clone();
            spawn_local(async move {
                let result = auth.update_password(&password).await;
                loading.set(false);
                match result {
                    Ok(()) => on_done.emit(()),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    html! {
        <div class="auth-screen">
            <form class="auth-card" {onsubmit}>
                <h1>{ "Set a new password" }</h1>
                { if let Some(message) = (*error).clone() {
                    html! { <p class="form-error">{ message }</p> }
                } else { html! {} } }
                <InputField label="New password" input_type="password" autocomplete="new-password"
                    value={(*password).clone()} on_input={bind(&password)} />
                <InputField label="Confirm new password" input_type="password" autocomplete="new-password"
                    value={(*confirm_password).clone()} on_input={bind(&confirm_password)} />
                <button type="submit" disabled={*loading}>
                    { if *loading { "Saving..." } else { "Update password" } }
                </button>
            </form>
        </div>
    }
}
