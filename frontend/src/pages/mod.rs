pub mod dashboard;
pub mod login;
pub mod reset_password;
pub mod settings;
pub mod signup;
pub mod transactions;
pub mod update_password;

use yew::prelude::*;

/// Screens available while signed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Transactions,
    Settings,
    UpdatePassword,
}

/// Screens available while signed out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPage {
    #[default]
    Login,
    Signup,
    ResetPassword,
}

/// Callback writing an input's text into a state handle
pub(crate) fn bind(handle: &UseStateHandle<String>) -> Callback<String> {
    let handle = handle.clone();
    Callback::from(move |value: String| handle.set(value))
}

pub(crate) fn auth_link(label: &'static str, target: AuthPage, on_navigate: &Callback<AuthPage>) -> Html {
    let on_navigate = on_navigate.clone();
    let onclick = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        on_navigate.emit(target);
    });
    html! { <a href="#" class="auth-link" {onclick}>{ label }</a> }
}
