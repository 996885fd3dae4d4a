use log::LevelFilter;
use yew::prelude::*;

mod components;
mod contexts;
mod hooks;
mod pages;
mod services;

use components::layout::Layout;
use contexts::{AuthProvider, ThemeProvider};
use hooks::use_auth::use_auth;
use pages::dashboard::DashboardPage;
use pages::login::LoginPage;
use pages::reset_password::ResetPasswordPage;
use pages::settings::SettingsPage;
use pages::signup::SignupPage;
use pages::transactions::TransactionsPage;
use pages::update_password::UpdatePasswordPage;
use pages::{AuthPage, Page};
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    html! {
        <ThemeProvider>
            <AuthProvider>
                <Shell />
            </AuthProvider>
        </ThemeProvider>
    }
}

/// Picks the auth screens or the signed-in layout from the session state
#[function_component(Shell)]
fn shell() -> Html {
    let auth = use_auth();
    let active_page = use_state(|| Page::Dashboard);
    let auth_page = use_state(AuthPage::default);

    let signed_in = auth.as_ref().is_some_and(|a| a.state().is_signed_in());
    let recovering = auth.as_ref().is_some_and(|a| a.is_recovering());

    // A recovery link lands on the new-password form
    {
        let active_page = active_page.clone();
        use_effect_with(recovering, move |recovering| {
            if *recovering {
                active_page.set(Page::UpdatePassword);
            }
            || ()
        });
    }

    // Start from the defaults after every sign-out
    {
        let active_page = active_page.clone();
        let auth_page = auth_page.clone();
        use_effect_with(signed_in, move |signed_in| {
            if !*signed_in {
                active_page.set(Page::Dashboard);
                auth_page.set(AuthPage::Login);
            }
            || ()
        });
    }

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };
    let on_auth_navigate = {
        let auth_page = auth_page.clone();
        Callback::from(move |page: AuthPage| auth_page.set(page))
    };

    let Some(auth) = auth else {
        return html! {};
    };

    if auth.state().is_restoring() {
        return html! { <div class="loading">{ "Checking session..." }</div> };
    }

    if !signed_in {
        return match *auth_page {
            AuthPage::Login => html! { <LoginPage on_navigate={on_auth_navigate} /> },
            AuthPage::Signup => html! { <SignupPage on_navigate={on_auth_navigate} /> },
            AuthPage::ResetPassword => html! { <ResetPasswordPage on_navigate={on_auth_navigate} /> },
        };
    }

    let content = match *active_page {
        Page::Dashboard => html! { <DashboardPage auth={auth.clone()} /> },
        Page::Transactions => html! { <TransactionsPage auth={auth.clone()} /> },
        Page::Settings => html! { <SettingsPage auth={auth.clone()} on_navigate={on_select.clone()} /> },
        Page::UpdatePassword => {
            let on_select = on_select.clone();
            html! { <UpdatePasswordPage on_done={Callback::from(move |_| on_select.emit(Page::Dashboard))} /> }
        }
    };

    html! {
        <Layout active_page={*active_page} on_select={on_select}>
            { content }
        </Layout>
    }
}

fn main() {
    Logger::init(LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
