use finance_tracker_domain::Theme;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_auth::use_auth;
use crate::hooks::use_theme::use_theme;
use crate::pages::Page;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub active_page: Page,
    pub on_select: Callback<Page>,
}

/// Signed-in shell: sidebar navigation, header, page content
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="app-shell">
            <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            <div class="app-main">
                <Header />
                <main class="app-content">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: &'static str,
}

const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Dashboard",
        page: Page::Dashboard,
        icon: "▦",
    },
    NavItem {
        label: "Transactions",
        page: Page::Transactions,
        icon: "⇄",
    },
    NavItem {
        label: "Settings",
        page: Page::Settings,
        icon: "⚙",
    },
];

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let auth = use_auth();

    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(auth) = auth.clone() {
            spawn_local(async move { auth.sign_out().await });
        }
    });

    html! {
        <aside class="sidebar">
            <div class="sidebar-brand">{ "Finance Tracker" }</div>
            <nav class="sidebar-nav">
                { for NAV_ITEMS.iter().map(|item| {
                    let on_select = props.on_select.clone();
                    let page = item.page;
                    html! {
                        <button
                            type="button"
                            class={classes!("nav-item", (item.page == props.active_page).then_some("active"))}
                            onclick={Callback::from(move |_: MouseEvent| on_select.emit(page))}
                        >
                            <span class="nav-icon">{ item.icon }</span>
                            <span class="nav-label">{ item.label }</span>
                        </button>
                    }
                }) }
            </nav>
            <button type="button" class="nav-item logout" onclick={on_logout}>
                <span class="nav-icon">{ "⎋" }</span>
                <span class="nav-label">{ "Log Out" }</span>
            </button>
        </aside>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let auth = use_auth();
    let theme = use_theme();

    let display_name = auth
        .as_ref()
        .and_then(|a| a.session().map(|s| s.display_name().to_string()))
        .unwrap_or_default();

    let (toggle_label, on_toggle) = match theme {
        Some(theme) => {
            let label = match theme.theme() {
                Theme::Light => "🌙 Dark",
                Theme::Dark => "☀ Light",
            };
            (label, Callback::from(move |_: MouseEvent| theme.toggle()))
        }
        None => ("", Callback::noop()),
    };

    html! {
        <header class="app-header">
            <span class="greeting">{ format!("Hello, {}", display_name) }</span>
            <button type="button" class="theme-toggle" onclick={on_toggle}>{ toggle_label }</button>
        </header>
    }
}
