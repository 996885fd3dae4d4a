use finance_tracker_domain::Theme;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::storage;

#[derive(Clone, PartialEq)]
pub struct ThemeContext {
    theme: UseStateHandle<Theme>,
}

impl ThemeContext {
    pub fn theme(&self) -> Theme {
        *self.theme
    }

    pub fn toggle(&self) {
        self.set(self.theme.toggled());
    }

    pub fn set(&self, theme: Theme) {
        storage::save_theme(theme);
        self.theme.set(theme);
    }
}

fn system_prefers_dark() -> bool {
    gloo::utils::window()
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Swap the theme class on `<html>`
fn apply_theme_class(theme: Theme) {
    let root = gloo::utils::document_element();
    let classes = root.class_list();
    let result = classes
        .remove_2(Theme::Light.css_class(), Theme::Dark.css_class())
        .and_then(|_| classes.add_1(theme.css_class()));
    if result.is_err() {
        Logger::warn_with_component("theme", "Failed to update document theme class");
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_state(|| Theme::initial(storage::load_theme().as_deref(), system_prefers_dark()));

    use_effect_with(*theme, |theme| {
        apply_theme_class(*theme);
        || ()
    });

    let context = ThemeContext { theme };

    html! {
        <ContextProvider<ThemeContext> context={context}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}
