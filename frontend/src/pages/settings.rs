use chrono::NaiveDate;
use finance_tracker_domain::{DateFormatPreference, DateFormatter, Theme};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::contexts::AuthContext;
use crate::hooks::use_date_format::use_date_format;
use crate::hooks::use_theme::use_theme;
use crate::pages::Page;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct SettingsPageProps {
    pub auth: AuthContext,
    pub on_navigate: Callback<Page>,
}

#[function_component(SettingsPage)]
pub fn settings_page(props: &SettingsPageProps) -> Html {
    let formatter = use_date_format();
    let theme = use_theme();
    let saving = use_state(|| false);
    let message = use_state(|| None::<String>);

    let on_format_change = {
        let auth = props.auth.clone();
        let saving = saving.clone();
        let message = message.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let Some(preference) = DateFormatPreference::from_pattern(&select.value()) else {
                return;
            };
            let Some(session) = auth.session() else {
                return;
            };
            let (token, user_id) = (session.access_token().to_string(), session.user().id);

            saving.set(true);
            let auth = auth.clone();
            let saving = saving.clone();
            let message = message.clone();
            spawn_local(async move {
                match auth.api().update_date_format(&token, user_id, preference.pattern()).await {
                    Ok(profile) => {
                        auth.set_profile(profile);
                        message.set(Some("Date format saved".to_string()));
                    }
                    Err(e) => {
                        Logger::error_with_component("settings", &format!("Failed to save date format: {}", e));
                        message.set(Some(e.user_message()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_theme_change = {
        let theme = theme.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let (Some(theme), Some(choice)) = (theme.as_ref(), Theme::parse(&select.value())) {
                theme.set(choice);
            }
        })
    };

    let change_password = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::UpdatePassword))
    };

    let current = formatter.preference();
    let current_theme = theme.as_ref().map(|t| t.theme()).unwrap_or_default();
    let sample = date_utils::today();

    html! {
        <div class="settings-page">
            <h1>{ "Settings" }</h1>

            { if let Some(text) = (*message).clone() {
                html! { <p class="form-status">{ text }</p> }
            } else { html! {} } }

            <section class="panel">
                <label>
                    { "Date format" }
                    <select onchange={on_format_change} disabled={*saving}>
                        { for DateFormatPreference::ALL.iter().map(|preference| html! {
                            <option value={preference.pattern()} selected={*preference == current}>
                                { format!("{} ({})", preference.pattern(), formatter_sample(*preference, sample)) }
                            </option>
                        }) }
                    </select>
                </label>

                <label>
                    { "Theme" }
                    <select onchange={on_theme_change}>
                        { for [Theme::Light, Theme::Dark].iter().map(|choice| html! {
                            <option value={choice.as_str()} selected={*choice == current_theme}>{ choice.as_str() }</option>
                        }) }
                    </select>
                </label>
            </section>

            <section class="panel">
                <button type="button" onclick={change_password}>{ "Change password" }</button>
            </section>
        </div>
    }
}

fn formatter_sample(preference: DateFormatPreference, date: NaiveDate) -> String {
    DateFormatter::new(preference).format_date(date)
}
