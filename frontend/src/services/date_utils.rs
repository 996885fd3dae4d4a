use chrono::{DateTime, Local, NaiveDate, Utc};
use wasm_bindgen::JsValue;

use crate::services::logging::Logger;

/// Today in the browser's timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Origin of the current page, e.g. `https://app.example.com`
pub fn current_origin() -> Option<String> {
    gloo::utils::window().location().origin().ok()
}

/// Fragment of the current URL including the leading `#`
pub fn current_hash() -> String {
    gloo::utils::window().location().hash().unwrap_or_default()
}

/// Drop the fragment so tokens do not linger in the address bar
pub fn clear_hash() {
    let window = gloo::utils::window();
    let location = window.location();
    let url = url_without_fragment(
        &location.pathname().unwrap_or_default(),
        &location.search().unwrap_or_default(),
    );

    let replaced = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)));
    if let Err(e) = replaced {
        Logger::warn_with_component("url", &format!("Failed to clear URL fragment: {:?}", e));
    }
}

/// Path plus query string of the current page, without the fragment
fn url_without_fragment(pathname: &str, search: &str) -> String {
    let path = if pathname.is_empty() { "/" } else { pathname };
    format!("{}{}", path, search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_url_without_fragment_keeps_path_and_query() {
        assert_eq!(url_without_fragment("/update-password", ""), "/update-password");
        assert_eq!(url_without_fragment("/update-password", "?lang=en"), "/update-password?lang=en");
        assert_eq!(url_without_fragment("", ""), "/");
    }
}
