/// Build-time settings for the hosted backend.
///
/// Values are baked in by `trunk build` from `FINANCE_API_URL` and
/// `FINANCE_API_KEY`; the local defaults match a `supabase start` stack.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub api_key: String,
}

pub const DEFAULT_API_URL: &str = "http://localhost:54321";

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(option_env!("FINANCE_API_URL"), option_env!("FINANCE_API_KEY"))
    }

    pub fn from_values(api_url: Option<&str>, api_key: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_url,
            api_key: api_key.unwrap_or_default().trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_from_values_defaults() {
        let config = AppConfig::from_values(None, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.api_key, "");
    }

    #[wasm_bindgen_test]
    fn test_from_values_trims_trailing_slash() {
        let config = AppConfig::from_values(Some("https://demo.supabase.co/ "), Some(" key "));
        assert_eq!(config.api_url, "https://demo.supabase.co");
        assert_eq!(config.api_key, "key");
    }
}
