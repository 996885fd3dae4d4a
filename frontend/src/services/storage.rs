//! Browser persistence for the session token and theme choice.

use finance_tracker_domain::theme::{Theme, THEME_STORAGE_KEY};
use gloo::storage::{LocalStorage, Storage};
use shared::AuthSession;

use crate::services::logging::Logger;

pub const SESSION_STORAGE_KEY: &str = "finance-tracker.session";

pub fn load_session() -> Option<AuthSession> {
    LocalStorage::get::<AuthSession>(SESSION_STORAGE_KEY).ok()
}

pub fn save_session(session: &AuthSession) {
    if let Err(e) = LocalStorage::set(SESSION_STORAGE_KEY, session) {
        Logger::warn_with_component("storage", &format!("Failed to persist session: {}", e));
    }
}

pub fn clear_session() {
    LocalStorage::delete(SESSION_STORAGE_KEY);
}

pub fn load_theme() -> Option<String> {
    LocalStorage::get::<String>(THEME_STORAGE_KEY).ok()
}

pub fn save_theme(theme: Theme) {
    if let Err(e) = LocalStorage::set(THEME_STORAGE_KEY, theme.as_str()) {
        Logger::warn_with_component("storage", &format!("Failed to persist theme: {}", e));
    }
}
