use finance_tracker_domain::DateFormatter;
use yew::prelude::*;

use crate::hooks::use_auth::use_auth;

/// Formatter for the signed-in user's preferred date pattern.
/// Falls back to `MM/dd/yyyy` until a profile is loaded.
#[hook]
pub fn use_date_format() -> DateFormatter {
    let auth = use_auth();
    DateFormatter::from_profile(auth.as_ref().and_then(|a| a.profile()))
}
