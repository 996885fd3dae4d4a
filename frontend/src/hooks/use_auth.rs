use yew::prelude::*;

use crate::contexts::AuthContext;

/// Auth handle from the nearest `AuthProvider`; `None` outside of one
#[hook]
pub fn use_auth() -> Option<AuthContext> {
    use_context::<AuthContext>()
}
