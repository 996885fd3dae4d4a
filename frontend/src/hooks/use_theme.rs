use yew::prelude::*;

use crate::contexts::ThemeContext;

#[hook]
pub fn use_theme() -> Option<ThemeContext> {
    use_context::<ThemeContext>()
}
