pub mod auth;
pub mod theme;

pub use auth::{AuthContext, AuthProvider, SignUpOutcome};
pub use theme::{ThemeContext, ThemeProvider};
