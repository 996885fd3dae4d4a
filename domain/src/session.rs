//! Auth session lifecycle.
//!
//! The session starts in `Restoring` when the app boots, moves to
//! `SignedIn` or `SignedOut` once the persisted token has been checked, and
//! returns to `SignedOut` on sign-out. Signing out drops the profile and
//! everything derived from it. The frontend drives this through a reducer;
//! this module only holds the transitions and the error type shown on auth
//! forms.

use chrono::{DateTime, Utc};
use shared::{AuthSession, AuthUser, Profile};
use thiserror::Error;

/// Signed-in user with the data loaded for them
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub auth: AuthSession,
    /// Loaded after sign-in; `None` until the profile request completes
    pub profile: Option<Profile>,
    /// Started from a password-recovery link; cleared once a new password is set
    pub recovering: bool,
}

impl Session {
    pub fn new(auth: AuthSession) -> Self {
        Self {
            auth,
            profile: None,
            recovering: false,
        }
    }

    pub fn recovery(auth: AuthSession) -> Self {
        Self {
            recovering: true,
            ..Self::new(auth)
        }
    }

    pub fn user(&self) -> &AuthUser {
        &self.auth.user
    }

    pub fn access_token(&self) -> &str {
        &self.auth.access_token
    }

    /// Name shown in the shell: profile name, then the email
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|p| p.full_name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.auth.user.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Checking for a persisted session on startup
    #[default]
    Restoring,
    SignedOut,
    SignedIn(Session),
}

/// Transitions applied to the session state
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Result of reading persisted storage on startup
    Restored(Option<AuthSession>),
    /// Session taken from a password-recovery link
    RecoveryStarted(AuthSession),
    SignedIn(AuthSession),
    ProfileLoaded(Profile),
    PasswordUpdated,
    SignedOut,
}

impl SessionState {
    pub fn apply(&mut self, action: SessionAction) {
        let next = match (std::mem::take(self), action) {
            (_, SessionAction::Restored(Some(auth))) | (_, SessionAction::SignedIn(auth)) => {
                log::info!("session started for user {}", auth.user.id);
                SessionState::SignedIn(Session::new(auth))
            }
            (_, SessionAction::RecoveryStarted(auth)) => {
                log::info!("recovery session started for user {}", auth.user.id);
                SessionState::SignedIn(Session::recovery(auth))
            }
            (_, SessionAction::Restored(None)) => SessionState::SignedOut,
            (SessionState::SignedIn(mut session), SessionAction::ProfileLoaded(profile)) => {
                if profile.id == session.auth.user.id {
                    session.profile = Some(profile);
                } else {
                    log::warn!("ignoring profile for a different user");
                }
                SessionState::SignedIn(session)
            }
            (state, SessionAction::ProfileLoaded(_)) => state,
            (SessionState::SignedIn(mut session), SessionAction::PasswordUpdated) => {
                session.recovering = false;
                SessionState::SignedIn(session)
            }
            (state, SessionAction::PasswordUpdated) => state,
            (_, SessionAction::SignedOut) => {
                log::info!("session cleared");
                SessionState::SignedOut
            }
        };
        *self = next;
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.session().and_then(|s| s.profile.as_ref())
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }

    pub fn is_restoring(&self) -> bool {
        matches!(self, SessionState::Restoring)
    }

    pub fn is_recovering(&self) -> bool {
        self.session().is_some_and(|s| s.recovering)
    }
}

/// A token without an expiry is treated as live
pub fn is_expired(auth: &AuthSession, now: DateTime<Utc>) -> bool {
    auth.expires_at.is_some_and(|expires_at| expires_at <= now.timestamp())
}

/// Persisted session worth restoring on startup
pub fn usable_session(persisted: Option<AuthSession>, now: DateTime<Utc>) -> Option<AuthSession> {
    persisted.filter(|auth| !is_expired(auth, now))
}

/// Tokens carried in the URL fragment of a password-recovery link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
}

/// Read `#access_token=..&type=recovery` fragments. Other link types and
/// fragments without a token yield `None`.
pub fn parse_recovery_fragment(fragment: &str) -> Option<RecoveryTokens> {
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_at = None;
    let mut is_recovery = false;

    for pair in fragment.trim_start_matches('#').split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" if !value.is_empty() => access_token = Some(value.to_string()),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value.to_string()),
            "expires_at" => expires_at = value.parse().ok(),
            "type" => is_recovery = value == "recovery",
            _ => {}
        }
    }

    if !is_recovery {
        return None;
    }
    access_token.map(|access_token| RecoveryTokens {
        access_token,
        refresh_token,
        expires_at,
    })
}

/// Failures reported by the auth provider, displayed inline under the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Please confirm your email address before signing in")]
    EmailNotConfirmed,
    #[error("An account with this email already exists")]
    UserAlreadyRegistered,
    #[error("Password is too weak: {0}")]
    WeakPassword(String),
    #[error("Too many attempts, please wait a moment and try again")]
    RateLimited,
    #[error("Your session has expired, please sign in again")]
    SessionExpired,
    #[error("Could not reach the server: {0}")]
    Network(String),
    #[error("{0}")]
    Provider(String),
}

impl AuthError {
    /// Classify a provider failure from its HTTP status and reported reason
    pub fn from_provider(status: u16, reason: Option<&str>) -> Self {
        let reason = reason.unwrap_or("").trim();
        let lowered = reason.to_lowercase();

        if status == 429 {
            AuthError::RateLimited
        } else if lowered.contains("invalid login credentials") || lowered.contains("invalid_grant") {
            AuthError::InvalidCredentials
        } else if lowered.contains("email not confirmed") {
            AuthError::EmailNotConfirmed
        } else if lowered.contains("already registered") || lowered.contains("already exists") {
            AuthError::UserAlreadyRegistered
        } else if lowered.contains("password should") || lowered.contains("weak password") {
            AuthError::WeakPassword(reason.to_string())
        } else if status == 401 {
            AuthError::SessionExpired
        } else if reason.is_empty() {
            AuthError::Provider(format!("Request failed with status {}", status))
        } else {
            AuthError::Provider(reason.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::utc;
    use uuid::Uuid;

    fn auth_session(user_id: Uuid, expires_at: Option<i64>) -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at,
            user: AuthUser {
                id: user_id,
                email: "sam@example.com".to_string(),
            },
        }
    }

    fn profile(id: Uuid, name: Option<&str>) -> Profile {
        Profile {
            id,
            full_name: name.map(str::to_string),
            date_format: Some("dd/MM/yyyy".to_string()),
        }
    }

    #[test]
    fn test_initial_state_is_restoring() {
        let state = SessionState::default();
        assert!(state.is_restoring());
        assert!(!state.is_signed_in());
    }

    #[test]
    fn test_restore_with_and_without_token() {
        let now = utc(2024, 3, 5, 12, 0);
        let user = Uuid::new_v4();

        let mut restored = SessionState::default();
        restored.apply(SessionAction::Restored(usable_session(Some(auth_session(user, None)), now)));
        assert!(restored.is_signed_in());

        let mut empty = SessionState::default();
        empty.apply(SessionAction::Restored(usable_session(None, now)));
        assert_eq!(empty, SessionState::SignedOut);
    }

    #[test]
    fn test_usable_session_discards_expired_token() {
        let now = utc(2024, 3, 5, 12, 0);
        let expired = auth_session(Uuid::new_v4(), Some(now.timestamp() - 1));
        let live = auth_session(Uuid::new_v4(), Some(now.timestamp() + 3600));

        assert_eq!(usable_session(Some(expired), now), None);
        assert!(usable_session(Some(live), now).is_some());
    }

    #[test]
    fn test_parse_recovery_fragment() {
        let tokens = parse_recovery_fragment(
            "#access_token=abc&expires_at=1710000000&refresh_token=def&token_type=bearer&type=recovery",
        )
        .unwrap();

        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token.as_deref(), Some("def"));
        assert_eq!(tokens.expires_at, Some(1710000000));
    }

    #[test]
    fn test_parse_recovery_fragment_rejects_other_links() {
        assert_eq!(parse_recovery_fragment("#access_token=abc&type=signup"), None);
        assert_eq!(parse_recovery_fragment("#type=recovery"), None);
        assert_eq!(parse_recovery_fragment(""), None);
        assert_eq!(parse_recovery_fragment("#garbage"), None);
    }

    #[test]
    fn test_profile_loaded_for_matching_user() {
        let user = Uuid::new_v4();
        let mut state = SessionState::SignedOut;
        state.apply(SessionAction::SignedIn(auth_session(user, None)));
        assert_eq!(state.session().unwrap().display_name(), "sam@example.com");

        state.apply(SessionAction::ProfileLoaded(profile(user, Some("Sam Lee"))));
        assert_eq!(state.profile().unwrap().full_name.as_deref(), Some("Sam Lee"));
        assert_eq!(state.session().unwrap().display_name(), "Sam Lee");

        state.apply(SessionAction::ProfileLoaded(profile(Uuid::new_v4(), Some("Other"))));
        assert_eq!(state.session().unwrap().display_name(), "Sam Lee");
    }

    #[test]
    fn test_profile_ignored_when_signed_out() {
        let mut state = SessionState::SignedOut;
        state.apply(SessionAction::ProfileLoaded(profile(Uuid::new_v4(), None)));
        assert_eq!(state, SessionState::SignedOut);
    }

    #[test]
    fn test_sign_out_clears_profile() {
        let user = Uuid::new_v4();
        let mut state = SessionState::SignedOut;
        state.apply(SessionAction::SignedIn(auth_session(user, None)));
        state.apply(SessionAction::ProfileLoaded(profile(user, Some("Sam"))));

        state.apply(SessionAction::SignedOut);

        assert_eq!(state, SessionState::SignedOut);
        assert!(state.profile().is_none());
        assert!(state.session().is_none());
    }

    #[test]
    fn test_password_update_keeps_session() {
        let user = Uuid::new_v4();
        let mut state = SessionState::SignedOut;
        state.apply(SessionAction::SignedIn(auth_session(user, None)));
        state.apply(SessionAction::PasswordUpdated);
        assert!(state.is_signed_in());
    }

    #[test]
    fn test_recovery_flag_lives_with_the_session() {
        let user = Uuid::new_v4();
        let mut state = SessionState::default();
        state.apply(SessionAction::RecoveryStarted(auth_session(user, None)));
        assert!(state.is_signed_in());
        assert!(state.is_recovering());

        state.apply(SessionAction::PasswordUpdated);
        assert!(state.is_signed_in());
        assert!(!state.is_recovering());

        state.apply(SessionAction::RecoveryStarted(auth_session(user, None)));
        state.apply(SessionAction::SignedOut);
        assert!(!state.is_recovering());

        // A later normal sign-in does not inherit the old recovery
        state.apply(SessionAction::SignedIn(auth_session(user, None)));
        assert!(!state.is_recovering());
    }

    #[test]
    fn test_auth_error_classification() {
        assert_eq!(
            AuthError::from_provider(400, Some("Invalid login credentials")),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::from_provider(400, Some("Email not confirmed")),
            AuthError::EmailNotConfirmed
        );
        assert_eq!(
            AuthError::from_provider(422, Some("User already registered")),
            AuthError::UserAlreadyRegistered
        );
        assert_eq!(AuthError::from_provider(429, None), AuthError::RateLimited);
        assert_eq!(AuthError::from_provider(401, None), AuthError::SessionExpired);
        assert_eq!(
            AuthError::from_provider(500, None),
            AuthError::Provider("Request failed with status 500".to_string())
        );
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid email or password");
        assert_eq!(
            AuthError::from_provider(422, Some("Password should be at least 6 characters")).to_string(),
            "Password is too weak: Password should be at least 6 characters"
        );
        assert_eq!(
            AuthError::Provider("Signups not allowed".to_string()).to_string(),
            "Signups not allowed"
        );
    }
}
