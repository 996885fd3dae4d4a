use std::rc::Rc;

use finance_tracker_domain::session::{parse_recovery_fragment, usable_session};
use finance_tracker_domain::{AuthError, Session, SessionAction, SessionState};
use shared::{AuthSession, Profile, SignUpResponse};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;
use crate::services::storage;

/// Reducer wrapper so the session state machine can drive `use_reducer`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionModel(pub SessionState);

impl Reducible for SessionModel {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        state.apply(action);
        Rc::new(SessionModel(state))
    }
}

/// Result of a successful sign-up
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    SignedIn,
    /// The provider sent a confirmation email; no session yet
    ConfirmationSent,
}

/// Shared auth handle: the current session plus the flows that change it
#[derive(Clone, PartialEq)]
pub struct AuthContext {
    state: UseReducerHandle<SessionModel>,
    api: ApiClient,
}

impl AuthContext {
    pub fn state(&self) -> &SessionState {
        &self.state.0
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.0.session()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.state.0.profile()
    }

    /// Signed in from a password-recovery link and no new password set yet
    pub fn is_recovering(&self) -> bool {
        self.state.0.is_recovering()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn access_token(&self) -> Option<String> {
        self.session().map(|s| s.access_token().to_string())
    }

    fn start_session(&self, auth: AuthSession) {
        storage::save_session(&auth);
        self.state.dispatch(SessionAction::SignedIn(auth));
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        Logger::info_with_component("auth", "Signing in");
        let auth = self.api.sign_in(email, password).await.map_err(AuthError::from)?;
        self.start_session(auth);
        Ok(())
    }

    pub async fn sign_up(&self, full_name: &str, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        Logger::info_with_component("auth", "Creating account");
        match self.api.sign_up(full_name, email, password).await.map_err(AuthError::from)? {
            SignUpResponse::Session(auth) => {
                self.start_session(auth);
                Ok(SignUpOutcome::SignedIn)
            }
            SignUpResponse::PendingConfirmation(_) => Ok(SignUpOutcome::ConfirmationSent),
        }
    }

    /// Local state is cleared even when the provider call fails
    pub async fn sign_out(&self) {
        if let Some(token) = self.access_token() {
            if let Err(e) = self.api.sign_out(&token).await {
                Logger::warn_with_component("auth", &format!("Sign-out request failed: {}", e));
            }
        }
        storage::clear_session();
        self.state.dispatch(SessionAction::SignedOut);
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let redirect = date_utils::current_origin().map(|origin| format!("{}/update-password", origin));
        self.api
            .request_password_reset(email, redirect.as_deref())
            .await
            .map_err(AuthError::from)
    }

    pub async fn update_password(&self, password: &str) -> Result<(), AuthError> {
        let token = self.access_token().ok_or(AuthError::SessionExpired)?;
        self.api
            .update_password(&token, password)
            .await
            .map_err(AuthError::from)?;
        Logger::info_with_component("auth", "Password updated");
        self.state.dispatch(SessionAction::PasswordUpdated);
        Ok(())
    }

    /// Store a freshly loaded profile, e.g. after a settings change
    pub fn set_profile(&self, profile: Profile) {
        self.state.dispatch(SessionAction::ProfileLoaded(profile));
    }

    /// The API rejected the token; drop the session without calling out
    pub fn expire(&self) {
        storage::clear_session();
        self.state.dispatch(SessionAction::SignedOut);
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let state = use_reducer(SessionModel::default);
    let api = use_memo((), |_| ApiClient::new());

    // Restore on mount: a recovery link wins over a stored session
    {
        let state = state.clone();
        let api = (*api).clone();
        use_effect_with((), move |_| {
            match parse_recovery_fragment(&date_utils::current_hash()) {
                Some(tokens) => {
                    date_utils::clear_hash();
                    spawn_local(async move {
                        match api.get_user(&tokens.access_token).await {
                            Ok(user) => {
                                let auth = AuthSession {
                                    access_token: tokens.access_token,
                                    refresh_token: tokens.refresh_token,
                                    expires_at: tokens.expires_at,
                                    user,
                                };
                                storage::save_session(&auth);
                                state.dispatch(SessionAction::RecoveryStarted(auth));
                            }
                            Err(e) => {
                                Logger::warn_with_component("auth", &format!("Recovery link rejected: {}", e));
                                state.dispatch(SessionAction::Restored(None));
                            }
                        }
                    });
                }
                None => {
                    let persisted = storage::load_session();
                    let usable = usable_session(persisted.clone(), date_utils::now());
                    if persisted.is_some() && usable.is_none() {
                        Logger::info_with_component("auth", "Stored session expired");
                        storage::clear_session();
                    }
                    state.dispatch(SessionAction::Restored(usable));
                }
            }
            || ()
        });
    }

    // Load the profile whenever a different user signs in
    let signed_in = state.0.session().map(|s| (s.user().id, s.access_token().to_string()));
    {
        let state = state.clone();
        let api = (*api).clone();
        use_effect_with(signed_in, move |signed_in| {
            if let Some((user_id, token)) = signed_in.clone() {
                spawn_local(async move {
                    match api.get_profile(&token, user_id).await {
                        Ok(Some(profile)) => state.dispatch(SessionAction::ProfileLoaded(profile)),
                        Ok(None) => Logger::debug_with_component("auth", "No profile row for user"),
                        Err(e) => Logger::warn_with_component("auth", &format!("Failed to load profile: {}", e)),
                    }
                });
            }
            || ()
        });
    }

    let context = AuthContext {
        state,
        api: (*api).clone(),
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            { props.children.clone() }
        </ContextProvider<AuthContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AuthUser;
    use uuid::Uuid;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_session_model_reduces_through_state_machine() {
        let model = Rc::new(SessionModel::default());
        assert!(model.0.is_restoring());

        let auth = AuthSession {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at: None,
            user: AuthUser {
                id: Uuid::new_v4(),
                email: "sam@example.com".to_string(),
            },
        };
        let model = model.reduce(SessionAction::SignedIn(auth));
        assert!(model.0.is_signed_in());

        let model = model.reduce(SessionAction::SignedOut);
        assert_eq!(model.0, SessionState::SignedOut);
    }
}
