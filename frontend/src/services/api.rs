use finance_tracker_domain::AuthError;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    Account, AuthSession, AuthUser, CreateTransactionRequest, Goal, PasswordResetRequest, Profile,
    ProviderErrorBody, SignInRequest, SignUpMetadata, SignUpRequest, SignUpResponse, Transaction,
    UpdatePasswordRequest,
};
use thiserror::Error;
use uuid::Uuid;

use crate::services::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed with status {status}")]
    Status { status: u16, reason: Option<String> },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                reason: Some(reason),
                ..
            } => reason.clone(),
            ApiError::Status { status: 401, .. } => {
                "Your session has expired, please sign in again".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }
}

impl From<ApiError> for AuthError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Network(message) => AuthError::Network(message),
            ApiError::Status { status, reason } => AuthError::from_provider(status, reason.as_deref()),
            ApiError::Decode(message) => AuthError::Provider(message),
        }
    }
}

/// Client for the hosted auth and data API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    api_key: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a client from the build-time configuration
    pub fn new() -> Self {
        Self::with_config(&AppConfig::from_env())
    }

    pub fn with_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            api_key: String::new(),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    /// Attach the project key and bearer token. Anonymous calls use the
    /// project key as the bearer.
    fn authorize(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let bearer = format!("Bearer {}", token.unwrap_or(&self.api_key));
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", &bearer)
    }

    async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
        let request = builder
            .json(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;
        Self::send(request).await
    }

    async fn send(request: Request) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        let reason = response
            .json::<ProviderErrorBody>()
            .await
            .ok()
            .and_then(|body| body.reason().map(str::to_string));
        ApiError::Status { status, reason }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_rows<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<Vec<T>, ApiError> {
        let builder = self.authorize(Request::get(&self.rest_url(path)), Some(token));
        let request = builder
            .build()
            .map_err(|e| ApiError::Decode(format!("Failed to build request: {}", e)))?;
        let response = Self::send(request).await?;
        Self::read_json(response).await
    }

    // ---- auth ----

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = SignInRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let builder = self.authorize(Request::post(&self.auth_url("token?grant_type=password")), None);
        let response = Self::send_json(builder, &body).await?;
        Self::read_json(response).await
    }

    pub async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignUpResponse, ApiError> {
        let body = SignUpRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            data: SignUpMetadata {
                full_name: full_name.trim().to_string(),
            },
        };
        let builder = self.authorize(Request::post(&self.auth_url("signup")), None);
        let response = Self::send_json(builder, &body).await?;
        Self::read_json(response).await
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), ApiError> {
        let builder = self.authorize(Request::post(&self.auth_url("logout")), Some(token));
        let request = builder
            .build()
            .map_err(|e| ApiError::Decode(format!("Failed to build request: {}", e)))?;
        Self::send(request).await.map(|_| ())
    }

    /// Ask the provider to email a reset link pointing at `redirect_to`
    pub async fn request_password_reset(&self, email: &str, redirect_to: Option<&str>) -> Result<(), ApiError> {
        let path = match redirect_to {
            Some(url) => format!("recover?redirect_to={}", js_encode(url)),
            None => "recover".to_string(),
        };
        let body = PasswordResetRequest {
            email: email.trim().to_string(),
        };
        let builder = self.authorize(Request::post(&self.auth_url(&path)), None);
        Self::send_json(builder, &body).await.map(|_| ())
    }

    pub async fn update_password(&self, token: &str, password: &str) -> Result<AuthUser, ApiError> {
        let body = UpdatePasswordRequest {
            password: password.to_string(),
        };
        let builder = self.authorize(Request::put(&self.auth_url("user")), Some(token));
        let response = Self::send_json(builder, &body).await?;
        Self::read_json(response).await
    }

    /// User behind an access token, used to finish a recovery-link sign-in
    pub async fn get_user(&self, token: &str) -> Result<AuthUser, ApiError> {
        let builder = self.authorize(Request::get(&self.auth_url("user")), Some(token));
        let request = builder
            .build()
            .map_err(|e| ApiError::Decode(format!("Failed to build request: {}", e)))?;
        let response = Self::send(request).await?;
        Self::read_json(response).await
    }

    // ---- data ----

    pub async fn get_profile(&self, token: &str, user_id: Uuid) -> Result<Option<Profile>, ApiError> {
        let rows: Vec<Profile> = self
            .get_rows(token, &format!("profiles?select=*&id=eq.{}", user_id))
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn update_date_format(&self, token: &str, user_id: Uuid, pattern: &str) -> Result<Profile, ApiError> {
        let body = serde_json::json!({ "date_format": pattern });
        let builder = self
            .authorize(
                Request::patch(&self.rest_url(&format!("profiles?id=eq.{}", user_id))),
                Some(token),
            )
            .header("Prefer", "return=representation");
        let response = Self::send_json(builder, &body).await?;
        let rows: Vec<Profile> = Self::read_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode("Profile update returned no rows".to_string()))
    }

    pub async fn get_transactions(&self, token: &str) -> Result<Vec<Transaction>, ApiError> {
        self.get_rows(token, "transactions?select=*&order=created_at.desc")
            .await
    }

    pub async fn get_accounts(&self, token: &str) -> Result<Vec<Account>, ApiError> {
        self.get_rows(token, "accounts?select=*&order=name.asc").await
    }

    pub async fn get_goals(&self, token: &str) -> Result<Vec<Goal>, ApiError> {
        self.get_rows(token, "goals?select=*&order=name.asc").await
    }

    pub async fn create_transaction(
        &self,
        token: &str,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let builder = self
            .authorize(Request::post(&self.rest_url("transactions")), Some(token))
            .header("Prefer", "return=representation");
        let response = Self::send_json(builder, request).await?;
        let rows: Vec<Transaction> = Self::read_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode("Insert returned no rows".to_string()))
    }

    pub async fn delete_transaction(&self, token: &str, id: Uuid) -> Result<(), ApiError> {
        let builder = self.authorize(
            Request::delete(&self.rest_url(&format!("transactions?id=eq.{}", id))),
            Some(token),
        );
        let request = builder
            .build()
            .map_err(|e| ApiError::Decode(format!("Failed to build request: {}", e)))?;
        Self::send(request).await.map(|_| ())
    }
}

fn js_encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_urls() {
        let client = ApiClient::with_base_url("https://demo.supabase.co".to_string());
        assert_eq!(client.auth_url("signup"), "https://demo.supabase.co/auth/v1/signup");
        assert_eq!(
            client.rest_url("transactions"),
            "https://demo.supabase.co/rest/v1/transactions"
        );
    }

    #[wasm_bindgen_test]
    fn test_api_error_maps_to_auth_error() {
        let error = ApiError::Status {
            status: 400,
            reason: Some("Invalid login credentials".to_string()),
        };
        assert_eq!(AuthError::from(error), AuthError::InvalidCredentials);

        let error = ApiError::Network("offline".to_string());
        assert_eq!(AuthError::from(error), AuthError::Network("offline".to_string()));
    }

    #[wasm_bindgen_test]
    fn test_user_message_prefers_provider_reason() {
        let error = ApiError::Status {
            status: 409,
            reason: Some("duplicate key".to_string()),
        };
        assert_eq!(error.user_message(), "duplicate key");

        let expired = ApiError::Status {
            status: 401,
            reason: None,
        };
        assert!(expired.is_unauthorized());
        assert_eq!(
            expired.user_message(),
            "Your session has expired, please sign in again"
        );
    }
}
