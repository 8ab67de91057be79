//! Auth provider seam and its GoTrue (Supabase Auth) REST implementation.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::AuthError;
use crate::session::{AuthSession, AuthUser};

/// Remote auth operations the app consumes. Every call is an opaque remote
/// call that either succeeds or fails with an [`AuthError`].
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthError>;

    /// Re-sends the sign-up confirmation email.
    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError>;
}

pub struct GoTrueClient {
    client: Client,
    auth_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: AuthUser,
}

impl GoTrueClient {
    pub fn new(base_url: &str, anon_key: String) -> Self {
        Self {
            client: Client::new(),
            auth_url: format!("{}/auth/v1", base_url.trim_end_matches('/')),
            anon_key,
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Response, AuthError> {
        let response = self
            .client
            .post(format!("{}{path}", self.auth_url))
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;
        check_status(response).await
    }
}

/// Turns a non-2xx GoTrue response into an [`AuthError`], keeping the
/// provider's error code when there is one.
async fn check_status(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Authentication request failed")
                .to_string()
        });
    let code = ["error_code", "code"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    Err(AuthError {
        message,
        code,
        status: Some(status.as_u16()),
    })
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.post("/signup", json!({ "email": email, "password": password }))
            .await?;
        debug!("Sign-up accepted for {email}");
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .post(
                "/token?grant_type=password",
                json!({ "email": email, "password": password }),
            )
            .await?;
        let token: TokenResponse = response.json().await?;
        debug!("Signed in as {}", token.user.id);

        Ok(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
            user: token.user,
        })
    }

    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthError> {
        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError> {
        self.post("/resend", json!({ "type": "signup", "email": email }))
            .await?;
        Ok(())
    }
}
