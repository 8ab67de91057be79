//! Test doubles for the auth provider and the generation endpoint.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;

use crate::error::AuthError;
use crate::provider::AuthProvider;
use crate::session::{AuthSession, AuthUser};

/// Scripted auth provider that records every call as `"<op>:<subject>"`.
#[derive(Default)]
pub struct FakeProvider {
    pub sign_in_error: Option<AuthError>,
    pub resend_error: Option<AuthError>,
    pub sign_out_error: Option<AuthError>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn failing_sign_in(err: AuthError) -> Self {
        Self {
            sign_in_error: Some(err),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AuthProvider for FakeProvider {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<(), AuthError> {
        self.record(format!("sign_up:{email}"));
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<AuthSession, AuthError> {
        self.record(format!("sign_in:{email}"));
        if let Some(err) = &self.sign_in_error {
            return Err(err.clone());
        }
        Ok(AuthSession {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at: None,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some(email.to_string()),
            },
        })
    }

    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthError> {
        self.record(format!("sign_out:{}", session.user.id));
        self.sign_out_error.clone().map_or(Ok(()), Err)
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError> {
        self.record(format!("resend:{email}"));
        self.resend_error.clone().map_or(Ok(()), Err)
    }
}

/// What the fake generation endpoint saw: headers and JSON body per call.
pub type EndpointCalls = Arc<Mutex<Vec<(HeaderMap, Value)>>>;

/// Starts a fake `/functions/v1/generate-roadmap` answering every call with
/// `status` and `body`.
pub async fn spawn_endpoint(status: StatusCode, body: Value) -> (String, EndpointCalls) {
    let calls: EndpointCalls = Arc::default();
    let app = Router::new()
        .route(
            "/functions/v1/generate-roadmap",
            post(
                move |State(calls): State<EndpointCalls>,
                      headers: HeaderMap,
                      Json(request): Json<Value>| async move {
                    calls.lock().unwrap().push((headers, request));
                    (status, Json(body))
                },
            ),
        )
        .with_state(calls.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), calls)
}
