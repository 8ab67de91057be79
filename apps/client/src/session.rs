//! Current-user store.
//!
//! The auth flow pushes sessions in; anything that cares about the signed-in
//! user subscribes and is notified on every change. Subscriptions are explicit
//! handles: dropping or calling [`SessionSubscription::unsubscribe`] ends them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Provider session. Opaque to the app apart from the user and expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

impl AuthSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<AuthSession>>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// The current session, unless it has expired.
    pub fn session(&self) -> Option<AuthSession> {
        live_session(&self.tx.borrow()).cloned()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.session().map(|s| s.user)
    }

    /// Id of the signed-in user, or an empty string when there is none.
    pub fn user_id(&self) -> String {
        self.current_user().map(|u| u.id).unwrap_or_default()
    }

    pub fn set_session(&self, session: AuthSession) {
        self.tx.send_replace(Some(session));
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

fn live_session(session: &Option<AuthSession>) -> Option<&AuthSession> {
    session.as_ref().filter(|s| !s.is_expired(Utc::now()))
}

pub struct SessionSubscription {
    rx: watch::Receiver<Option<AuthSession>>,
}

impl SessionSubscription {
    /// Waits for the next session change and returns the user it left
    /// behind. Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Option<AuthUser>> {
        self.rx.changed().await.ok()?;
        Some(live_session(&self.rx.borrow_and_update()).map(|s| s.user.clone()))
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        live_session(&self.rx.borrow()).map(|s| s.user.clone())
    }

    pub fn unsubscribe(self) {}
}
