//! Sign-in / sign-up form state and auth error classification.

use tracing::{error, info};

use crate::error::AuthError;
use crate::provider::AuthProvider;
use crate::session::SessionStore;

pub const SIGN_UP_CONFIRMATION_NOTICE: &str =
    "Please check your email for a confirmation link to complete your registration.";
pub const EMAIL_NOT_CONFIRMED_MESSAGE: &str =
    "Please confirm your email address before signing in.";
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Invalid email or password. Please check your credentials and try again.";
pub const RESEND_SUCCESS_MESSAGE: &str =
    "Confirmation email has been resent. Please check your inbox.";
pub const RESEND_FAILURE_MESSAGE: &str =
    "Failed to resend confirmation email. Please try again.";
const GENERIC_AUTH_FAILURE: &str = "An error occurred during authentication";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Welcome Back",
            AuthMode::SignUp => "Create Account",
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Don't have an account? Sign Up",
            AuthMode::SignUp => "Already have an account? Sign In",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    EmailNotConfirmed,
    InvalidCredentials,
    Other,
}

/// Maps a provider error to a user-facing category.
///
/// Known error codes are checked first; message substrings are the fallback
/// for providers (or provider versions) that send no code.
pub fn classify_auth_error(err: &AuthError) -> AuthErrorKind {
    match err.code.as_deref() {
        Some("email_not_confirmed") => return AuthErrorKind::EmailNotConfirmed,
        Some("invalid_credentials") => return AuthErrorKind::InvalidCredentials,
        _ => {}
    }

    let message = err.message.as_str();
    if message == "Email not confirmed" {
        AuthErrorKind::EmailNotConfirmed
    } else if message.contains("Invalid login credentials") {
        AuthErrorKind::InvalidCredentials
    } else if message.contains("email_not_confirmed") {
        AuthErrorKind::EmailNotConfirmed
    } else {
        AuthErrorKind::Other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Error(String),
    Notice(String),
}

impl Banner {
    pub fn text(&self) -> &str {
        match self {
            Banner::Error(text) | Banner::Notice(text) => text,
        }
    }
}

/// State behind the auth screen.
#[derive(Debug, Clone)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    mode: AuthMode,
    banner: Option<Banner>,
    show_resend: bool,
    resend_success: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            mode: AuthMode::SignIn,
            banner: None,
            show_resend: false,
            resend_success: false,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Whether the "Resend Confirmation Email" action is offered.
    pub fn show_resend(&self) -> bool {
        self.show_resend
    }

    pub fn resend_success(&self) -> bool {
        self.resend_success
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.clear_banners();
    }

    fn clear_banners(&mut self) {
        self.banner = None;
        self.show_resend = false;
        self.resend_success = false;
    }

    /// Submits the form in the current mode. Returns `true` when the user is
    /// now signed in.
    pub async fn submit(&mut self, provider: &dyn AuthProvider, sessions: &SessionStore) -> bool {
        self.clear_banners();

        let result = match self.mode {
            AuthMode::SignUp => provider.sign_up(&self.email, &self.password).await.map(|()| {
                info!("Sign-up successful for {}", self.email);
                None
            }),
            AuthMode::SignIn => provider
                .sign_in_with_password(&self.email, &self.password)
                .await
                .map(Some),
        };

        match result {
            Ok(Some(session)) => {
                info!("Sign-in successful for user {}", session.user.id);
                sessions.set_session(session);
                true
            }
            Ok(None) => {
                self.banner = Some(Banner::Notice(SIGN_UP_CONFIRMATION_NOTICE.to_string()));
                false
            }
            Err(err) => {
                error!("Auth error: {err:?}");
                self.apply_error(&err);
                false
            }
        }
    }

    fn apply_error(&mut self, err: &AuthError) {
        let (message, show_resend) = match classify_auth_error(err) {
            AuthErrorKind::EmailNotConfirmed => (EMAIL_NOT_CONFIRMED_MESSAGE.to_string(), true),
            AuthErrorKind::InvalidCredentials => (INVALID_CREDENTIALS_MESSAGE.to_string(), false),
            AuthErrorKind::Other if err.message.is_empty() => {
                (GENERIC_AUTH_FAILURE.to_string(), false)
            }
            AuthErrorKind::Other => (err.message.clone(), false),
        };
        self.banner = Some(Banner::Error(message));
        self.show_resend = show_resend;
    }

    /// Re-sends the confirmation email for the email currently entered.
    ///
    /// Every call reaches the provider; there is no deduplication.
    pub async fn resend_confirmation(&mut self, provider: &dyn AuthProvider) {
        self.resend_success = false;
        self.banner = None;

        match provider.resend_confirmation(&self.email).await {
            Ok(()) => self.resend_success = true,
            Err(err) => {
                error!("Resend error: {err:?}");
                self.banner = Some(Banner::Error(RESEND_FAILURE_MESSAGE.to_string()));
            }
        }
    }
}

/// Signs the current user out. The local session is cleared even if the
/// provider call fails.
pub async fn sign_out(provider: &dyn AuthProvider, sessions: &SessionStore) {
    if let Some(session) = sessions.session() {
        if let Err(err) = provider.sign_out(&session).await {
            error!("Sign-out error: {err:?}");
        }
    }
    sessions.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeProvider;

    fn form(mode: AuthMode) -> AuthForm {
        let mut form = AuthForm::new();
        form.email = "learner@example.com".to_string();
        form.password = "hunter22".to_string();
        if mode == AuthMode::SignUp {
            form.toggle_mode();
        }
        form
    }

    #[test]
    fn test_classify_exact_email_not_confirmed() {
        let err = AuthError::new("Email not confirmed");
        assert_eq!(classify_auth_error(&err), AuthErrorKind::EmailNotConfirmed);
    }

    #[test]
    fn test_classify_email_not_confirmed_substring() {
        let err = AuthError::new("AuthApiError: email_not_confirmed");
        assert_eq!(classify_auth_error(&err), AuthErrorKind::EmailNotConfirmed);
    }

    #[test]
    fn test_classify_invalid_credentials() {
        let err = AuthError::new("AuthApiError: Invalid login credentials");
        assert_eq!(classify_auth_error(&err), AuthErrorKind::InvalidCredentials);
    }

    #[test]
    fn test_classify_prefers_code_over_message() {
        let err = AuthError::new("Your email needs verifying").with_code("email_not_confirmed");
        assert_eq!(classify_auth_error(&err), AuthErrorKind::EmailNotConfirmed);

        let err = AuthError::new("Wrong password").with_code("invalid_credentials");
        assert_eq!(classify_auth_error(&err), AuthErrorKind::InvalidCredentials);
    }

    #[test]
    fn test_classify_other() {
        let err = AuthError::new("Email rate limit exceeded").with_code("over_email_send_rate_limit");
        assert_eq!(classify_auth_error(&err), AuthErrorKind::Other);
    }

    #[tokio::test]
    async fn test_email_not_confirmed_offers_resend() {
        let provider = FakeProvider::failing_sign_in(AuthError::new("Email not confirmed"));
        let sessions = SessionStore::new();
        let mut form = form(AuthMode::SignIn);

        assert!(!form.submit(&provider, &sessions).await);
        assert!(form.show_resend());
        assert_eq!(
            form.banner(),
            Some(&Banner::Error(EMAIL_NOT_CONFIRMED_MESSAGE.to_string()))
        );
        assert!(sessions.current_user().is_none());
    }

    #[tokio::test]
    async fn test_invalid_credentials_hides_resend() {
        let provider =
            FakeProvider::failing_sign_in(AuthError::new("Invalid login credentials"));
        let sessions = SessionStore::new();
        let mut form = form(AuthMode::SignIn);

        form.submit(&provider, &sessions).await;
        assert!(!form.show_resend());
        assert_eq!(form.banner().unwrap().text(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[tokio::test]
    async fn test_unknown_error_shown_verbatim() {
        let provider = FakeProvider::failing_sign_in(AuthError::new("Database error granting user"));
        let mut form = form(AuthMode::SignIn);

        form.submit(&provider, &SessionStore::new()).await;
        assert_eq!(form.banner().unwrap().text(), "Database error granting user");
        assert!(!form.show_resend());
    }

    #[tokio::test]
    async fn test_empty_error_message_gets_generic_text() {
        let provider = FakeProvider::failing_sign_in(AuthError::new(""));
        let mut form = form(AuthMode::SignIn);

        form.submit(&provider, &SessionStore::new()).await;
        assert_eq!(form.banner().unwrap().text(), GENERIC_AUTH_FAILURE);
    }

    #[tokio::test]
    async fn test_sign_in_success_updates_session_store() {
        let provider = FakeProvider::default();
        let sessions = SessionStore::new();
        let mut form = form(AuthMode::SignIn);

        assert!(form.submit(&provider, &sessions).await);
        assert_eq!(sessions.user_id(), "user-1");
        assert!(form.banner().is_none());
    }

    #[tokio::test]
    async fn test_sign_up_success_does_not_sign_in() {
        let provider = FakeProvider::default();
        let sessions = SessionStore::new();
        let mut form = form(AuthMode::SignUp);

        assert!(!form.submit(&provider, &sessions).await);
        assert!(sessions.current_user().is_none());
        assert_eq!(
            form.banner(),
            Some(&Banner::Notice(SIGN_UP_CONFIRMATION_NOTICE.to_string()))
        );
        assert_eq!(provider.calls(), vec!["sign_up:learner@example.com"]);
    }

    #[tokio::test]
    async fn test_resend_twice_calls_provider_twice() {
        let provider = FakeProvider::failing_sign_in(AuthError::new("Email not confirmed"));
        let mut form = form(AuthMode::SignIn);
        form.submit(&provider, &SessionStore::new()).await;

        form.resend_confirmation(&provider).await;
        form.resend_confirmation(&provider).await;

        let resends = provider
            .calls()
            .into_iter()
            .filter(|c| c == "resend:learner@example.com")
            .count();
        assert_eq!(resends, 2);
        assert!(form.resend_success());
    }

    #[tokio::test]
    async fn test_resend_failure_sets_error() {
        let provider = FakeProvider {
            resend_error: Some(AuthError::new("rate limited")),
            ..FakeProvider::failing_sign_in(AuthError::new("Email not confirmed"))
        };
        let mut form = form(AuthMode::SignIn);
        form.submit(&provider, &SessionStore::new()).await;

        form.resend_confirmation(&provider).await;
        assert!(!form.resend_success());
        assert_eq!(form.banner().unwrap().text(), RESEND_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_toggle_mode_clears_banners() {
        let provider = FakeProvider::failing_sign_in(AuthError::new("Email not confirmed"));
        let mut form = form(AuthMode::SignIn);
        form.submit(&provider, &SessionStore::new()).await;
        form.resend_confirmation(&provider).await;

        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::SignUp);
        assert!(form.banner().is_none());
        assert!(!form.show_resend());
        assert!(!form.resend_success());
    }

    #[tokio::test]
    async fn test_sign_out_clears_session_even_on_provider_error() {
        let provider = FakeProvider {
            sign_out_error: Some(AuthError::new("session not found")),
            ..FakeProvider::default()
        };
        let sessions = SessionStore::new();
        form(AuthMode::SignIn).submit(&provider, &sessions).await;
        assert!(sessions.current_user().is_some());

        sign_out(&provider, &sessions).await;
        assert!(sessions.current_user().is_none());
        assert!(provider.calls().contains(&"sign_out:user-1".to_string()));
    }
}
