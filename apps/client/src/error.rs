use shared::RoadmapShapeError;
use thiserror::Error;

/// Failures of the roadmap generation call. Callers of
/// [`crate::roadmap::RoadmapClient::generate`] never see these; they are
/// logged and replaced by the fallback roadmap.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to generate roadmap: {0}")]
    Status(String),

    #[error("Invalid roadmap returned: {0}")]
    Shape(#[from] RoadmapShapeError),
}

/// An error reported by the auth provider.
///
/// `code` is the provider's machine-readable error code when it sends one;
/// `message` is its human-readable text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    pub code: Option<String>,
    pub status: Option<u16>,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            message: e.to_string(),
            code: None,
            status: e.status().map(|s| s.as_u16()),
        }
    }
}
