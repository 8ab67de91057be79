use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shared::RoadmapShapeError;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The HTTP status is chosen by variant, never by inspecting the message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("Storage configuration is missing")]
    StorageNotConfigured,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("{0}")]
    Llm(#[from] LlmError),

    #[error("Failed to parse Gemini response: {0}")]
    InvalidRoadmap(#[from] RoadmapShapeError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::StorageNotConfigured
            | AppError::MalformedBody(_)
            | AppError::Llm(_)
            | AppError::InvalidRoadmap(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Diagnostic detail for the error envelope: the variant with its source chain.
    fn details(&self) -> String {
        format!("{self:?}")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Roadmap request failed ({status}): {self}");
        } else {
            tracing::warn!("Rejected roadmap request ({status}): {self}");
        }

        let body = json!({ "error": self.to_string(), "details": self.details() });
        (status, Json(body)).into_response()
    }
}
