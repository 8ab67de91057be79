//! Axum route handlers for the roadmap generation endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use shared::RoadmapSuggestion;

use crate::errors::AppError;
use crate::roadmap::generator::generate_roadmap;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// OPTIONS /functions/v1/generate-roadmap
///
/// CORS preflight. The CORS headers themselves are added by the router.
pub async fn handle_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// POST /functions/v1/generate-roadmap
///
/// Checks, in order: Gemini key configured (503), `x-user-id` present (400),
/// `prompt` a non-empty string (400). A body that is not JSON, or is JSON
/// `null`, is a 500 like any other failure past validation.
///
/// The body is taken as raw bytes so a malformed payload cannot pre-empt the
/// configuration and header checks.
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RoadmapSuggestion>, AppError> {
    let llm = state.llm.as_ref().ok_or(AppError::MissingApiKey)?;

    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let prompt = extract_prompt(&body)?;

    let roadmap = generate_roadmap(llm, state.store.as_deref(), user_id, &prompt).await?;
    Ok(Json(roadmap))
}

/// Only a parsed body can fail with 400. Non-object JSON other than `null`
/// simply has no `prompt`.
fn extract_prompt(body: &[u8]) -> Result<String, AppError> {
    let request: Value =
        serde_json::from_slice(body).map_err(|e| AppError::MalformedBody(e.to_string()))?;
    if request.is_null() {
        return Err(AppError::MalformedBody("body is null".to_string()));
    }
    match request.get("prompt") {
        Some(Value::String(prompt)) if !prompt.is_empty() => Ok(prompt.clone()),
        _ => Err(AppError::Validation("Valid prompt is required".to_string())),
    }
}
