use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Liveness plus which collaborators are wired. A running service with no
/// Gemini key still reports `ok`; generation requests answer 503 instead.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "roadmap-api",
        "gemini_configured": state.llm.is_some(),
        "storage_configured": state.store.is_some(),
    }))
}
