use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::roadmap::store::RoadmapStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when `GEMINI_API_KEY` is unset; requests then fail with 503.
    pub llm: Option<LlmClient>,
    /// `None` when no storage backend is configured; generation then fails with 500.
    pub store: Option<Arc<dyn RoadmapStore>>,
}
