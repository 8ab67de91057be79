use serde::Serialize;
use serde_json::Value;

/// A row in the `roadmaps` table. Written once per successful generation and
/// never read back by this service.
#[derive(Debug, Clone, Serialize)]
pub struct NewRoadmapRecord {
    pub prompt: String,
    pub content: Value,
    pub user_id: String,
}
