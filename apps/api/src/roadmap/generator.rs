//! Roadmap generation: template the prompt, call Gemini, validate the shape,
//! then persist best-effort.

use shared::RoadmapSuggestion;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::roadmap::NewRoadmapRecord;
use crate::roadmap::prompts::build_roadmap_prompt;
use crate::roadmap::store::RoadmapStore;

/// Asks the model for a roadmap and returns it only if it passes the
/// structural check.
pub async fn generate_roadmap_content(
    llm: &LlmClient,
    prompt: &str,
) -> Result<RoadmapSuggestion, AppError> {
    let text = llm.call_text(&build_roadmap_prompt(prompt)).await?;
    Ok(RoadmapSuggestion::from_json_str(&text)?)
}

/// Full pipeline for one request.
///
/// Persistence runs only after a validated roadmap exists, and its outcome
/// never changes the result. A missing store is still a configuration error.
pub async fn generate_roadmap(
    llm: &LlmClient,
    store: Option<&dyn RoadmapStore>,
    user_id: &str,
    prompt: &str,
) -> Result<RoadmapSuggestion, AppError> {
    info!("Generating roadmap for user {user_id}");
    let roadmap = generate_roadmap_content(llm, prompt).await?;
    info!(
        "Generated roadmap \"{}\" with {} steps and {} resources",
        roadmap.title,
        roadmap.steps.len(),
        roadmap.resources.len()
    );

    let store = store.ok_or(AppError::StorageNotConfigured)?;
    persist_best_effort(store, user_id, prompt, &roadmap).await;

    Ok(roadmap)
}

async fn persist_best_effort(
    store: &dyn RoadmapStore,
    user_id: &str,
    prompt: &str,
    roadmap: &RoadmapSuggestion,
) {
    let content = match serde_json::to_value(roadmap) {
        Ok(content) => content,
        Err(e) => {
            warn!("Error storing roadmap: {e}");
            return;
        }
    };
    let record = NewRoadmapRecord {
        prompt: prompt.to_string(),
        content,
        user_id: user_id.to_string(),
    };
    if let Err(e) = store.insert_roadmap(&record).await {
        warn!("Error storing roadmap: {e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        candidate, spawn_gemini, valid_roadmap_json, FailingStore, RecordingStore,
    };
    use axum::http::StatusCode;
    use serde_json::json;

    const USER: &str = "0b8e2c4a-1d3f-4e5a-8b6c-7d9e0f1a2b3c";

    #[tokio::test]
    async fn test_generates_and_persists_valid_roadmap() {
        let (base, requests) =
            spawn_gemini(StatusCode::OK, candidate(&valid_roadmap_json().to_string())).await;
        let llm = LlmClient::new("key".to_string(), &base);
        let store = RecordingStore::default();

        let roadmap = generate_roadmap(&llm, Some(&store), USER, "- Goals: web dev")
            .await
            .unwrap();

        assert_eq!(roadmap.title, "Becoming a Web Developer");
        let records = store.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, USER);
        assert_eq!(records[0].prompt, "- Goals: web dev");
        assert_eq!(records[0].content, valid_roadmap_json());

        let sent = requests.lock().unwrap();
        let text = sent[0]["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("As an expert in educational planning"));
        assert!(text.contains("- Goals: web dev"));
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_change_result() {
        let (base, _) =
            spawn_gemini(StatusCode::OK, candidate(&valid_roadmap_json().to_string())).await;
        let llm = LlmClient::new("key".to_string(), &base);

        let roadmap = generate_roadmap(&llm, Some(&FailingStore), USER, "prompt")
            .await
            .unwrap();
        assert_eq!(roadmap.steps.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_store_is_configuration_error() {
        let (base, _) =
            spawn_gemini(StatusCode::OK, candidate(&valid_roadmap_json().to_string())).await;
        let llm = LlmClient::new("key".to_string(), &base);

        let err = generate_roadmap(&llm, None, USER, "prompt").await.unwrap_err();
        assert!(matches!(err, AppError::StorageNotConfigured));
    }

    #[tokio::test]
    async fn test_non_json_candidate_is_rejected_and_not_persisted() {
        let (base, _) = spawn_gemini(StatusCode::OK, candidate("Here is your roadmap!")).await;
        let llm = LlmClient::new("key".to_string(), &base);
        let store = RecordingStore::default();

        let err = generate_roadmap(&llm, Some(&store), USER, "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRoadmap(_)));
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_rejected() {
        let body = json!({"title": "t", "description": "d", "steps": "not a list", "resources": []});
        let (base, _) = spawn_gemini(StatusCode::OK, candidate(&body.to_string())).await;
        let llm = LlmClient::new("key".to_string(), &base);

        let err = generate_roadmap_content(&llm, "prompt").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse Gemini response: Generated content does not match expected format"
        );
    }

    #[tokio::test]
    async fn test_upstream_error_is_llm_error() {
        let (base, _) = spawn_gemini(
            StatusCode::BAD_REQUEST,
            json!({"error": {"code": 400, "message": "Invalid argument"}}),
        )
        .await;
        let llm = LlmClient::new("key".to_string(), &base);

        let err = generate_roadmap_content(&llm, "prompt").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
