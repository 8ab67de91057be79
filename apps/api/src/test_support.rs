//! Stubs shared by the unit tests: an in-process Gemini server and in-memory stores.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::models::roadmap::NewRoadmapRecord;
use crate::roadmap::store::RoadmapStore;

pub fn valid_roadmap_json() -> Value {
    json!({
        "title": "Becoming a Web Developer",
        "description": "Twelve weeks from fundamentals to a deployed project",
        "steps": ["Learn HTML and CSS", "Learn JavaScript", "Build and deploy a portfolio"],
        "resources": [
            {"name": "MDN Web Docs", "type": "documentation", "url": "https://developer.mozilla.org"},
            {"name": "Local coding meetup", "type": "community"}
        ]
    })
}

/// A Gemini response whose first candidate carries `text`.
pub fn candidate(text: &str) -> Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
}

/// Requests the stub Gemini server has received, as JSON bodies.
pub type GeminiRequests = Arc<Mutex<Vec<Value>>>;

/// Starts a fake `generateContent` endpoint answering every call with
/// `status` and `body`. Returns its base URL and the captured requests.
pub async fn spawn_gemini(status: StatusCode, body: Value) -> (String, GeminiRequests) {
    let requests: GeminiRequests = Arc::default();
    let app = Router::new()
        .route(
            "/models/gemini-pro:generateContent",
            post(
                move |State(requests): State<GeminiRequests>, Json(request): Json<Value>| async move {
                    requests.lock().unwrap().push(request);
                    (status, Json(body))
                },
            ),
        )
        .with_state(requests.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), requests)
}

#[derive(Default)]
pub struct RecordingStore {
    pub records: Mutex<Vec<NewRoadmapRecord>>,
}

#[async_trait]
impl RoadmapStore for RecordingStore {
    async fn insert_roadmap(&self, record: &NewRoadmapRecord) -> Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub struct FailingStore;

#[async_trait]
impl RoadmapStore for FailingStore {
    async fn insert_roadmap(&self, _record: &NewRoadmapRecord) -> Result<()> {
        bail!("relation \"roadmaps\" does not exist")
    }
}
