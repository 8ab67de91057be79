//! Roadmap generation call against the hosted endpoint.

use reqwest::Client;
use serde_json::{json, Value};
use shared::{Resource, RoadmapSuggestion};
use tracing::{debug, error};

use crate::error::ClientError;
use crate::intake::IntakeAnswers;
use crate::session::SessionStore;

pub const GENERATE_ROADMAP_PATH: &str = "/functions/v1/generate-roadmap";

/// Builds the natural-language prompt. Answers are embedded verbatim.
pub fn build_prompt(answers: &IntakeAnswers) -> String {
    format!(
        "Create a personalized learning roadmap based on the following information:\n\
         - Goals: {}\n\
         - Background: {}\n\
         - Current Skills: {}\n\
         - Weekly Time Commitment: {}\n\
         \n\
         Provide specific steps and resources that align with the user's background and time availability.\n\
         Focus on actionable steps and high-quality learning resources.",
        answers.goals, answers.background, answers.skills, answers.time
    )
}

/// Shown in place of a generated roadmap whenever generation fails.
pub fn fallback_roadmap() -> RoadmapSuggestion {
    RoadmapSuggestion {
        title: "Personalized Learning Path".to_string(),
        description: "Based on your profile, here's a suggested learning path.".to_string(),
        steps: vec![
            "Research fundamental concepts in your area of interest".to_string(),
            "Start with beginner-friendly tutorials and courses".to_string(),
            "Practice with hands-on projects".to_string(),
            "Join relevant communities and forums".to_string(),
        ],
        resources: vec![
            Resource {
                name: "Online Learning Platforms".to_string(),
                resource_type: "platform".to_string(),
                url: Some("https://www.coursera.org".to_string()),
            },
            Resource {
                name: "Documentation and Tutorials".to_string(),
                resource_type: "documentation".to_string(),
                url: None,
            },
            Resource {
                name: "Community Forums".to_string(),
                resource_type: "community".to_string(),
                url: None,
            },
        ],
    }
}

#[derive(Clone)]
pub struct RoadmapClient {
    http: Client,
    endpoint: String,
    anon_key: String,
    sessions: SessionStore,
}

impl RoadmapClient {
    pub fn new(base_url: &str, anon_key: String, sessions: SessionStore) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!("{}{GENERATE_ROADMAP_PATH}", base_url.trim_end_matches('/')),
            anon_key,
            sessions,
        }
    }

    /// Generates a roadmap, never failing: any error is logged and the
    /// fallback roadmap is returned as if it were generated content.
    pub async fn generate(&self, answers: &IntakeAnswers) -> RoadmapSuggestion {
        match self.try_generate(answers).await {
            Ok(roadmap) => roadmap,
            Err(e) => {
                error!("Error generating roadmap: {e}");
                fallback_roadmap()
            }
        }
    }

    /// Same call as [`RoadmapClient::generate`] but surfaces the failure.
    pub async fn try_generate(
        &self,
        answers: &IntakeAnswers,
    ) -> Result<RoadmapSuggestion, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.anon_key)
            .header("x-user-id", self.sessions.user_id())
            .json(&json!({ "prompt": build_prompt(answers) }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            return Err(ClientError::Status(message));
        }

        let body: Value = response.json().await?;
        debug!("Roadmap data from API: {body}");
        Ok(RoadmapSuggestion::from_value(body)?)
    }
}
