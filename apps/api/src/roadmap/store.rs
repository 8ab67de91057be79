//! Persistence collaborator for generated roadmaps.
//!
//! Insert-only. Two backends: a direct Postgres pool, or the managed
//! backend's PostgREST endpoint. `AppState` holds an `Arc<dyn RoadmapStore>`.

use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::Client;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::models::roadmap::NewRoadmapRecord;

#[async_trait]
pub trait RoadmapStore: Send + Sync {
    async fn insert_roadmap(&self, record: &NewRoadmapRecord) -> Result<()>;
}

pub struct PgRoadmapStore {
    pool: PgPool,
}

impl PgRoadmapStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl RoadmapStore for PgRoadmapStore {
    async fn insert_roadmap(&self, record: &NewRoadmapRecord) -> Result<()> {
        sqlx::query("INSERT INTO roadmaps (prompt, content, user_id) VALUES ($1, $2, $3::uuid)")
            .bind(&record.prompt)
            .bind(&record.content)
            .bind(&record.user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Inserts through PostgREST (`/rest/v1/roadmaps`) using the service role key.
pub struct RestRoadmapStore {
    client: Client,
    endpoint: String,
    service_role_key: String,
}

impl RestRoadmapStore {
    pub fn new(base_url: &str, service_role_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/rest/v1/roadmaps", base_url.trim_end_matches('/')),
            service_role_key,
        }
    }
}

#[async_trait]
impl RoadmapStore for RestRoadmapStore {
    async fn insert_roadmap(&self, record: &NewRoadmapRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("roadmap insert rejected with {status}: {body}");
        }
        Ok(())
    }
}
