mod config;
mod errors;
mod llm_client;
mod models;
mod roadmap;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageConfig};
use crate::llm_client::LlmClient;
use crate::roadmap::store::{PgRoadmapStore, RestRoadmapStore, RoadmapStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Roadmap API v{}", env!("CARGO_PKG_VERSION"));

    let llm = match &config.gemini_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(LlmClient::new(key.clone(), &config.gemini_api_base_url))
        }
        None => {
            warn!("GEMINI_API_KEY is not set; generation requests will return 503");
            None
        }
    };

    let store = build_store(config.storage.as_ref()).await?;

    let state = AppState { llm, store };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the persistence backend. Postgres wins when both are configured.
async fn build_store(storage: Option<&StorageConfig>) -> Result<Option<Arc<dyn RoadmapStore>>> {
    let store: Arc<dyn RoadmapStore> = match storage {
        Some(StorageConfig::Postgres { database_url }) => {
            Arc::new(PgRoadmapStore::connect(database_url).await?)
        }
        Some(StorageConfig::Rest {
            url,
            service_role_key,
        }) => {
            info!("Persisting roadmaps through PostgREST at {url}");
            Arc::new(RestRoadmapStore::new(url, service_role_key.clone()))
        }
        None => {
            warn!("No storage configured; generation requests will return 500");
            return Ok(None);
        }
    };
    Ok(Some(store))
}
