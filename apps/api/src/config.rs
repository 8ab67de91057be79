use anyhow::{Context, Result};

const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

/// Application configuration loaded from environment variables.
///
/// Secrets are optional at startup: a missing Gemini key or storage config is
/// reported per request (503 / 500) rather than refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base_url: String,
    pub storage: Option<StorageConfig>,
    pub port: u16,
    pub rust_log: String,
}

/// Where generated roadmaps are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Direct Postgres connection (`DATABASE_URL`).
    Postgres { database_url: String },
    /// PostgREST endpoint of the managed backend (`SUPABASE_URL` + service role key).
    Rest { url: String, service_role_key: String },
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_base_url: optional_env("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE_URL.to_string()),
            storage: storage_from(optional_env),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn storage_from(lookup: impl Fn(&str) -> Option<String>) -> Option<StorageConfig> {
    if let Some(database_url) = lookup("DATABASE_URL") {
        return Some(StorageConfig::Postgres { database_url });
    }
    match (lookup("SUPABASE_URL"), lookup("SUPABASE_SERVICE_ROLE_KEY")) {
        (Some(url), Some(service_role_key)) => Some(StorageConfig::Rest {
            url,
            service_role_key,
        }),
        _ => None,
    }
}

/// Reads `key`, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
