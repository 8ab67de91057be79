pub mod health;

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::roadmap::handlers;
use crate::state::AppState;

const ALLOW_ORIGIN: &str = "*";
const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type, x-user-id";
const ALLOW_METHODS: &str = "POST, OPTIONS";

/// Builds the service router. Every response, errors and preflight included,
/// carries the CORS headers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/functions/v1/generate-roadmap",
            post(handlers::handle_generate_roadmap).options(handlers::handle_preflight),
        )
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
}
