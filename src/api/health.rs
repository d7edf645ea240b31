//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub catalog: CatalogHealthResponse,
}

#[derive(Debug, Serialize)]
pub struct CatalogHealthResponse {
    pub responses: usize,
    pub unresolved_policy: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.generator.catalog();
    let policy = format!("{:?}", state.generator.unresolved_policy()).to_lowercase();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        catalog: CatalogHealthResponse {
            responses: catalog.len(),
            unresolved_policy: policy,
        },
    })
}
