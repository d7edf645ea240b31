use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::{api_key_auth, AppState};

use super::health::health;
use super::metrics::prometheus_metrics;
use super::nlg::{generate_random_response, generate_response};
use super::template::{get_template, list_templates};

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Generation and catalog endpoints
        .nest(
            "/api/v1",
            Router::new()
                .route("/nlg", post(generate_response))
                .route("/nlg/random", post(generate_random_response))
                .route("/templates", get(list_templates))
                .route("/templates/{id}", get(get_template))
                .route_layer(middleware::from_fn_with_state(state, api_key_auth)),
        )
}
