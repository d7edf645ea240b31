//! Response generation endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::nlg::{NaturalLanguageGenerator, TrackerState, VariableSource};
use crate::server::AppState;
use crate::template::{Variables, Variant};

/// Output channel the response will be delivered through
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub name: String,
}

/// Body of a response generation request
#[derive(Debug, Deserialize)]
pub struct NlgRequest {
    /// Response id to render
    #[serde(alias = "response")]
    pub template: String,

    /// Call-time overrides; `language` selects language-keyed variants
    #[serde(default)]
    pub arguments: Variables,

    /// Tracker state supplying slot values
    #[serde(default)]
    pub tracker: TrackerState,

    #[serde(default)]
    pub channel: ChannelInfo,
}

#[derive(Debug, Serialize)]
pub struct NlgResponse {
    pub responses: Vec<Variant>,
}

#[derive(Debug, Serialize)]
pub struct RandomNlgResponse {
    pub response: Option<Variant>,
}

/// POST /api/v1/nlg - Render every variant for the requested language
#[tracing::instrument(
    name = "http.nlg",
    skip(state, request),
    fields(
        request_id = %Uuid::new_v4(),
        template = %request.template,
        channel = %request.channel.name
    )
)]
pub async fn generate_response(
    State(state): State<AppState>,
    Json(request): Json<NlgRequest>,
) -> Result<Json<NlgResponse>> {
    let responses = state
        .generator
        .generate(
            &request.template,
            &request.tracker,
            &request.channel.name,
            &request.arguments,
        )
        .await?
        .unwrap_or_default();

    Ok(Json(NlgResponse { responses }))
}

/// POST /api/v1/nlg/random - Render one variant chosen for the channel
#[tracing::instrument(
    name = "http.nlg_random",
    skip(state, request),
    fields(
        request_id = %Uuid::new_v4(),
        template = %request.template,
        channel = %request.channel.name
    )
)]
pub async fn generate_random_response(
    State(state): State<AppState>,
    Json(request): Json<NlgRequest>,
) -> Result<Json<RandomNlgResponse>> {
    let response = state.generator.resolve_by_slots(
        &request.template,
        &request.tracker.current_values(),
        &request.channel.name,
        &request.arguments,
    )?;

    Ok(Json(RandomNlgResponse { response }))
}
