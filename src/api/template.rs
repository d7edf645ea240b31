//! Read-only catalog inspection endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::template::ResponseEntry;

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: String,
    /// Addressing scheme: "channel" or "language"
    pub scheme: &'static str,
    pub variants: usize,
}

/// Response for listing templates
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateSummary>,
    pub total: usize,
}

/// GET /api/v1/templates - List all responses in the catalog
#[tracing::instrument(name = "http.list_templates", skip(state))]
pub async fn list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    let catalog = state.generator.catalog();

    let templates: Vec<TemplateSummary> = catalog
        .ids()
        .into_iter()
        .filter_map(|id| {
            catalog.get(id).map(|entry| TemplateSummary {
                id: id.to_string(),
                scheme: entry.scheme(),
                variants: entry.variant_count(),
            })
        })
        .collect();
    let total = templates.len();

    Json(TemplateListResponse { templates, total })
}

/// GET /api/v1/templates/{id} - Get the raw definition of a response
#[tracing::instrument(name = "http.get_template", skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResponseEntry>> {
    state
        .generator
        .catalog()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Response '{}'", id)))
}
