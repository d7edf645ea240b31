//! API layer - HTTP endpoint handlers organized by domain.

mod health;
mod metrics;
mod nlg;
mod routes;
mod template;

pub use health::{health, CatalogHealthResponse, HealthResponse};
pub use metrics::prometheus_metrics;
pub use nlg::{
    generate_random_response, generate_response, ChannelInfo, NlgRequest, NlgResponse,
    RandomNlgResponse,
};
pub use routes::api_routes;
pub use template::{get_template, list_templates, TemplateListResponse, TemplateSummary};
