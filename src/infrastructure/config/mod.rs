mod catalog;
mod settings;

pub use catalog::load_catalog;
pub use settings::{
    ApiConfig, CatalogConfig, GeneratorConfig, ServerConfig, Settings, TelemetryConfig,
};
