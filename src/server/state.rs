use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::metrics::CatalogMetrics;
use crate::nlg::{SeededChooser, TemplatedGenerator};
use crate::template::TemplateCatalog;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub generator: Arc<TemplatedGenerator>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings, catalog: TemplateCatalog) -> Self {
        CatalogMetrics::set_responses(catalog.len());

        let mut generator = TemplatedGenerator::new(catalog.into_shared())
            .with_unresolved_policy(settings.generator.unresolved_policy);

        if let Some(seed) = settings.generator.seed {
            generator = generator.with_chooser(Arc::new(SeededChooser::new(seed)));
        }

        Self {
            settings: Arc::new(settings),
            generator: Arc::new(generator),
            started_at: Instant::now(),
        }
    }
}
