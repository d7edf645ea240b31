//! Metrics helper structs for convenient metric recording

use std::time::Instant;

use prometheus::{Encoder, TextEncoder};

use super::{CATALOG_RESPONSES, RENDER_DURATION, RENDER_TOTAL};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording render metrics
pub struct RenderMetrics;

impl RenderMetrics {
    /// Record one render call on `path` ("language" or "random")
    pub fn record(path: &str, outcome: &str, started: Instant) {
        RENDER_TOTAL.with_label_values(&[path, outcome]).inc();
        RENDER_DURATION
            .with_label_values(&[path])
            .observe(started.elapsed().as_secs_f64());
    }
}

/// Helper struct for recording catalog metrics
pub struct CatalogMetrics;

impl CatalogMetrics {
    /// Record the size of the loaded catalog
    pub fn set_responses(count: usize) {
        CATALOG_RESPONSES.set(count as i64);
    }
}
