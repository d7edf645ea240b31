//! Prometheus metrics for the response generator.
//!
//! - Render metrics (outcome per resolution path, render latency)
//! - Catalog metrics (loaded response count)

mod helpers;

pub use helpers::{encode_metrics, CatalogMetrics, RenderMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, HistogramVec,
    IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "nlg";

lazy_static! {
    /// Render calls by resolution path and outcome
    pub static ref RENDER_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_render_total", METRIC_PREFIX),
        "Total render calls by path and outcome",
        &["path", "outcome"]
    ).unwrap();

    /// Time spent selecting and rendering variants
    pub static ref RENDER_DURATION: HistogramVec = register_histogram_vec!(
        format!("{}_render_duration_seconds", METRIC_PREFIX),
        "Render latency in seconds",
        &["path"],
        vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]
    ).unwrap();

    /// Number of responses in the loaded catalog
    pub static ref CATALOG_RESPONSES: IntGauge = register_int_gauge!(
        format!("{}_catalog_responses", METRIC_PREFIX),
        "Number of responses in the loaded catalog"
    ).unwrap();
}
