// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Generation requests by outcome
    pub static ref GENERATION_REQUESTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("generation_requests_total", "Total /generate requests"),
        &["outcome"], // success, invalid_input, client_unavailable, generation_failed, internal_error
        REGISTRY
    ).unwrap();

    /// Total calls made to the vision model
    pub static ref VISION_API_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("vision_api_calls_total", "Total vision model API calls"),
        &["model", "status_code"],
        REGISTRY
    ).unwrap();

    /// Vision model call duration
    pub static ref VISION_API_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("vision_api_duration_seconds", "Vision model API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
        REGISTRY
    ).unwrap();
}

/// Render every registered metric in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
