// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{gather_metrics, GENERATION_REQUESTS, VISION_API_CALLS, VISION_API_DURATION};

/// Helper to record the outcome of one /generate request
pub fn record_generation(outcome: &str) {
    GENERATION_REQUESTS.with_label_values(&[outcome]).inc();
}

/// Helper to record a vision model call.
///
/// Transport failures have no HTTP status and are recorded with status code 0.
pub fn record_vision_call(model: &str, status_code: u16, duration_secs: f64) {
    VISION_API_CALLS
        .with_label_values(&[model, &status_code.to_string()])
        .inc();

    VISION_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}
