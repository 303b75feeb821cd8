use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

lazy_static! {
    pub static ref ANALYTICS_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "analytics_requests_total",
        "Total number of diagram analytics requests",
        &["status"]
    )
    .unwrap();

    pub static ref ANALYTICS_REQUEST_DURATION_SECONDS: Histogram = register_histogram!(
        "analytics_request_duration_seconds",
        "Diagram analytics request duration in seconds (fetch + compute)",
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    pub static ref ANALYTICS_DATASET_SESSIONS: Histogram = register_histogram!(
        "analytics_dataset_sessions",
        "Number of sessions materialized per analytics request",
        vec![1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0]
    )
    .unwrap();
}

pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
