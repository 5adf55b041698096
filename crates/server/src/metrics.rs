use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bikekade_http_requests_total",
        "Total HTTP requests by method and status",
        &["method", "status"]
    )
    .expect("register http_requests_total")
});

pub static HTTP_REQUEST_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "bikekade_http_request_duration_seconds",
        "Request duration in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register http_request_duration")
});

pub static LOGIN_ATTEMPTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "bikekade_login_attempts_total",
        "Login attempts by outcome",
        &["outcome"]
    )
    .expect("register login_attempts_total")
});

pub fn record_login(outcome: &str) {
    LOGIN_ATTEMPTS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Middleware counting every request and timing it.
pub async fn track_http(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let start = Instant::now();
    let res = next.run(req).await;
    HTTP_REQUESTS_TOTAL.with_label_values(&[method.as_str(), res.status().as_str()]).inc();
    HTTP_REQUEST_DURATION.observe(start.elapsed().as_secs_f64());
    res
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
