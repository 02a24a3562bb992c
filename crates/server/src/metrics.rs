use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static QUESTIONS_LISTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "trivia_questions_listed_total",
        "Total questions returned by list requests"
    )
    .expect("register questions_listed_total")
});

pub static QUESTIONS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "trivia_questions_created_total",
        "Total questions created"
    )
    .expect("register questions_created_total")
});

pub static QUESTIONS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "trivia_questions_deleted_total",
        "Total questions deleted"
    )
    .expect("register questions_deleted_total")
});

pub static VALIDATION_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "trivia_validation_failures_total",
        "Total requests rejected by input validation"
    )
    .expect("register validation_failures_total")
});

/// Touch every counter so they are exported before their first increment.
pub fn init() {
    Lazy::force(&QUESTIONS_LISTED_TOTAL);
    Lazy::force(&QUESTIONS_CREATED_TOTAL);
    Lazy::force(&QUESTIONS_DELETED_TOTAL);
    Lazy::force(&VALIDATION_FAILURES_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
