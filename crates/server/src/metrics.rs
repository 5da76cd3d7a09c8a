use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static REGISTRATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "storefront_registrations_total",
        "Total successful user registrations"
    )
    .expect("register registrations_total")
});

pub static LOGINS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "storefront_logins_total",
        "Login attempts by outcome",
        &["outcome"]
    )
    .expect("register logins_total")
});

pub static UPLOADS_STORED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "storefront_uploads_stored_total",
        "Total product images stored"
    )
    .expect("register uploads_stored_total")
});

pub static UPLOADS_REMOVED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "storefront_uploads_removed_total",
        "Total product images removed after replace or delete"
    )
    .expect("register uploads_removed_total")
});

pub fn record_login(success: bool) {
    LOGINS_TOTAL.with_label_values(&[if success { "success" } else { "failure" }]).inc();
}

/// Force registration so the families show up before their first increment.
pub fn init() {
    Lazy::force(&REGISTRATIONS_TOTAL);
    Lazy::force(&LOGINS_TOTAL);
    Lazy::force(&UPLOADS_STORED_TOTAL);
    Lazy::force(&UPLOADS_REMOVED_TOTAL);
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

pub async fn metrics_handler() -> impl IntoResponse {
    let (status, body) = encode_metrics();
    (status, [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body)
}
