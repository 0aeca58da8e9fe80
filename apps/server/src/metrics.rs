//! Prometheus metrics for the registry server.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

lazy_static! {
    // HTTP

    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "halo_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "halo_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    // Search

    /// Composed search queries by entity (`user`, `patient`, `record`)
    pub static ref SEARCH_TOTAL: IntCounterVec = register_int_counter_vec!(
        "halo_search_total",
        "Total number of search queries executed",
        &["entity"]
    )
    .expect("Failed to register SEARCH_TOTAL");

    pub static ref SEARCH_RESULTS: HistogramVec = register_histogram_vec!(
        "halo_search_results",
        "Rows returned per search query",
        &["entity"],
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]
    )
    .expect("Failed to register SEARCH_RESULTS");

    // Identifiers

    /// Rejected identifiers by reason (`invalid_format`, `out_of_range`, `unknown_role`)
    pub static ref IDENTIFIER_REJECTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "halo_identifier_rejections_total",
        "Total number of rejected staff or patient identifiers",
        &["reason"]
    )
    .expect("Failed to register IDENTIFIER_REJECTIONS_TOTAL");
}

/// Count a rejected identifier and hand the error back.
pub fn identifier_rejected(err: halo_identifiers::Error) -> halo_identifiers::Error {
    IDENTIFIER_REJECTIONS_TOTAL
        .with_label_values(&[err.reason()])
        .inc();
    err
}

pub fn record_search(entity: &str, rows: usize) {
    SEARCH_TOTAL.with_label_values(&[entity]).inc();
    SEARCH_RESULTS
        .with_label_values(&[entity])
        .observe(rows as f64);
}

/// Replace id-like segments so path labels stay low-cardinality.
pub fn sanitize_path(path: &str) -> String {
    if path == "/" {
        return path.to_string();
    }
    path.split('/')
        .map(|segment| if is_id_segment(segment) { "{id}" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_id_segment(segment: &str) -> bool {
    !segment.is_empty()
        && (uuid::Uuid::parse_str(segment).is_ok()
            || segment.bytes().all(|b| b.is_ascii_digit()))
}
