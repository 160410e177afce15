// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};

use crate::error::ServerError;

/// Total number of API requests received, labeled by route.
pub static REQUESTS_BY_ROUTE: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "verse_api_requests_total",
        "Total number of API requests, labeled by route",
        &["route"]
    )
    .expect("Failed to create verse_api_requests_total counter vec")
});

/// Verse lookups by id, labeled by outcome.
pub static VERSE_LOOKUPS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "verse_api_verse_lookups_total",
        "Total number of verse lookups by id, labeled by result",
        &["result"]
    )
    .expect("Failed to create verse_api_verse_lookups_total counter vec")
});

/// Histogram for upstream scripture API request durations in seconds.
pub static UPSTREAM_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "verse_api_upstream_request_duration",
        "Upstream scripture API request durations in seconds",
        &["api_name", "result"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create upstream request duration histogram")
});

/// Increment the requests counter for `route`
pub fn inc_requests(route: &str) {
    REQUESTS_BY_ROUTE.with_label_values(&[route]).inc();
}

/// Record the outcome of a verse lookup
pub fn record_verse_lookup(found: bool) {
    let result = if found { "found" } else { "not_found" };
    VERSE_LOOKUPS.with_label_values(&[result]).inc();
}

/// Observe the duration of an upstream request
///
/// # Arguments
/// * `api_name` - The name of the upstream API
/// * `result` - `success` or `error`
/// * `duration_secs` - The duration of the request in seconds
pub fn observe_upstream_duration(api_name: &str, result: &str, duration_secs: f64) {
    UPSTREAM_REQUEST_DURATION
        .with_label_values(&[api_name, result])
        .observe(duration_secs);
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Result<Response, ServerError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ServerError::Runtime {
            message: format!("failed to encode metrics: {e}"),
        })?;

    let body = String::from_utf8(buffer).map_err(|e| ServerError::Runtime {
        message: format!("metrics buffer is not valid UTF-8: {e}"),
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        body,
    )
        .into_response())
}
