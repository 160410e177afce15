// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the verse API server.

pub mod handlers;

use axum::{Router, routing::get};
use handlers::{
    get_verse_handler, health_handler, list_albums_handler, list_verses_handler,
    remote_verse_handler,
};

use crate::{
    metrics::metrics_handler,
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    let ops_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    let record_routes = Router::new()
        .route("/albums", get(list_albums_handler))
        .route("/api/verse", get(list_verses_handler))
        .route("/api/verse/{id}", get(get_verse_handler))
        .route("/api/remoteverse", get(remote_verse_handler));

    Router::new()
        .merge(ops_routes)
        .merge(docs_routes)
        .merge(record_routes)
}
