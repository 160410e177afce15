// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides HTTP request handlers for the verse API server: the
//! health check, the album and verse listings, verse lookup by id and the
//! remote verse fetch.

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared_types::{Album, Verse};
use tracing::{debug, error, info};
use utoipa::ToSchema;

use crate::{
    error::ServerError,
    metrics,
    state::{HealthCheck, ServerState},
};

/// Acknowledgement returned by the remote verse endpoint
pub const REMOTE_VERSE_ACK: &str = "Done!";

/// Error body returned when a verse id is unknown
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotFoundBody {
    /// Always `verse not found`
    #[schema(example = "verse not found")]
    pub message: String,
}

/// Error body returned for upstream failures
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Error description
    pub error: String,
    /// HTTP status code
    #[schema(example = 502)]
    pub status: u16,
}

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the service including version, environment, store sizes and the status of the upstream scripture API.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> Json<HealthCheck> {
    Json(state.health_check().await)
}

/// List all albums
#[utoipa::path(
    get,
    path = "/albums",
    tag = "albums",
    summary = "List albums",
    responses(
        (status = 200, description = "All albums in catalogue order", body = [Album])
    )
)]
pub async fn list_albums_handler(State(state): State<ServerState>) -> Json<Vec<Album>> {
    metrics::inc_requests("/albums");
    Json(state.albums().list().to_vec())
}

/// List all verses
#[utoipa::path(
    get,
    path = "/api/verse",
    tag = "verses",
    summary = "List verses",
    responses(
        (status = 200, description = "All seeded verses", body = [Verse])
    )
)]
pub async fn list_verses_handler(State(state): State<ServerState>) -> Json<Vec<Verse>> {
    metrics::inc_requests("/api/verse");
    debug!(count = state.verses().len(), "listing verses");
    Json(state.verses().list().to_vec())
}

/// Look up a verse by id
///
/// # Errors
///
/// Returns `ServerError::VerseNotFound` when no verse carries `id`.
#[utoipa::path(
    get,
    path = "/api/verse/{id}",
    tag = "verses",
    summary = "Get verse by id",
    params(
        ("id" = String, Path, description = "Verse identifier, exact and case-sensitive")
    ),
    responses(
        (status = 200, description = "Verse found", body = Verse),
        (status = 404, description = "No verse with this id", body = NotFoundBody)
    )
)]
pub async fn get_verse_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Verse>, ServerError> {
    metrics::inc_requests("/api/verse/{id}");

    let verse = state.verses().find_by_id(&id).cloned();
    metrics::record_verse_lookup(verse.is_some());

    match verse {
        Some(verse) => Ok(Json(verse)),
        None => {
            debug!(%id, "verse not found");
            Err(ServerError::VerseNotFound { id })
        }
    }
}

/// Fetch the configured reference from the upstream scripture API
///
/// The decoded passage is logged and discarded; callers receive a fixed
/// acknowledgement. The reference comes from configuration, not the request.
///
/// # Errors
///
/// Returns `ServerError::Upstream` if the upstream call fails, times out or
/// returns a body that does not decode.
#[utoipa::path(
    get,
    path = "/api/remoteverse",
    tag = "verses",
    summary = "Fetch remote verse",
    description = "Fetches the configured scripture reference from bible-api.com and acknowledges with \"Done!\".",
    responses(
        (status = 200, description = "Upstream payload fetched and decoded", body = String, example = json!("Done!")),
        (status = 502, description = "Upstream failed or returned an undecodable payload", body = ErrorBody),
        (status = 504, description = "Upstream did not answer in time", body = ErrorBody)
    )
)]
pub async fn remote_verse_handler(
    State(state): State<ServerState>,
) -> Result<Json<&'static str>, ServerError> {
    metrics::inc_requests("/api/remoteverse");

    let client = state.upstream();
    let reference = &state.config().bible_api.reference;

    let start_time = Instant::now();
    let result = client.fetch_reference(reference).await;
    let elapsed = start_time.elapsed().as_secs_f64();

    match result {
        Ok(payload) => {
            metrics::observe_upstream_duration(client.name(), "success", elapsed);
            info!(reference = %payload.reference, verses = payload.verses.len(), "remote verse received");
            Ok(Json(REMOTE_VERSE_ACK))
        }
        Err(e) => {
            metrics::observe_upstream_duration(client.name(), "error", elapsed);
            error!(%reference, error = %e, "remote verse fetch failed");
            Err(e.into())
        }
    }
}
