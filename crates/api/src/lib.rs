// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Verse API Server Implementation
//!
//! This crate provides the HTTP server for the verse API service, built with Axum.
//! It serves a read-only album catalogue, a small set of seeded scripture verses,
//! and a pass-through lookup against the bible-api.com scripture API.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and HTTP response mapping
//! - [`store`]: Read-only in-memory album and verse stores
//! - [`state`]: Shared application state injected into every handler
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`metrics`]: Prometheus counters and histograms plus the export handler
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints
//!
//! # Routes
//!
//! | Path | Response |
//! |---|---|
//! | `GET /albums` | all albums |
//! | `GET /api/verse` | all verses |
//! | `GET /api/verse/{id}` | one verse, or 404 `{"message":"verse not found"}` |
//! | `GET /api/remoteverse` | `"Done!"` after fetching the configured reference upstream |
//! | `GET /health` | service and upstream health |
//! | `GET /metrics` | Prometheus exposition |

pub mod config;
pub mod docs;
pub mod error;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use shared_types::{Album, Verse};
pub use state::{HealthCheck, ServerState};
pub use store::{AlbumStore, VerseStore};
