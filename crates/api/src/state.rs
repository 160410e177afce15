// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the verse API server:
//! configuration, the read-only record stores, the upstream scripture client
//! and the cancellation token used for coordinated shutdown.

use std::{collections::HashMap, sync::Arc};

use api_client::ApiClient;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use utoipa::ToSchema;

use crate::{
    config::{Environment, ServerConfig},
    store::{AlbumStore, VerseStore},
};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Album catalogue
    albums: Arc<AlbumStore>,
    /// Seeded verses
    verses: Arc<VerseStore>,
    /// Upstream scripture API client
    upstream: Arc<dyn ApiClient>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `albums` - Album store served by `/albums`
    /// * `verses` - Verse store served by `/api/verse`
    /// * `upstream` - Client for the upstream scripture API
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        albums: Arc<AlbumStore>,
        verses: Arc<VerseStore>,
        upstream: Arc<dyn ApiClient>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            albums,
            verses,
            upstream,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Album store
    pub fn albums(&self) -> &AlbumStore {
        &self.albums
    }

    /// Verse store
    pub fn verses(&self) -> &VerseStore {
        &self.verses
    }

    /// Upstream scripture API client
    pub fn upstream(&self) -> &dyn ApiClient {
        self.upstream.as_ref()
    }

    /// Perform health check operations
    ///
    /// An unreachable upstream is reported as `Down` in `api_clients`; the
    /// service itself stays `Up` because the local routes keep working.
    pub async fn health_check(&self) -> HealthCheck {
        let client = self.upstream();
        let upstream = match client.health_check().await {
            Ok(status) => Self::convert_health_status(status),
            Err(e) => {
                warn!(error = %e, "upstream health check failed");
                HealthStatus::Down {
                    reason: e.to_string().into_boxed_str(),
                }
            }
        };

        let mut api_clients = HashMap::new();
        api_clients.insert(client.name().to_string(), upstream);

        HealthCheck {
            status: HealthStatus::Up,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            albums: self.albums.len(),
            verses: self.verses.len(),
            api_clients,
        }
    }

    /// Convert external API health status to internal health status
    fn convert_health_status(external_status: api_client::HealthStatus) -> HealthStatus {
        match external_status {
            api_client::HealthStatus::Up => HealthStatus::Up,
            api_client::HealthStatus::Degraded { reason } => HealthStatus::Degraded {
                reason: reason.into_boxed_str(),
            },
            api_client::HealthStatus::Down { reason } => HealthStatus::Down {
                reason: reason.into_boxed_str(),
            },
        }
    }
}

/// Health status of a service or dependency
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational and responding normally
    Up,

    /// Service is not operational or has critical failures
    Down {
        /// Human-readable explanation of why the service is down
        reason: Box<str>,
    },

    /// Service is operational but experiencing performance issues or partial failures
    Degraded {
        /// Human-readable explanation of the degradation condition
        reason: Box<str>,
    },
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Number of albums served
    pub albums: usize,
    /// Number of verses served
    pub verses: usize,
    /// Status of upstream API clients
    #[schema(value_type = Object)]
    pub api_clients: HashMap<String, HealthStatus>,
}

#[cfg(test)]
mod tests {
    use api_client::ApiError;
    use async_trait::async_trait;
    use external_apis::{BibleApiClient, BibleApiConfig};
    use shared_types::{RemoteVerse, VerseReference};

    use super::*;

    #[derive(Debug)]
    struct UnreachableUpstream;

    #[async_trait]
    impl ApiClient for UnreachableUpstream {
        async fn health_check(&self) -> Result<api_client::HealthStatus, ApiError> {
            Err(ApiError::Timeout { timeout_seconds: 5 })
        }

        async fn fetch_reference(&self, _: &VerseReference) -> Result<RemoteVerse, ApiError> {
            Err(ApiError::Timeout { timeout_seconds: 5 })
        }

        fn name(&self) -> &'static str {
            "unreachable"
        }
    }

    fn state_with(upstream: Arc<dyn ApiClient>, token: CancellationToken) -> ServerState {
        ServerState::new(
            ServerConfig::for_testing(),
            Arc::new(AlbumStore::seeded()),
            Arc::new(VerseStore::seeded()),
            upstream,
            token,
        )
    }

    fn test_state(token: CancellationToken) -> ServerState {
        let client = BibleApiClient::new(BibleApiConfig::default()).unwrap();
        state_with(Arc::new(client), token)
    }

    #[test]
    fn server_state_creation() {
        let state = test_state(CancellationToken::new());

        assert!(!state.cancellation_token.is_cancelled());
        assert_eq!(state.albums().len(), 3);
        assert_eq!(state.verses().len(), 2);
        assert_eq!(state.upstream().name(), "bible-api");
    }

    #[test]
    fn server_state_with_cancellation_token() {
        let token = CancellationToken::new();
        let state = test_state(token.clone());

        assert!(!state.cancellation_token.is_cancelled());

        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[test]
    fn clones_share_stores() {
        let state = test_state(CancellationToken::new());
        let clone = state.clone();

        assert_eq!(state.verses().list(), clone.verses().list());
    }

    #[tokio::test]
    async fn unreachable_upstream_is_reported_down() {
        let state = state_with(Arc::new(UnreachableUpstream), CancellationToken::new());

        let health = state.health_check().await;

        assert_eq!(health.status, HealthStatus::Up);
        assert_eq!(health.albums, 3);
        assert_eq!(
            health.api_clients.get("unreachable"),
            Some(&HealthStatus::Down {
                reason: Box::from("Request timeout after 5 seconds"),
            })
        );
    }
}
