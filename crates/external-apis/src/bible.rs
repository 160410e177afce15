// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! bible-api.com integration
//!
//! This module provides an implementation of the `ApiClient` trait for the public
//! bible-api.com service, which resolves a human-readable reference such as
//! `John 3:16` into the passage text and its per-verse breakdown.

use std::time::{Duration, Instant};

use api_client::{ApiClient, ApiError, HealthStatus};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared_types::{RemoteVerse, VerseReference};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use url::Url;

/// Public bible-api.com endpoint
pub const DEFAULT_BIBLE_API_URL: &str = "https://bible-api.com";

/// Configuration for the bible-api.com client
#[derive(Debug, Clone)]
pub struct BibleApiConfig {
    /// Base URL of the scripture API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Health check timeout in seconds
    pub health_check_timeout_seconds: u64,
}

impl Default for BibleApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BIBLE_API_URL.to_string(),
            timeout_seconds: 30,
            health_check_timeout_seconds: 5,
        }
    }
}

/// bible-api.com client implementation
#[derive(Debug)]
pub struct BibleApiClient {
    client: Client,
    base_url: Url,
    config: BibleApiConfig,
}

/// Errors specific to the bible-api.com client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum BibleApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Reference unknown to the upstream
    #[error("Reference not found: {reference}")]
    NotFound { reference: String },

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },
}

impl BibleApiError {
    /// Classify a reqwest failure, keeping its own deadline errors as timeouts
    fn from_transport(error: reqwest::Error, seconds: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout { seconds }
        } else {
            Self::Http(error)
        }
    }
}

impl From<BibleApiError> for ApiError {
    fn from(value: BibleApiError) -> Self {
        match value {
            BibleApiError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            BibleApiError::Json(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            BibleApiError::NotFound { reference } => ApiError::NotFound { reference },
            BibleApiError::ApiError { status, message } => {
                ApiError::UpstreamStatus { status, message }
            }
            BibleApiError::RateLimited => ApiError::RateLimitExceeded {
                retry_after_seconds: 30,
            },
            BibleApiError::Config(message) => ApiError::Configuration { message },
            BibleApiError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

impl BibleApiClient {
    /// Create a new bible-api.com client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be created
    pub fn new(config: BibleApiConfig) -> Result<Self, BibleApiError> {
        if config.base_url.trim().is_empty() {
            return Err(BibleApiError::Config("Base URL cannot be empty".to_string()));
        }

        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| BibleApiError::Config(format!("Invalid base URL: {e}")))?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(BibleApiError::Config(format!(
                "Base URL must be an http(s) URL: {base_url}"
            )));
        }

        // Deadlines are applied per call so request and health timeouts can differ
        let client = Client::builder()
            .user_agent(concat!("verse-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BibleApiError::Http)?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Build the lookup URL for a reference
    ///
    /// The reference is appended as a single percent-encoded path segment, so
    /// `John 3:16` becomes `/John%203:16`.
    pub fn reference_url(&self, reference: &VerseReference) -> Result<Url, BibleApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                BibleApiError::Config(format!("Cannot extend base URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(reference.as_str());
        Ok(url)
    }

    /// Look up a passage on bible-api.com
    ///
    /// The deadline covers the whole exchange, from connecting until the last
    /// body byte has been read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, the upstream answers
    /// with a non-success status, or the body cannot be parsed
    pub async fn get_reference(
        &self,
        reference: &VerseReference,
    ) -> Result<RemoteVerse, BibleApiError> {
        let seconds = self.config.timeout_seconds;
        timeout(Duration::from_secs(seconds), self.exchange(reference))
            .await
            .map_err(|_| BibleApiError::Timeout { seconds })?
    }

    async fn exchange(&self, reference: &VerseReference) -> Result<RemoteVerse, BibleApiError> {
        let seconds = self.config.timeout_seconds;
        let url = self.reference_url(reference)?;

        debug!(%url, %reference, "fetching reference from bible-api");

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| BibleApiError::from_transport(e, seconds))?;

        match response.status() {
            status if status.is_success() => {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| BibleApiError::from_transport(e, seconds))?;
                let payload: RemoteVerse = serde_json::from_slice(&body)?;
                Ok(payload)
            }
            StatusCode::NOT_FOUND => {
                debug!("Reference not found on bible-api: {}", reference);
                Err(BibleApiError::NotFound {
                    reference: reference.to_string(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(BibleApiError::RateLimited),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!("bible-api error: {} - {}", status.as_u16(), error_text);
                Err(BibleApiError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }
}

#[async_trait]
impl ApiClient for BibleApiClient {
    async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = self.base_url.clone();

        debug!(%url, "performing health check on bible-api");

        let seconds = self.config.health_check_timeout_seconds;
        let start_time = Instant::now();
        let response = timeout(Duration::from_secs(seconds), self.client.get(url).send())
            .await
            .map_err(|_| BibleApiError::Timeout { seconds })?
            .map_err(|e| BibleApiError::from_transport(e, seconds))?;

        let response_time = start_time.elapsed();

        match response.status() {
            status if status.is_success() => {
                info!("bible-api health check passed in {:?}", response_time);
                Ok(HealthStatus::Up)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("bible-api health check failed: rate limited");
                Ok(HealthStatus::Degraded {
                    reason: "Rate limited".to_string(),
                })
            }
            status => {
                warn!("bible-api health check failed with status: {}", status);
                Ok(HealthStatus::Degraded {
                    reason: format!("API returned status {}", status.as_u16()),
                })
            }
        }
    }

    async fn fetch_reference(&self, reference: &VerseReference) -> Result<RemoteVerse, ApiError> {
        let payload = self.get_reference(reference).await.map_err(|e| {
            error!("Failed to fetch reference {} from bible-api: {}", reference, e);
            e
        })?;

        debug!(reference = %payload.reference, "fetched remote verse");
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "bible-api"
    }
}
