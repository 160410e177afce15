// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic API client traits for upstream scripture providers
//!
//! This crate provides the common abstraction the server uses to talk to a
//! third-party scripture API without depending on a concrete HTTP client.
//!
//! # Core Abstractions
//!
//! - **`ApiClient` Trait**: reference lookup and health probing, async and
//!   object safe so the server can hold any client as `Arc<dyn ApiClient>`
//! - **Health Check System**: `Up`, `Degraded` and `Down` statuses
//! - **Error Handling**: [`ApiError`] classifies every way an upstream call can fail

use std::fmt::Debug;

use async_trait::async_trait;
use shared_types::{RemoteVerse, VerseReference};
use thiserror::Error;

pub mod health;

pub use health::*;

/// Generic trait for upstream scripture API clients
#[async_trait]
pub trait ApiClient: Debug + Send + Sync {
    /// Check the health of the upstream service
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream cannot be reached at all
    async fn health_check(&self) -> Result<HealthStatus, ApiError>;

    /// Fetch the passage identified by `reference`
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or sent, the upstream
    /// answers with a non-success status, or the body does not decode
    async fn fetch_reference(&self, reference: &VerseReference) -> Result<RemoteVerse, ApiError>;

    /// Get the name/identifier of this API client
    fn name(&self) -> &'static str;
}

/// Common errors that can occur when working with API clients
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Upstream does not know the requested reference
    #[error("Reference not found upstream: {reference}")]
    NotFound { reference: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// Upstream answered with an unexpected status
    #[error("Upstream returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// Response body did not match the expected payload
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },
}

impl ApiError {
    /// Whether the error is a timeout waiting on the upstream
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = ApiError::UpstreamStatus {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream returned status 500: boom");

        let err = ApiError::Timeout { timeout_seconds: 3 };
        assert_eq!(err.to_string(), "Request timeout after 3 seconds");
        assert!(err.is_timeout());

        let err = ApiError::InvalidResponse {
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(!err.is_timeout());
    }
}
