// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides the error types for server operations, including the
//! HTTP response mapping for lookup misses and upstream failures.

use std::net::SocketAddr;

use api_client::ApiError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body message returned when a verse lookup misses
pub const VERSE_NOT_FOUND_MESSAGE: &str = "verse not found";

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Runtime errors during server operation
    #[error("Runtime error: {message}")]
    Runtime {
        /// Error message
        message: String,
    },

    /// Task join errors for async operations
    #[error("Task join error: {source}")]
    TaskJoin {
        /// Underlying tokio join error
        #[source]
        source: tokio::task::JoinError,
    },

    /// No verse carries the requested identifier
    #[error("Verse {id} not found")]
    VerseNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// The upstream scripture API call failed
    #[error("Upstream request failed: {source}")]
    Upstream {
        /// Underlying client error
        #[source]
        source: ApiError,
    },
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::VerseNotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::Upstream { source } if source.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ServerError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. }
            | ServerError::Runtime { .. }
            | ServerError::TaskJoin { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let json_body = match &self {
            ServerError::VerseNotFound { .. } => {
                serde_json::json!({ "message": VERSE_NOT_FOUND_MESSAGE })
            }
            _ => serde_json::json!({
                "error": self.to_string(),
                "status": status.as_u16()
            }),
        };

        (status, Json(json_body)).into_response()
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::TaskJoin { source }
    }
}

impl From<ApiError> for ServerError {
    fn from(source: ApiError) -> Self {
        Self::Upstream { source }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn verse_not_found_response() {
        let response = ServerError::VerseNotFound {
            id: "missing".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "verse not found" })
        );
    }

    #[tokio::test]
    async fn upstream_decode_error_is_bad_gateway() {
        let error: ServerError = ApiError::InvalidResponse {
            message: "EOF while parsing an object at line 1 column 25".to_string(),
        }
        .into();
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["status"], 502);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("Invalid response format")
        );
    }

    #[test]
    fn upstream_timeout_is_gateway_timeout() {
        let error: ServerError = ApiError::Timeout { timeout_seconds: 5 }.into();
        assert_eq!(error.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn startup_errors_are_internal() {
        let error = ServerError::Config {
            message: "bad port".to_string(),
        };
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "Configuration error: bad port");
    }
}
