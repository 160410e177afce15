// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `BibleApiClient`
//!
//! These tests use wiremock to mock the upstream scripture API and check the
//! client behavior for successful lookups and every failure mode.

use std::time::Duration;

use api_client::{ApiClient, ApiError, HealthStatus};
use external_apis::{BibleApiClient, BibleApiConfig, BibleApiError};
use shared_types::VerseReference;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use fixtures::*;

const TEST_TIMEOUT_SECONDS: u64 = 1;
const TEST_HEALTH_CHECK_TIMEOUT_SECONDS: u64 = 1;

/// Create a test `BibleApiConfig` with the mock server URL
fn create_test_config(base_url: String) -> BibleApiConfig {
    BibleApiConfig {
        base_url,
        timeout_seconds: TEST_TIMEOUT_SECONDS,
        health_check_timeout_seconds: TEST_HEALTH_CHECK_TIMEOUT_SECONDS,
    }
}

async fn setup() -> (MockServer, BibleApiClient) {
    let mock_server = MockServer::start().await;
    let client = BibleApiClient::new(create_test_config(mock_server.uri())).unwrap();
    (mock_server, client)
}

/// Test successful reference lookup
#[tokio::test]
async fn fetch_reference_success() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(JOHN_3_16_PATH))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(BibleApiFixture::john_3_16()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = client
        .fetch_reference(&VerseReference::default())
        .await
        .unwrap();

    assert_eq!(payload.reference, "John 3:16");
    assert_eq!(payload.translation_id, "web");
    assert_eq!(payload.verses.len(), 1);
    assert_eq!(payload.verses[0].book_id, "JHN");
    assert_eq!(payload.verses[0].chapter, 3);
    assert_eq!(payload.verses[0].verse, 16);
}

/// Test that the requested reference selects the upstream path
#[tokio::test]
async fn fetch_reference_uses_requested_reference() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(ACTS_24_16_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(BibleApiFixture::acts_24_16()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reference = VerseReference::new("Acts 24:16").unwrap();
    let payload = client.fetch_reference(&reference).await.unwrap();
    assert_eq!(payload.reference, "Acts 24:16");
}

/// Test malformed JSON body
#[tokio::test]
async fn fetch_reference_malformed_json() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(JOHN_3_16_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"reference\": \"John 3:16\""))
        .mount(&mock_server)
        .await;

    let result = client.get_reference(&VerseReference::default()).await;
    assert!(matches!(result, Err(BibleApiError::Json(_))));

    let result = client.fetch_reference(&VerseReference::default()).await;
    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

/// Test unknown reference
#[tokio::test]
async fn fetch_reference_not_found() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(BibleApiFixture::not_found()))
        .mount(&mock_server)
        .await;

    let reference = VerseReference::new("Hezekiah 1:1").unwrap();
    let result = client.fetch_reference(&reference).await;

    match result {
        Err(ApiError::NotFound { reference }) => assert_eq!(reference, "Hezekiah 1:1"),
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

/// Test rate limiting
#[tokio::test]
async fn fetch_reference_rate_limited() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(JOHN_3_16_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let result = client.fetch_reference(&VerseReference::default()).await;
    assert!(matches!(result, Err(ApiError::RateLimitExceeded { .. })));
}

/// Test upstream server error
#[tokio::test]
async fn fetch_reference_server_error() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(JOHN_3_16_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = client.fetch_reference(&VerseReference::default()).await;

    match result {
        Err(ApiError::UpstreamStatus { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected UpstreamStatus error, got: {other:?}"),
    }
}

/// Test that a hung upstream is cut off by the configured timeout
#[tokio::test]
async fn fetch_reference_timeout() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(JOHN_3_16_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(BibleApiFixture::john_3_16())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    // Repeated to catch the transport deadline racing the outer one
    for _ in 0..3 {
        let result = client.fetch_reference(&VerseReference::default()).await;
        assert!(
            matches!(
                result,
                Err(ApiError::Timeout {
                    timeout_seconds: TEST_TIMEOUT_SECONDS
                })
            ),
            "Expected a timeout, got: {result:?}"
        );
    }

    let result = client.get_reference(&VerseReference::default()).await;
    assert!(matches!(
        result,
        Err(BibleApiError::Timeout {
            seconds: TEST_TIMEOUT_SECONDS
        })
    ));
}

/// Test transport failure when nothing is listening
#[tokio::test]
async fn fetch_reference_connection_refused() {
    let client = BibleApiClient::new(create_test_config("http://127.0.0.1:1".to_string())).unwrap();
    let result = client.fetch_reference(&VerseReference::default()).await;
    assert!(matches!(result, Err(ApiError::Http { .. })));
}

/// Test health check success
#[tokio::test]
async fn health_check_success() {
    let (mock_server, client) = setup().await;
    BibleApiFixture::mount_root(&mock_server, 200).await;

    let health = client.health_check().await.unwrap();
    assert_eq!(health, HealthStatus::Up);
}

/// Test health check when the upstream is rate limiting
#[tokio::test]
async fn health_check_rate_limited() {
    let (mock_server, client) = setup().await;
    BibleApiFixture::mount_root(&mock_server, 429).await;

    let health = client.health_check().await.unwrap();
    assert_eq!(
        health,
        HealthStatus::Degraded {
            reason: "Rate limited".to_string()
        }
    );
}

/// Test health check on upstream errors
#[tokio::test]
async fn health_check_server_error() {
    let (mock_server, client) = setup().await;
    BibleApiFixture::mount_root(&mock_server, 503).await;

    let health = client.health_check().await.unwrap();
    assert!(health.is_available());
    assert_eq!(health.description(), "API returned status 503");
}

/// Test that a hung health endpoint surfaces as a timeout
#[tokio::test]
async fn health_check_timeout() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let result = client.health_check().await;
    assert!(
        matches!(result, Err(ApiError::Timeout { .. })),
        "Expected a timeout, got: {result:?}"
    );
}

/// Test client name
#[tokio::test]
async fn client_name() {
    let (_mock_server, client) = setup().await;
    assert_eq!(client.name(), "bible-api");
}

/// Test the shared fixture helper end to end
#[tokio::test]
async fn fixture_mount_john_3_16() {
    let (mock_server, client) = setup().await;
    BibleApiFixture::mount_john_3_16(&mock_server).await;

    let payload = client
        .fetch_reference(&VerseReference::default())
        .await
        .unwrap();
    assert!(payload.text.starts_with("For God so loved the world"));
}
