// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Test fixtures for server integration tests
//!
//! Starts the server on an ephemeral port with its remote verse client pointed
//! at a wiremock upstream.

use std::{net::SocketAddr, sync::Arc};

use api_client::ApiClient;
use external_apis::BibleApiClient;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use verse_api::{AlbumStore, Server, ServerConfig, ShutdownConfig, Verse, VerseStore};
use wiremock::MockServer;

/// Encoded upstream path for the default `John 3:16` reference
pub const JOHN_3_16_PATH: &str = "/John%203:16";

/// A running server together with its mocked upstream
#[derive(Debug)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub upstream: MockServer,
    pub token: CancellationToken,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start a server with the seeded stores
    pub async fn start() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Start a server with the seeded stores after adjusting the test config
    pub async fn with_config(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let upstream = MockServer::start().await;
        let mut config = ServerConfig::for_testing().with_bible_api_url(upstream.uri());
        adjust(&mut config);
        let server = Server::new(config, ShutdownConfig::default()).expect("Failed to create server");
        Self::run(server, upstream).await
    }

    /// Start a server whose verse store holds `verses`
    pub async fn with_verses(verses: Vec<Verse>) -> Self {
        let upstream = MockServer::start().await;
        let config = ServerConfig::for_testing().with_bible_api_url(upstream.uri());
        let client = BibleApiClient::new(config.bible_api.client_config())
            .expect("Failed to create upstream client");
        let server = Server::with_stores(
            config,
            ShutdownConfig::default(),
            AlbumStore::seeded(),
            VerseStore::new(verses),
            Arc::new(client),
        )
        .expect("Failed to create server");
        Self::run(server, upstream).await
    }

    /// Start a server with the seeded stores and a caller-supplied upstream client
    pub async fn with_upstream(upstream: Arc<dyn ApiClient>) -> Self {
        let mock = MockServer::start().await;
        let server = Server::with_stores(
            ServerConfig::for_testing(),
            ShutdownConfig::default(),
            AlbumStore::seeded(),
            VerseStore::seeded(),
            upstream,
        )
        .expect("Failed to create server");
        Self::run(server, mock).await
    }

    async fn run(server: Server, upstream: MockServer) -> Self {
        let (addr, token) = server
            .run_for_testing()
            .await
            .expect("Failed to start test server");

        Self {
            addr,
            upstream,
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path` on the server under test
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Send a GET request to `path`
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Upstream payload for John 3:16
pub fn john_3_16() -> Value {
    json!({
        "reference": "John 3:16",
        "verses": [{
            "book_id": "JHN",
            "book_name": "John",
            "chapter": 3,
            "verse": 16,
            "text": "For God so loved the world, that he gave his one and only Son, that whoever believes in him should not perish, but have eternal life.\n"
        }],
        "text": "For God so loved the world, that he gave his one and only Son, that whoever believes in him should not perish, but have eternal life.\n",
        "translation_id": "web",
        "translation_name": "World English Bible",
        "translation_note": "Public Domain"
    })
}
