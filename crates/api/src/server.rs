// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server implementation module
//!
//! This module provides the main server struct and implementation for the verse API server,
//! including server lifecycle management, router configuration, and coordinated graceful
//! shutdown using `CancellationToken`.

use std::{io, net::SocketAddr, sync::Arc, time::Duration};

use api_client::ApiClient;
use axum::{Router, http::HeaderName};
use external_apis::BibleApiClient;
use hyper::Request;
use tokio::{net::TcpListener, task::JoinHandle, time::timeout};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, warn};

use crate::{
    config::ServerConfig,
    error::{ServerError, ServerResult},
    routes::create_routes,
    state::ServerState,
    store::{AlbumStore, VerseStore},
};

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
const DEFAULT_GRACEFUL_SHUTDOWN_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_FORCE_SHUTDOWN_TIMEOUT_SECONDS: u64 = 5;

/// The spawned `axum::serve` loop
type ServeHandle = JoinHandle<io::Result<()>>;

/// Configuration for server shutdown behavior
#[derive(Debug, Clone)]
pub struct ShutdownConfig {
    /// How long in-flight requests may run once shutdown starts
    pub graceful_timeout: Duration,
    /// How long to wait for the serve loop to stop after it has been aborted
    pub force_timeout: Duration,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            graceful_timeout: Duration::from_secs(DEFAULT_GRACEFUL_SHUTDOWN_TIMEOUT_SECONDS),
            force_timeout: Duration::from_secs(DEFAULT_FORCE_SHUTDOWN_TIMEOUT_SECONDS),
        }
    }
}

/// Main server struct
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    router: Router,
    state: ServerState,
    /// Cancelling this token starts the graceful shutdown
    cancellation_token: CancellationToken,
    shutdown: ShutdownConfig,
}

impl Server {
    /// Create new server instance with the seeded stores and a bible-api.com client
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if the upstream client cannot be built
    /// from the configuration.
    pub fn new(config: ServerConfig, shutdown: ShutdownConfig) -> ServerResult<Self> {
        let client = BibleApiClient::new(config.bible_api.client_config()).map_err(|e| {
            ServerError::Config {
                message: format!("invalid bible_api configuration: {e}"),
            }
        })?;

        Self::with_stores(
            config,
            shutdown,
            AlbumStore::seeded(),
            VerseStore::seeded(),
            Arc::new(client),
        )
    }

    /// Create server with caller-supplied stores and upstream client
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if the configuration is invalid.
    pub fn with_stores(
        config: ServerConfig,
        shutdown: ShutdownConfig,
        albums: AlbumStore,
        verses: VerseStore,
        upstream: Arc<dyn ApiClient>,
    ) -> ServerResult<Self> {
        let cancellation_token = CancellationToken::new();
        let state = ServerState::new(
            config.clone(),
            Arc::new(albums),
            Arc::new(verses),
            upstream,
            cancellation_token.child_token(),
        );
        let router = Self::create_router(state.clone());

        info!(
            albums = state.albums().len(),
            verses = state.verses().len(),
            upstream = state.upstream().name(),
            reference = %config.bible_api.reference,
            "record stores initialised"
        );

        Ok(Self {
            config,
            router,
            state,
            cancellation_token,
            shutdown,
        })
    }

    fn create_router(state: ServerState) -> Router {
        let timeout_duration = state.config().timeout_seconds.value();

        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("unknown");
                    info_span!("http_request", method = %req.method(), uri = %req.uri(), request_id)
                }),
            )
            .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(timeout_duration));

        create_routes().layer(middleware).with_state(state)
    }

    async fn bind(&self) -> ServerResult<(TcpListener, SocketAddr)> {
        let address = self.config.socket_addr();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })?;
        let bound = listener
            .local_addr()
            .map_err(|source| ServerError::Startup { source })?;
        Ok((listener, bound))
    }

    /// Run the server until a shutdown signal or [`Server::shutdown`]
    ///
    /// Once shutdown starts, in-flight requests get
    /// [`ShutdownConfig::graceful_timeout`] to finish before the serve loop
    /// is aborted.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if unable to bind to the configured address,
    /// `ServerError::Shutdown` if the serve loop fails, or
    /// `ServerError::TaskJoin` if it panics.
    pub async fn run(self) -> ServerResult<()> {
        let (listener, address) = self.bind().await?;

        info!(
            %address,
            environment = %self.config.environment,
            "verse API server starting",
        );

        let Self {
            router,
            cancellation_token,
            shutdown,
            ..
        } = self;

        tokio::spawn(watch_shutdown_signals(cancellation_token.clone()));

        let serve_token = cancellation_token.clone();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { serve_token.cancelled().await })
                .await
        });

        let outcome = drain(handle, cancellation_token, &shutdown).await;
        if outcome.is_ok() {
            info!("verse API server shut down gracefully");
        }
        outcome
    }

    /// Returns a clone of the cancellation token for coordinated shutdown
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Initiates graceful shutdown by cancelling the server's cancellation token
    pub fn shutdown(&self) {
        info!("programmatic shutdown requested");
        self.cancellation_token.cancel();
    }

    /// Run server for testing, returns the bound address
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if unable to bind to the configured address.
    pub async fn run_for_testing(self) -> ServerResult<(SocketAddr, CancellationToken)> {
        let (listener, address) = self.bind().await?;

        let token = self.cancellation_token.child_token();
        let serve_token = token.child_token();
        tokio::spawn(async move {
            let _ = axum::serve(listener, self.router)
                .with_graceful_shutdown(async move { serve_token.cancelled().await })
                .await;
        });

        Ok((address, token))
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get server state for testing
    pub fn state(&self) -> &ServerState {
        &self.state
    }
}

/// Wait for the serve loop after `token` is cancelled, bounded by `shutdown`
async fn drain(
    mut handle: ServeHandle,
    token: CancellationToken,
    shutdown: &ShutdownConfig,
) -> ServerResult<()> {
    tokio::select! {
        joined = &mut handle => return serve_outcome(joined?),
        () = token.cancelled() => {}
    }

    info!(timeout = ?shutdown.graceful_timeout, "draining in-flight requests");
    if let Ok(joined) = timeout(shutdown.graceful_timeout, &mut handle).await {
        return serve_outcome(joined?);
    }

    warn!(
        timeout = ?shutdown.force_timeout,
        "graceful shutdown timed out, aborting serve loop"
    );
    handle.abort();
    match timeout(shutdown.force_timeout, handle).await {
        Ok(Err(e)) if e.is_cancelled() => Ok(()),
        Ok(joined) => serve_outcome(joined?),
        Err(_) => Err(ServerError::Runtime {
            message: format!(
                "serve loop still running {:?} after abort",
                shutdown.force_timeout
            ),
        }),
    }
}

fn serve_outcome(result: io::Result<()>) -> ServerResult<()> {
    result.map_err(|source| {
        error!(error = %source, "serve loop failed");
        ServerError::Shutdown { source }
    })
}

/// Cancel `token` on SIGINT/SIGTERM (CTRL+C off unix)
async fn watch_shutdown_signals(token: CancellationToken) {
    tokio::select! {
        signal = shutdown_signal() => match signal {
            Ok(name) => {
                warn!(signal = name, "shutdown signal received, cancelling all operations");
                token.cancel();
            }
            Err(e) => error!(error = %e, "failed to install shutdown signal handlers"),
        },
        () = token.cancelled() => {}
    }
}

async fn shutdown_signal() -> io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        let mut interrupt = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = terminate.recv() => Ok("SIGTERM"),
            _ = interrupt.recv() => Ok("SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok("CTRL+C")
    }
}
