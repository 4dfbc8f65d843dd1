//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, tracing, request ID)
//! - Bind server to listener
//! - Serve until the shutdown coordinator fires

use axum::{
    body::Body,
    http::Request,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::health;
use crate::http::handlers;
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::upstream::{UpstreamClient, UpstreamResult};

/// Endpoints announced at startup.
const ENDPOINTS: &[&str] = &[
    "GET /api/coins/new",
    "GET /api/coins/trending",
    "GET /api/coins/graduating",
    "GET /api/coins/graduated",
    "GET /api/coin/{mint}",
    "GET /api/coin/{mint}/trades",
    "GET /api/search?q=query",
    "GET /api/proxy/*",
    "GET /health",
];

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> UpstreamResult<Self> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let router = Self::build_router(AppState { upstream });
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/api/coins/new", get(handlers::coins_new))
            .route("/api/coins/trending", get(handlers::coins_trending))
            .route("/api/coins/graduating", get(handlers::coins_graduating))
            .route("/api/coins/graduated", get(handlers::coins_graduated))
            .route("/api/coin/{mint}", get(handlers::coin))
            .route("/api/coin/{mint}/trades", get(handlers::coin_trades))
            .route("/api/search", get(handlers::search))
            .route("/api/proxy/", get(handlers::passthrough))
            .route("/api/proxy/{*path}", get(handlers::passthrough))
            .route("/health", get(health::health))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            uri = %req.uri(),
                            request_id = %request_id(req.headers()),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(CorsLayer::permissive()),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            endpoints = ?ENDPOINTS,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
