//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the five API routes
//! - Wire up middleware (tracing, timeout, request ID, CORS)
//! - Build the shared upstream client and session broker
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{FallbackLocation, ProxyConfig};
use crate::http::handlers;
use crate::http::request::MakeRequestUuid;
use crate::upstream::{Endpoints, GeoPoint, SessionBroker, UpstreamClient};

/// Errors that can occur while assembling the server.
#[derive(Debug, Error)]
pub enum ServerBuildError {
    #[error("invalid upstream base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("invalid upstream header value: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub endpoints: Endpoints,
    pub upstream: UpstreamClient,
    pub sessions: SessionBroker,
    pub fallback: FallbackLocation,
}

impl AppState {
    pub(crate) fn resolve_geo(&self, lat: Option<String>, lng: Option<String>) -> GeoPoint {
        GeoPoint::resolve(lat, lng, &self.fallback)
    }
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerBuildError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.upstream_secs))
            .build()?;

        let upstream_config = Arc::new(config.upstream.clone());
        let endpoints = Endpoints::new(&upstream_config.base_url)?;
        let upstream = UpstreamClient::new(http.clone(), &upstream_config, &endpoints)?;
        let sessions = SessionBroker::new(
            http,
            crate::upstream::client::browser_headers(&upstream_config)?,
            upstream_config,
        );

        let state = AppState {
            endpoints,
            upstream,
            sessions,
            fallback: config.fallback_location.clone(),
        };

        Ok(Self {
            router: Self::build_router(&config, state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/restaurants", get(handlers::list_restaurants))
            .route("/api/menu", get(handlers::get_menu))
            .route("/api/cuisines", get(handlers::list_cuisines))
            .route(
                "/api/search-sugggestions",
                get(handlers::search_suggestions),
            )
            .route("/api/search-results", get(handlers::search_results))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(CorsLayer::permissive()),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
