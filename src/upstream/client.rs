//! Upstream HTTP client and error taxonomy.
//!
//! # Responsibilities
//! - Compose the browser-impersonation header set once
//! - Attach per-session headers (`X-Device-Id`, `Cookie`) when present
//! - Issue the single outbound GET per proxied operation
//! - Classify failures as HTTP-level or transport-level
//!
//! # Design Decisions
//! - One shared reqwest client; timeouts come from configuration
//! - A non-2xx upstream response is an error carrying its status
//! - No retries here; only session acquisition retries internally

use axum::body::Bytes;
use axum::http::header::{
    InvalidHeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, ORIGIN, REFERER, USER_AGENT,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::endpoints::Endpoints;
use crate::upstream::session::UpstreamSession;

const X_DEVICE_ID: &str = "x-device-id";

/// A successful upstream response: status plus verbatim body.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Why an upstream call produced no relayable payload.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-2xx status.
    #[error("upstream request failed with status {status}")]
    Status { status: StatusCode },

    /// No HTTP response was obtainable at all.
    #[error("upstream request failed: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// The status the proxy reproduces on its own response.
    pub fn response_status(&self) -> StatusCode {
        match self {
            UpstreamError::Status { status } => *status,
            UpstreamError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The fixed browser-impersonation header set. The upstream gates on
/// these, so every outbound call carries them, handshake included.
pub fn browser_headers(config: &UpstreamConfig) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
    headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)?,
    );
    Ok(headers)
}

/// Issues API calls against the upstream service.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    headers: HeaderMap,
}

impl UpstreamClient {
    /// Build the client, pre-composing the forwarding header set:
    /// browser headers plus `Referer` and `Origin`.
    pub fn new(
        http: reqwest::Client,
        config: &UpstreamConfig,
        endpoints: &Endpoints,
    ) -> Result<Self, InvalidHeaderValue> {
        let mut headers = browser_headers(config)?;
        headers.insert(REFERER, HeaderValue::from_str(&endpoints.landing_page())?);
        headers.insert(ORIGIN, HeaderValue::from_str(&endpoints.origin())?);
        Ok(Self { http, headers })
    }

    fn request_headers(
        &self,
        session: Option<&UpstreamSession>,
    ) -> Result<HeaderMap, UpstreamError> {
        let mut headers = self.headers.clone();
        if let Some(session) = session {
            headers.insert(
                HeaderName::from_static(X_DEVICE_ID),
                HeaderValue::from_str(&session.device_id)
                    .map_err(|e| UpstreamError::Transport(e.to_string()))?,
            );
            headers.insert(
                COOKIE,
                HeaderValue::from_str(&session.cookie_header())
                    .map_err(|e| UpstreamError::Transport(e.to_string()))?,
            );
        }
        Ok(headers)
    }

    /// Issue one GET against `url`, attaching session headers when a
    /// session is supplied. The body is returned untouched.
    pub async fn fetch(
        &self,
        url: Url,
        session: Option<&UpstreamSession>,
    ) -> Result<UpstreamReply, UpstreamError> {
        let headers = self.request_headers(session)?;

        let response = self
            .http
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(UpstreamReply { status, body })
    }
}
