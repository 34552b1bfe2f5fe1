//! Anonymous session acquisition.
//!
//! # Responsibilities
//! - Perform the landing-page handshake that yields session cookies
//! - Extract the anonymous device identifier from the cookie set
//! - Absorb transient handshake failures behind a bounded retry loop
//!
//! # Design Decisions
//! - A session is acquired per proxied call, used once, then dropped
//! - Retries are sequential with no backoff; the bound is configurable
//! - A 2xx handshake without the device cookie is a parsing failure,
//!   not a transient one: it is never retried
//! - Callers only ever see the binary outcome (session or none)

use std::sync::Arc;

use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;

use crate::config::UpstreamConfig;
use crate::observability::metrics;

/// An anonymous upstream session: a device identifier plus the raw
/// cookie set issued alongside it.
///
/// Owned by exactly one proxied call. Never cached, shared, or mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSession {
    /// Opaque device identifier extracted from the cookie set.
    pub device_id: String,

    /// Raw `Set-Cookie` values in the order the upstream sent them.
    pub cookies: Vec<String>,
}

impl UpstreamSession {
    /// The `Cookie` header value: raw entries joined with `"; "`,
    /// original order preserved.
    pub fn cookie_header(&self) -> String {
        self.cookies.join("; ")
    }
}

/// Result of one acquisition run. The internal failure cause (transport
/// vs missing cookie) is logged but deliberately not surfaced.
#[derive(Debug)]
pub enum SessionOutcome {
    Acquired(UpstreamSession),
    Unavailable,
}

/// Performs the handshake against the upstream landing page.
#[derive(Clone)]
pub struct SessionBroker {
    http: reqwest::Client,
    headers: HeaderMap,
    config: Arc<UpstreamConfig>,
}

impl SessionBroker {
    pub fn new(http: reqwest::Client, headers: HeaderMap, config: Arc<UpstreamConfig>) -> Self {
        Self {
            http,
            headers,
            config,
        }
    }

    /// Acquire a fresh session, retrying failed handshakes up to the
    /// configured attempt bound.
    pub async fn acquire(&self) -> SessionOutcome {
        for attempt in 1..=self.config.handshake_attempts {
            let response = match self
                .http
                .get(&self.config.base_url)
                .headers(self.headers.clone())
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Session handshake failed");
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                tracing::warn!(attempt, status = %status, "Session handshake rejected");
                continue;
            }

            let cookies: Vec<String> = response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .map(str::to_owned)
                .collect();

            return match extract_cookie(&cookies, &self.config.device_cookie) {
                Some(device_id) => {
                    tracing::debug!(attempt, "Session acquired");
                    metrics::record_handshake("acquired");
                    SessionOutcome::Acquired(UpstreamSession { device_id, cookies })
                }
                None => {
                    tracing::error!(
                        cookie = %self.config.device_cookie,
                        "Device identifier cookie missing from handshake response"
                    );
                    metrics::record_handshake("missing_cookie");
                    SessionOutcome::Unavailable
                }
            };
        }

        tracing::error!(
            attempts = self.config.handshake_attempts,
            "Session handshake attempts exhausted"
        );
        metrics::record_handshake("exhausted");
        SessionOutcome::Unavailable
    }
}

/// Find `name` in a raw cookie sequence and return its value, terminated
/// at the first `;`. The name must match exactly up to the `=`.
fn extract_cookie(cookies: &[String], name: &str) -> Option<String> {
    cookies.iter().find_map(|raw| {
        let value = raw.strip_prefix(name)?.strip_prefix('=')?;
        let value = match value.split_once(';') {
            Some((head, _)) => head,
            None => value,
        };
        Some(value.to_owned())
    })
}
