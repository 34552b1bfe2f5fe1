//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every section carries full defaults so the binary runs with no file at all.
//!
//! The browser-impersonation header values and the fallback coordinate are
//! deliberately configuration rather than constants: both components receive
//! them explicitly instead of reading ambient globals.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Upstream service settings (base URL, handshake policy, headers).
    pub upstream: UpstreamConfig,

    /// Coordinate used when the caller omits `lat`/`lng`.
    pub fallback_location: FallbackLocation,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind host (e.g., "0.0.0.0").
    pub host: String,

    /// Listening port. Overridable via the `PORT` environment variable
    /// and the `--port` CLI flag.
    pub port: u16,
}

impl ListenerConfig {
    /// Full bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Upstream service configuration.
///
/// The upstream gates on browser-looking requests, so the impersonation
/// header values ship as defaults here and are applied to every outbound
/// call, handshake included.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the upstream site. The session handshake targets this
    /// URL directly; API endpoints are resolved relative to it.
    pub base_url: String,

    /// Name of the anonymous device-identifier cookie issued by the
    /// upstream landing page.
    pub device_cookie: String,

    /// Total handshake attempts before giving up (first try included).
    pub handshake_attempts: u32,

    /// `User-Agent` sent on every outbound call.
    pub user_agent: String,

    /// `Accept` sent on every outbound call.
    pub accept: String,

    /// `Accept-Language` sent on every outbound call.
    pub accept_language: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.swiggy.com".to_string(),
            device_cookie: "_device_id".to_string(),
            handshake_attempts: 4,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            accept: "application/json".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

/// Coordinate substituted when a caller omits `lat`/`lng`.
///
/// Values are opaque strings passed through to the upstream unmodified;
/// nothing validates them as numeric.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackLocation {
    pub lat: String,
    pub lng: String,
}

impl Default for FallbackLocation {
    fn default() -> Self {
        Self {
            lat: "22.7195687".to_string(),
            lng: "75.8577258".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for outbound calls, in seconds.
    pub connect_secs: u64,

    /// Total timeout for a single outbound upstream call, in seconds.
    pub upstream_secs: u64,

    /// Inbound request timeout in seconds. Sized to cover a full handshake
    /// retry budget plus the proxied call.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 10,
            request_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
