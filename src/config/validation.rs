//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the upstream base URL actually parses
//! - Validate value ranges (timeouts > 0, at least one handshake attempt)
//! - Reject header values that cannot be sent on the wire
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("upstream.base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("upstream.device_cookie must not be empty")]
    EmptyDeviceCookie,

    #[error("upstream.handshake_attempts must be at least 1")]
    NoHandshakeAttempts,

    #[error("upstream.{field} is not a valid header value")]
    InvalidHeaderValue { field: &'static str },

    #[error("timeouts.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("fallback_location.{field} must not be empty")]
    EmptyFallbackCoordinate { field: &'static str },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Url::parse(&config.upstream.base_url).is_err() {
        errors.push(ValidationError::InvalidBaseUrl(
            config.upstream.base_url.clone(),
        ));
    }

    if config.upstream.device_cookie.is_empty() {
        errors.push(ValidationError::EmptyDeviceCookie);
    }

    if config.upstream.handshake_attempts == 0 {
        errors.push(ValidationError::NoHandshakeAttempts);
    }

    for (field, value) in [
        ("user_agent", &config.upstream.user_agent),
        ("accept", &config.upstream.accept),
        ("accept_language", &config.upstream.accept_language),
    ] {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidHeaderValue { field });
        }
    }

    for (field, value) in [
        ("connect_secs", config.timeouts.connect_secs),
        ("upstream_secs", config.timeouts.upstream_secs),
        ("request_secs", config.timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }

    for (field, value) in [
        ("lat", &config.fallback_location.lat),
        ("lng", &config.fallback_location.lng),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::EmptyFallbackCoordinate { field });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
