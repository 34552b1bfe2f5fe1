//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once, in the binary
//! - Respect `RUST_LOG`, with a sensible default filter
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Every failure path in the proxy emits a diagnostic line

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber. `RUST_LOG` wins when set;
/// otherwise `default_filter` applies.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
