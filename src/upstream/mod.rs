//! Upstream interaction subsystem.
//!
//! # Data Flow
//! ```text
//! proxied operation
//!     → session.rs (optional: handshake → device id + cookies)
//!     → endpoints.rs (URL for the operation)
//!     → client.rs (header composition, single GET)
//!     → UpstreamReply | UpstreamError back to the handler
//! ```
//!
//! # Design Decisions
//! - Sessions live for exactly one proxied call; nothing is cached
//! - The error taxonomy is typed, not inferred from exceptions
//! - All outbound calls share one pooled reqwest client

pub mod client;
pub mod endpoints;
pub mod session;

pub use client::{UpstreamClient, UpstreamError, UpstreamReply};
pub use endpoints::{Endpoints, GeoPoint};
pub use session::{SessionBroker, SessionOutcome, UpstreamSession};
