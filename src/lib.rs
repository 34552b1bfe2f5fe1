//! Food-delivery API proxy library.
//!
//! Fronts a third-party food-delivery web API: accepts simplified GET
//! requests, re-issues equivalent requests against the upstream site
//! while impersonating a desktop browser, and relays the JSON payload
//! back unchanged.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────┐
//!                        │                 PROXY                     │
//!                        │                                           │
//!   Client Request       │  ┌─────────┐     ┌──────────────┐        │
//!   ─────────────────────┼─▶│  http   │────▶│   upstream   │        │
//!                        │  │ server  │     │  session +   │────────┼──▶ Upstream
//!                        │  │+handlers│     │   client     │        │    Service
//!                        │  └─────────┘     └──────┬───────┘        │
//!                        │        ▲                │                 │
//!   Client Response      │        └────────────────┘                 │
//!   ◀────────────────────┼─  relay payload / map error               │
//!                        │                                           │
//!                        │  ┌────────────────────────────────────┐   │
//!                        │  │       Cross-Cutting Concerns        │   │
//!                        │  │  config · observability · lifecycle │   │
//!                        │  └────────────────────────────────────┘   │
//!                        └──────────────────────────────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
