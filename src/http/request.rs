//! Request ID generation.
//!
//! Every inbound request gets a UUID v4 `x-request-id` as early as
//! possible; the propagate layer echoes it back on the response so
//! callers can correlate log lines.

use axum::http::Request;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Canonical request-id header name.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a fresh UUID v4 per request for the set-request-id layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}
