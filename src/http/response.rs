//! Response relay and error rendering.
//!
//! # Responsibilities
//! - Relay a successful upstream payload verbatim
//! - Map the upstream error taxonomy onto proxy responses
//! - Preserve the per-operation error body format
//!
//! # Design Decisions
//! - Success always carries `Content-Type: application/json`
//! - The restaurants operation renders errors as JSON; the four
//!   session-backed operations render plain text (published caller
//!   contract, kept asymmetric on purpose)
//! - Mapping is implemented once and shared by every operation

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::upstream::{UpstreamError, UpstreamReply};

/// Body of the fixed response sent when no session could be acquired.
pub const SESSION_FAILURE_BODY: &str = "Failed to retrieve Device ID";

/// How an operation renders error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStyle {
    /// `{"error": "<message>"}`
    Json,
    /// The bare message.
    Text,
}

/// The fixed 500 returned when session acquisition yields nothing.
pub fn session_unavailable() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, SESSION_FAILURE_BODY).into_response()
}

/// Turn an upstream outcome into the proxy's own response.
pub fn relay(
    outcome: Result<UpstreamReply, UpstreamError>,
    style: ErrorStyle,
    operation: &'static str,
) -> Response {
    match outcome {
        Ok(reply) => (
            reply.status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            reply.body,
        )
            .into_response(),
        Err(err) => {
            let status = err.response_status();
            tracing::error!(operation, status = %status, error = %err, "Upstream call failed");
            match style {
                ErrorStyle::Json => {
                    (status, Json(json!({ "error": err.to_string() }))).into_response()
                }
                ErrorStyle::Text => (status, err.to_string()).into_response(),
            }
        }
    }
}
