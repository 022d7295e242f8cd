//! Default payload for status-only responses.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::Payload;

/// Body emitted by [`crate::Exchange::with_status`] when no status-data
/// generator is configured: `{"status": <reason phrase>, "code": <code>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Canonical reason phrase, empty for unregistered codes.
    pub status: String,
    /// Numeric status code.
    pub code: u16,
}

impl StatusPayload {
    /// Build the payload for a status code.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: status.canonical_reason().unwrap_or_default().to_string(),
            code: status.as_u16(),
        }
    }
}

impl From<StatusPayload> for Payload {
    fn from(value: StatusPayload) -> Self {
        Self::Json(json!({
            "status": value.status,
            "code": value.code,
        }))
    }
}

impl From<StatusCode> for StatusPayload {
    fn from(status: StatusCode) -> Self {
        Self::new(status)
    }
}
