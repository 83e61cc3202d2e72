//! The uniform response wrapper returned by every endpoint.
//!
//! Callers never branch on the HTTP status: it is always 200 and the real
//! outcome lives in `success` and `original_status`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub original_status: u16,
    pub response: Value,
    pub timestamp: String,
}

impl Envelope {
    pub fn new(success: bool, original_status: u16, response: Value) -> Self {
        Self {
            success,
            original_status,
            response,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn success(original_status: u16, response: Value) -> Self {
        Self::new(true, original_status, response)
    }

    pub fn failure(original_status: u16, message: impl Into<String>) -> Self {
        Self::new(false, original_status, json!({ "error": message.into() }))
    }

    /// Compares everything but the timestamp.
    pub fn same_outcome(&self, other: &Envelope) -> bool {
        self.success == other.success
            && self.original_status == other.original_status
            && self.response == other.response
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
