//! The response envelope the remote API wraps every body in.

use serde::Deserialize;

use crate::error::{ApiError, GENERIC_FAILURE};

/// `{ "status": "...", "message": ..., "data": ... }`.
///
/// A response is a success if and only if `status` is exactly `"success"`;
/// anything else is a failure regardless of HTTP status, carrying the
/// server-supplied message when one is present.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Unwrap the payload of a data-carrying response.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.failure());
        }
        self.data
            .ok_or_else(|| ApiError::Decode("success response carried no data".to_string()))
    }

    /// Acknowledge a response whose payload does not matter (mutations).
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.is_success() { Ok(()) } else { Err(self.failure()) }
    }

    fn failure(self) -> ApiError {
        ApiError::Api {
            status: None,
            message: self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        }
    }
}
