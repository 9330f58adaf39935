//! Client-side error taxonomy.

use thiserror::Error;

use oplps_core::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Fallback shown when the server did not supply a usable message.
pub const GENERIC_FAILURE: &str = "The request could not be completed. Please refresh and try again.";

/// Everything that can go wrong talking to the remote API.
///
/// None of these are fatal: every variant degrades to an inline message and
/// a retry-by-user-action.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Pre-network validation failure; no request was made.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Transport-level failure (connection refused, DNS, mid-body drop).
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status, or a success-shaped response whose body
    /// signalled failure.
    #[error("API error: {message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// The string shown inline to the user: validation and server messages
    /// verbatim, everything else collapsed to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Api {
            status: Some(409),
            message: "part already issued".to_string(),
        };
        assert_eq!(err.user_message(), "part already issued");
    }

    #[test]
    fn transport_failures_collapse_to_the_fallback() {
        assert_eq!(
            ApiError::Network("connection refused".into()).user_message(),
            GENERIC_FAILURE
        );
        assert_eq!(
            ApiError::Decode("expected array".into()).user_message(),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn validation_messages_pass_through() {
        let err = ApiError::from(DomainError::validation("quantity must be a positive integer"));
        assert!(err.is_validation());
        assert_eq!(
            err.user_message(),
            "validation failed: quantity must be a positive integer"
        );
    }
}
