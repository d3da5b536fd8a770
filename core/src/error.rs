//! Error types for the todo API client.
//!
//! # Design
//! Status codes the UI reacts to differently get their own variant: 400
//! carries the server's validation reason, 404 and 5xx are distinct. The
//! host reports failed round trips as `Timeout` or `Network`.
//! `user_message` turns any variant into the inline text shown to the user.

use crate::types::ErrorBody;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the payload (400).
    #[error("invalid request: {0}")]
    Validation(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a 5xx status.
    #[error("server error (HTTP {status})")]
    Server { status: u16 },

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The round trip exceeded the request timeout.
    #[error("request timed out")]
    Timeout,

    /// The host could not reach the server.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Map a non-success status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => {
                let reason = serde_json::from_str::<ErrorBody>(body)
                    .ok()
                    .and_then(|b| b.details.or(Some(b.error)))
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Invalid request".to_string());
                ApiError::Validation(reason)
            }
            404 => ApiError::NotFound,
            500..=599 => ApiError::Server { status },
            _ => ApiError::Http {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Text suitable for an inline error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(reason) => reason.clone(),
            ApiError::NotFound => "Resource not found".to_string(),
            ApiError::Server { .. } => "Server error. Please try again later.".to_string(),
            ApiError::Timeout => "Request timeout. Please try again.".to_string(),
            ApiError::Network(_) => "Network error. Please check your connection.".to_string(),
            ApiError::Http { .. }
            | ApiError::Deserialization(_)
            | ApiError::Serialization(_) => "An error occurred".to_string(),
        }
    }
}
