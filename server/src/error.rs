//! API error type and its HTTP mapping.
//!
//! # Design
//! Handlers return `ApiResult<T>`. `IntoResponse` picks the status code and
//! writes a `{error, details?}` body, and also stores that body in the
//! response extensions so the error-envelope middleware can re-emit it with
//! the request path and a timestamp. Internal causes are logged here and
//! never sent to the client.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::validation::ValidationError;

pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client-supplied data is malformed.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// No route matches the request.
    #[error("Route not found")]
    RouteNotFound,

    /// Unexpected fault. The message is logged, not returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body shared by every error response.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(reason) => ErrorBody {
                error: "Validation failed".to_string(),
                details: Some(reason.to_string()),
            },
            ApiError::NotFound(msg) => ErrorBody {
                error: (*msg).to_string(),
                details: None,
            },
            ApiError::RouteNotFound => ErrorBody {
                error: "Route not found".to_string(),
                details: None,
            },
            ApiError::Internal(_) => ErrorBody {
                error: INTERNAL_MESSAGE.to_string(),
                details: None,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(cause) => tracing::error!(%cause, "request failed"),
            ApiError::Validation(reason) => tracing::debug!(%reason, "payload rejected"),
            _ => {}
        }
        let body = self.body();
        let mut response = (self.status(), Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}
