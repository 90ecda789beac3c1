//! Result, error and envelope types for the core library

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Every store call and service operation fails with one of these. The
/// status code each variant maps to is what the JSON-server (or the client
/// side check) would have reported.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a generic server error (HTTP 500)
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server {
            status: 500,
            message: msg.into(),
        }
    }

    /// Status code carried by the error envelope
    pub fn status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::Conflict(_) => 409,
            Error::Unauthorized(_) => 401,
            Error::OutOfStock(_) | Error::InsufficientStock(_) => 422,
            Error::Validation(_) => 400,
            Error::Server { status, .. } => *status,
            Error::Http(_) => 503,
            Error::Config(_) | Error::Io(_) | Error::Json(_) => 500,
        }
    }

    /// Stable machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::Unauthorized(_) => "unauthorized",
            Error::OutOfStock(_) => "out_of_stock",
            Error::InsufficientStock(_) => "insufficient_stock",
            Error::Validation(_) => "validation",
            Error::Server { .. } => "server_error",
            Error::Http(_) => "http_error",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Success envelope returned by every store call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// 200 response
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            status: 200,
            message: message.into(),
        }
    }

    /// 201 response
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            status: 201,
            message: message.into(),
        }
    }

    /// Replace the payload, keeping status and message
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            message: self.message,
        }
    }
}

/// Failure envelope, the serialisable counterpart of [`Error`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<&Error> for ApiError {
    fn from(error: &Error) -> Self {
        Self {
            message: error.to_string(),
            status: error.status(),
            code: Some(error.code().to_string()),
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self::from(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses() {
        assert_eq!(Error::not_found("product 1").status(), 404);
        assert_eq!(Error::Conflict("email".into()).status(), 409);
        assert_eq!(Error::OutOfStock("X-Burger".into()).status(), 422);
        assert_eq!(Error::server("boom").status(), 500);
        assert_eq!(
            Error::Server {
                status: 502,
                message: "bad gateway".into()
            }
            .status(),
            502
        );
    }

    #[test]
    fn test_api_error_from_error() {
        let err = Error::InsufficientStock("only 2 left".into());
        let envelope = ApiError::from(&err);
        assert_eq!(envelope.status, 422);
        assert_eq!(envelope.code.as_deref(), Some("insufficient_stock"));
        assert!(envelope.message.contains("only 2 left"));
    }

    #[test]
    fn test_api_response_map() {
        let response = ApiResponse::created(vec![1, 2, 3], "created");
        let mapped = response.map(|v| v.len());
        assert_eq!(mapped.data, 3);
        assert_eq!(mapped.status, 201);
        assert_eq!(mapped.message, "created");
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = ApiError::from(Error::not_found("order ORDER-1"));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["code"], "not_found");
    }
}
