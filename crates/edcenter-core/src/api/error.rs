use std::collections::HashMap;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        details: HashMap<String, Vec<String>>,
    },

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error envelope returned by the backend: `{"error": {"code", "message", "details"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<HashMap<String, Vec<String>>>,
}

/// Flat error shape: `{"message": "...", "errors": {...}}`.
#[derive(Debug, Deserialize)]
struct FlatError {
    message: String,
    #[serde(default)]
    errors: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..end],
                body.len()
            )
        }
    }

    /// Pull the human-readable message (and field details) out of an error body.
    fn parse_body(body: &str) -> (String, HashMap<String, Vec<String>>) {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
            if let Some(message) = envelope.error.message {
                return (message, envelope.error.details.unwrap_or_default());
            }
        }
        if let Ok(flat) = serde_json::from_str::<FlatError>(body) {
            return (flat.message, flat.errors.unwrap_or_default());
        }
        (Self::truncate_body(body), HashMap::new())
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let (message, details) = Self::parse_body(body);
        match status.as_u16() {
            401 => {
                let message = if message.is_empty() {
                    "Unauthorized - session may have expired".to_string()
                } else {
                    message
                };
                ApiError::Unauthorized(message)
            }
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            422 => ApiError::Validation { message, details },
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }

    /// True for authentication failures (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// HTTP status this error was built from, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            ApiError::AccessDenied(_) => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::Validation { .. } => Some(StatusCode::UNPROCESSABLE_ENTITY),
            ApiError::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }
}
