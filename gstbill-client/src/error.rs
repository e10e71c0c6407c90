//! Client error types
//!
//! The taxonomy keeps three failure shapes apart because the UI words
//! them differently: transport failures ("cannot connect"), bodies that
//! are not JSON at all ("server error" with the raw text for
//! diagnostics), and well-formed rejections (surfaced verbatim).

use thiserror::Error;

/// How much of a non-JSON body to keep for diagnostics
const BODY_SNIPPET_LEN: usize = 200;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure, server likely unreachable
    #[error("cannot connect to server: {0}")]
    Connect(String),

    /// Session missing or expired
    #[error("authentication required")]
    Unauthorized,

    /// Response body was not valid JSON
    #[error("server error ({status}): {body}")]
    MalformedResponse { status: u16, body: String },

    /// Well-formed `{success: false, error}` response
    #[error("{0}")]
    Rejected(String),

    /// Non-success HTTP status with a readable error body
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Build a malformed-response error, truncating the body snippet
    pub fn malformed(status: u16, body: &str) -> Self {
        ClientError::MalformedResponse {
            status,
            body: truncate_body(body),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Connect(err.to_string())
    }
}

/// Truncate a raw response body on a char boundary
pub fn truncate_body(body: &str) -> String {
    if body.chars().count() <= BODY_SNIPPET_LEN {
        body.to_string()
    } else {
        body.chars().take(BODY_SNIPPET_LEN).collect()
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
