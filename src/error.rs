//! Error types for the LeetCode MCP server.

use thiserror::Error;

/// Primary error type for platform and server operations.
///
/// Expected-negative outcomes (invalid credentials, judging rejections,
/// submission timeouts) are modeled as result values in their own modules,
/// not as variants here. This type covers transport, serialization, and
/// environment failures.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl ServerError {
    /// Create an API error from a status code and message body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error is a 401/403-equivalent rejection of the session,
    /// as opposed to a generic transport failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ServerError>;
