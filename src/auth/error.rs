use thiserror::Error;

use crate::error::ServerError;

/// Errors from the authentication subsystem.
///
/// Invalid or expired credentials are not errors; validation reports those
/// as `None` values. These variants cover environment failures: unreadable
/// storage, a corrupt credential file, or collaborators (browser, cookie
/// store) that cannot be reached.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incomplete credential record: {0}")]
    IncompleteRecord(String),
    #[error("Malformed credential file at {path}: {message}")]
    MalformedFile { path: String, message: String },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),
    #[error("Cookie extraction failed: {0}")]
    CookieExtraction(String),
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<AuthError> for ServerError {
    fn from(error: AuthError) -> Self {
        ServerError::Authentication(error.to_string())
    }
}
