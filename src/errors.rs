//! Error taxonomy shared across the application.
//!
//! Errors from asynchronous operations are caught at the point of dispatch
//! and routed to the notification surface; none terminate the process except
//! a failure to establish the initial transport connection.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A feed could not be fetched or parsed. Never retried automatically;
    /// the previously loaded catalog stays on screen.
    #[error("feed error: {reason}")]
    Fetch { reason: String },

    /// A remote transport command failed or the connection dropped.
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// A stale selection referenced an entry no longer present. Recoverable:
    /// callers fall back to index 0 or treat it as nothing-to-act-on.
    #[error("entry no longer present")]
    NotFound,
}

impl AppError {
    pub fn fetch(reason: impl Into<String>) -> Self {
        AppError::Fetch { reason: reason.into() }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        AppError::Transport { reason: reason.into() }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::transport(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::fetch(e.to_string())
    }
}

impl From<rss::Error> for AppError {
    fn from(e: rss::Error) -> Self {
        AppError::fetch(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
