//! Search failures

use thiserror::Error;

/// Message shown when the service gives no reason for a failure
pub const FALLBACK_MESSAGE: &str = "Something went wrong!";

/// Failure of a single search request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The service could not be reached
    #[error("network error: {0}")]
    Network(String),

    /// The service rejected the request
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Validation { message: Option<String> },
}

impl SearchError {
    /// Message suitable for showing next to the search box
    ///
    /// Uses the service-provided message when there is one.
    pub fn display_message(&self) -> &str {
        match self {
            SearchError::Validation {
                message: Some(message),
            } if !message.trim().is_empty() => message.as_str(),
            _ => FALLBACK_MESSAGE,
        }
    }
}
