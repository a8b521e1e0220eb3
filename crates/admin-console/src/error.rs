//! Console client errors.
//!
//! Failures carry a typed category instead of being sniffed out of
//! message text; `user_message` renders the inline text shown to the
//! operator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("API error: {0}")]
    Api(String),
}

impl ConsoleError {
    /// The inline message shown for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Http(e) if e.is_connect() || e.is_timeout() => {
                "Network error. Check your connection and try again.".to_string()
            }
            ConsoleError::Permission(_) => {
                "Permission denied. Check the server access configuration.".to_string()
            }
            ConsoleError::IncorrectPassword => "Incorrect password".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
