//! Unified error types and result handling.
//!
//! Two kinds of failure matter to callers: `Validation` errors are produced
//! locally, block submission, and never reach the network; everything else is
//! an ambient failure (transport, configuration, export) that leaves the
//! editor state intact so the user can retry. A rejected keystroke is not an
//! error at all: the field simply keeps its previous value.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A local pre-submit check failed. Never causes a network call.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never completed (connect, timeout, body decode).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a validation failure with a user-visible message.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
