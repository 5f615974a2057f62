// src/error.rs

//! Error types for obs-mirror
//!
//! Every failure carries a message describing what was being processed.
//! Context is added on the way up with [`Error::context`], which keeps the
//! variant so callers can still match on the kind of failure.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be built or sent, or the server answered non-200
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Listing body was not the expected XML document, or a size was not a number
    #[error("Parse error: {0}")]
    ParseError(String),

    /// stat, mkdir or create failed on the local mirror
    #[error("Filesystem error: {0}")]
    FilesystemError(String),

    /// Streaming bytes into the destination failed
    #[error("I/O error: {0}")]
    IoError(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Prefix the message with `context`, keeping the error kind
    pub fn context(self, context: impl std::fmt::Display) -> Self {
        match self {
            Self::TransportError(msg) => Self::TransportError(format!("{context}: {msg}")),
            Self::ParseError(msg) => Self::ParseError(format!("{context}: {msg}")),
            Self::FilesystemError(msg) => Self::FilesystemError(format!("{context}: {msg}")),
            Self::IoError(msg) => Self::IoError(format!("{context}: {msg}")),
            Self::ConfigError(msg) => Self::ConfigError(format!("{context}: {msg}")),
        }
    }
}
