//! Error types shared across the converter.
//!
//! Conversion failures are terminal for a single attempt only: they end up as
//! the session's error text and the user can simply submit again.

use std::path::PathBuf;
use thiserror::Error;

/// Fallback text when a transport error carries no message of its own.
pub const GENERIC_UPLOAD_FAILURE: &str = "Upload failed";

/// Failure of one conversion request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The endpoint answered with a non-success status. The body is not read.
    #[error("Conversion failed")]
    Rejected { status: u16 },

    /// The request never completed (connection refused, reset, DNS...).
    #[error("{}", transport_message(.0))]
    Transport(String),

    #[error("Conversion timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Could not read '{}': {reason}", .path.display())]
    ReadFile { path: PathBuf, reason: String },

    /// The multipart body could not be assembled.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

fn transport_message(msg: &str) -> &str {
    if msg.trim().is_empty() {
        GENERIC_UPLOAD_FAILURE
    } else {
        msg
    }
}

impl ConvertError {
    /// Map a `reqwest` failure, keeping timeouts distinct from other transport errors.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ConvertError::Timeout { secs: timeout_secs }
        } else {
            ConvertError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("A conversion is already in progress")]
    InFlight,

    #[error("There is no converted file to download")]
    NothingToDownload,

    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Saving a converted CSV to disk failed.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to create a temporary file in '{}': {source}", .dir.display())]
    CreateTemp {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV data: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save '{}': {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubscribeError {
    #[error("Please enter a valid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Subscription failed: {0}")]
    Notify(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
