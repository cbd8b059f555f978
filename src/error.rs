//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.

use crate::models::FailureKind;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse upload response: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload timed out after {0:?}")]
    Timeout(Duration),

    #[error("Upload endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The endpoint answered but did not hand back an image URL.
    #[error("Upload rejected: {0}")]
    Rejected(String),

    /// A failed outcome turned back into an error; `message` is already
    /// the full description.
    #[error("{message}")]
    Upload { kind: FailureKind, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
