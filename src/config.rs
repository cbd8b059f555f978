//! Uploader configuration
//!
//! Endpoint, access key and timeout are fixed for the lifetime of an
//! uploader and are normally read from the environment (or a `.env` file).

use crate::{Error, Result};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://freeimage.host/api/1/upload";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub const API_KEY_VAR: &str = "FREEIMAGE_API_KEY";
pub const ENDPOINT_VAR: &str = "FREEIMAGE_ENDPOINT";
pub const TIMEOUT_VAR: &str = "FREEIMAGE_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl UploaderConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Load configuration from the process environment, reading `.env` first
    /// when one exists.
    pub fn from_env() -> Result<Self> {
        load_dotenv()?;
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} not set", API_KEY_VAR)))?;

        let endpoint = lookup(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            endpoint,
            api_key,
            timeout,
        })
    }
}

/// Merge `.env` into the process environment. A missing file is fine.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        Error::Config(format!(
            "{} must be a whole number of seconds, got '{}'",
            TIMEOUT_VAR, raw
        ))
    })?;

    if secs == 0 {
        return Err(Error::Config(format!("{} must be greater than zero", TIMEOUT_VAR)));
    }

    Ok(Duration::from_secs(secs))
}

// Keeps the access key out of logs.
impl fmt::Debug for UploaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploaderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
