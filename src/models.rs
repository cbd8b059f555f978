//! Data models and structures
//!
//! Defines the form body sent to the hosting endpoint, the JSON shape it
//! answers with, and the outcome handed back to callers.

use crate::{Error, Result};
use base64::Engine as _;
use serde::Serialize;
use serde_json::Value;

pub const UNKNOWN_ERROR: &str = "unknown error";

/// Form-encoded request body for the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadRequest<'a> {
    pub key: &'a str,
    pub action: &'static str,
    pub source: String,
    pub format: &'static str,
}

impl<'a> UploadRequest<'a> {
    pub fn new(key: &'a str, image_bytes: &[u8]) -> Self {
        Self {
            key,
            action: "upload",
            source: encode_source(image_bytes),
            format: "json",
        }
    }
}

/// Standard padded base64, as the endpoint expects in `source`.
pub fn encode_source(image_bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(image_bytes)
}

/// JSON body returned by the upload endpoint.
///
/// Fields are read one at a time from the raw document, so a sibling with an
/// unexpected type never hides a usable `status_txt`.
#[derive(Debug, Clone, Default)]
pub struct UploadResponse {
    body: Value,
}

impl UploadResponse {
    /// Fails only when the body is not JSON at all.
    pub fn parse(body: &str) -> Result<Self> {
        Ok(Self {
            body: serde_json::from_str(body)?,
        })
    }

    /// Accepts both `200` and `"200"`.
    pub fn status_code(&self) -> Option<u64> {
        match self.body.get("status_code")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn status_txt(&self) -> Option<&str> {
        non_blank(self.body.get("status_txt")?.as_str()?)
    }

    pub fn image_url(&self) -> Option<&str> {
        non_blank(self.body.get("image")?.get("url")?.as_str()?)
    }

    /// The hosted URL, provided the endpoint reported success.
    pub fn into_url(self) -> Result<String> {
        match (self.status_code(), self.image_url()) {
            (Some(200), Some(url)) => Ok(url.to_string()),
            _ => Err(Error::Rejected(
                self.status_txt().unwrap_or(UNKNOWN_ERROR).to_string(),
            )),
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Why an upload produced no URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, DNS or body-read fault.
    Transport,
    Timeout,
    /// Non-2xx HTTP status without a usable remote message.
    HttpStatus,
    /// The endpoint answered but reported failure or omitted the URL.
    Rejected,
    /// The body was not JSON.
    Malformed,
    Io,
    Config,
}

impl From<&Error> for FailureKind {
    fn from(error: &Error) -> Self {
        match error {
            Error::Http(_) => FailureKind::Transport,
            Error::Timeout(_) => FailureKind::Timeout,
            Error::Status { .. } => FailureKind::HttpStatus,
            Error::Rejected(_) => FailureKind::Rejected,
            Error::Serialization(_) => FailureKind::Malformed,
            Error::Io { .. } => FailureKind::Io,
            Error::Config(_) | Error::EnvVar(_) => FailureKind::Config,
            Error::Upload { kind, .. } => *kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { url: String },
    Failure { kind: FailureKind, message: String },
}

impl UploadOutcome {
    /// A failure reported by the remote service itself.
    pub fn rejected(message: impl Into<String>) -> Self {
        UploadOutcome::Failure {
            kind: FailureKind::Rejected,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UploadOutcome::Success { url } => Some(url),
            UploadOutcome::Failure { .. } => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            UploadOutcome::Success { .. } => None,
            UploadOutcome::Failure { message, .. } => Some(message),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            UploadOutcome::Success { .. } => None,
            UploadOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn into_result(self) -> Result<String> {
        match self {
            UploadOutcome::Success { url } => Ok(url),
            UploadOutcome::Failure {
                kind: FailureKind::Rejected,
                message,
            } => Err(Error::Rejected(message)),
            UploadOutcome::Failure { kind, message } => Err(Error::Upload { kind, message }),
        }
    }
}

impl From<Result<String>> for UploadOutcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(url) => UploadOutcome::Success { url },
            Err(Error::Rejected(message)) => UploadOutcome::rejected(message),
            Err(Error::Upload { kind, message }) => UploadOutcome::Failure { kind, message },
            Err(e) => UploadOutcome::Failure {
                kind: FailureKind::from(&e),
                message: e.to_string(),
            },
        }
    }
}
