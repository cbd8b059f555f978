//! Uploader for freeimage.host-style image hosting
//!
//! Takes raw image bytes, posts them base64-encoded to the hosting API and
//! returns the public URL, or an explicit failure describing what went wrong.

pub mod config;
pub mod error;
pub mod mime;
pub mod models;
pub mod uploader;

pub use config::UploaderConfig;
pub use error::{Error, Result};
pub use models::UploadOutcome;
pub use uploader::{FreeimageClient, ImageUploader};
