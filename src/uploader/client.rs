use super::ImageUploader;
use crate::config::UploaderConfig;
use crate::mime;
use crate::models::{UploadOutcome, UploadRequest, UploadResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Uploader for the freeimage.host v1 API (and anything speaking its shape).
#[derive(Clone)]
pub struct FreeimageClient {
    client: Client,
    config: UploaderConfig,
}

impl FreeimageClient {
    pub fn new(config: UploaderConfig) -> Self {
        Self::new_with_client(config, Client::new())
    }

    /// Share an existing connection pool. The configured timeout is applied
    /// per request, so the client's own settings do not need to match.
    pub fn new_with_client(config: UploaderConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            tracing::error!(
                "Upload to {} timed out after {:?}",
                self.config.endpoint,
                self.config.timeout
            );
            Error::Timeout(self.config.timeout)
        } else {
            tracing::error!("Failed to send upload request: {}", e);
            Error::Http(e)
        }
    }

    async fn try_upload(&self, image_bytes: &[u8]) -> Result<String> {
        let request = UploadRequest::new(&self.config.api_key, image_bytes);

        let response = self
            .client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .form(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!("Upload response (status {}): {}", status, body);

        if !status.is_success() {
            // Error bodies usually still carry the JSON envelope.
            let status_txt = UploadResponse::parse(&body)
                .ok()
                .and_then(|parsed| parsed.status_txt().map(str::to_string));

            return Err(match status_txt {
                Some(message) => Error::Rejected(message),
                None => Error::Status {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string(),
                },
            });
        }

        let parsed = UploadResponse::parse(&body).map_err(|e| {
            tracing::error!("Failed to parse upload response: {}\nBody: {}", e, body);
            e
        })?;

        parsed.into_url()
    }
}

#[async_trait]
impl ImageUploader for FreeimageClient {
    async fn upload(&self, image_bytes: &[u8]) -> UploadOutcome {
        tracing::info!(
            "Uploading {} bytes ({}) to {}",
            image_bytes.len(),
            mime::describe(image_bytes),
            self.config.endpoint
        );

        let outcome = UploadOutcome::from(self.try_upload(image_bytes).await);

        match &outcome {
            UploadOutcome::Success { url } => tracing::info!("Image uploaded: {}", url),
            UploadOutcome::Failure { kind, message } => {
                tracing::error!("Image upload failed ({:?}): {}", kind, message)
            }
        }

        outcome
    }
}
