use super::ImageUploader;
use crate::models::UploadOutcome;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// In-memory uploader for callers' tests. Queued outcomes are replayed in
/// order; once the queue is empty every upload succeeds with a generated URL.
#[derive(Clone)]
pub struct MockUploader {
    outcomes: Arc<Mutex<VecDeque<UploadOutcome>>>,
    uploads: Arc<Mutex<Vec<Vec<u8>>>>,
    base_url: String,
}

impl MockUploader {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            uploads: Arc::new(Mutex::new(Vec::new())),
            base_url: "https://mock-host.example.com".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_outcome(self, outcome: UploadOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.with_outcome(UploadOutcome::rejected(message))
    }

    pub fn get_upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn get_uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Default for MockUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageUploader for MockUploader {
    async fn upload(&self, image_bytes: &[u8]) -> UploadOutcome {
        let index = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(image_bytes.to_vec());
            uploads.len()
        };

        let queued = self.outcomes.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| UploadOutcome::Success {
            url: format!("{}/{}.png", self.base_url, index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_success() {
        let uploader = MockUploader::new();

        let first = uploader.upload(b"one").await;
        let second = uploader.upload(b"two").await;

        assert_eq!(first.url(), Some("https://mock-host.example.com/1.png"));
        assert_eq!(second.url(), Some("https://mock-host.example.com/2.png"));
        assert_eq!(uploader.get_upload_count(), 2);
        assert_eq!(uploader.get_uploads()[1], b"two".to_vec());
    }

    #[tokio::test]
    async fn test_mock_replays_queued_outcomes() {
        let uploader = MockUploader::new()
            .with_base_url("https://img.test".to_string())
            .with_failure("quota exceeded");

        let first = uploader.upload(b"x").await;
        assert_eq!(first.failure_message(), Some("quota exceeded"));

        let second = uploader.upload(b"y").await;
        assert_eq!(second.url(), Some("https://img.test/2.png"));
    }

    #[tokio::test]
    async fn test_mock_queue_is_fifo() {
        let uploader = MockUploader::new()
            .with_failure("first")
            .with_failure("second")
            .with_failure("third");

        for expected in ["first", "second", "third"] {
            assert_eq!(uploader.upload(b"x").await.failure_message(), Some(expected));
        }
        assert!(uploader.upload(b"x").await.is_success());
    }

    #[tokio::test]
    async fn test_upload_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.png");
        std::fs::write(&path, [0x89u8, 0x50, 0x4E, 0x47]).unwrap();

        let uploader = MockUploader::new();
        let outcome = uploader.upload_path(&path).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(uploader.get_uploads(), vec![vec![0x89, 0x50, 0x4E, 0x47]]);
    }

    #[tokio::test]
    async fn test_upload_path_missing_file_is_io_error() {
        let uploader = MockUploader::new();
        let path = std::path::PathBuf::from("/definitely/not/here.png");

        let err = uploader.upload_path(&path).await.unwrap_err();

        assert!(matches!(err, crate::Error::Io { ref path, .. } if path.ends_with("here.png")));
        assert!(err.to_string().starts_with("Failed to read /definitely/not/here.png"));
        assert_eq!(uploader.get_upload_count(), 0);
    }
}
