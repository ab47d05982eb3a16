//! Mock publisher for testing
//!
//! A configurable publisher that records what it was asked to post
//! instead of talking to a real platform. Used by integration tests to
//! verify the pipeline without credentials or network access.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{PlatformError, Result};
use crate::publisher::Publisher;

pub struct MockPublisher {
    name: String,

    /// Whether publishing should succeed
    publish_succeeds: bool,

    /// Error to return on publish failure
    publish_error: Option<String>,

    /// Number of times publish has been called
    publish_count: Arc<Mutex<usize>>,

    /// Messages and image paths that were published (for verification)
    published: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl MockPublisher {
    /// Create a mock publisher that always succeeds
    pub fn success(name: &str) -> Self {
        Self {
            name: name.to_string(),
            publish_succeeds: true,
            publish_error: None,
            publish_count: Arc::new(Mutex::new(0)),
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock publisher that fails every publish
    pub fn failure(name: &str, error: &str) -> Self {
        Self {
            publish_succeeds: false,
            publish_error: Some(error.to_string()),
            ..Self::success(name)
        }
    }

    /// Get the number of times publish was called
    pub fn publish_count(&self) -> usize {
        *self.publish_count.lock().unwrap()
    }

    /// Get everything that was published
    pub fn published(&self) -> Vec<(String, PathBuf)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, message: &str, image: &Path) -> Result<String> {
        *self.publish_count.lock().unwrap() += 1;

        if self.publish_succeeds {
            self.published
                .lock()
                .unwrap()
                .push((message.to_string(), image.to_path_buf()));

            let status_id = format!("{}:mock-{}", self.name, uuid::Uuid::new_v4());
            Ok(status_id)
        } else {
            let error_msg = self
                .publish_error
                .clone()
                .unwrap_or_else(|| "Mock publish failed".to_string());
            Err(PlatformError::Posting(error_msg).into())
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_success() {
        let publisher = MockPublisher::success("test");

        assert_eq!(publisher.name(), "test");

        let status_id = publisher
            .publish("Hello birds", Path::new("/tmp/photo.jpg"))
            .await
            .unwrap();
        assert!(status_id.starts_with("test:mock-"));
        assert_eq!(publisher.publish_count(), 1);

        let published = publisher.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "Hello birds");
        assert_eq!(published[0].1, PathBuf::from("/tmp/photo.jpg"));
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let publisher = MockPublisher::failure("test", "Server exploded");

        let result = publisher
            .publish("Hello birds", Path::new("/tmp/photo.jpg"))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Server exploded"));

        // Failed publishes are counted but not recorded
        assert_eq!(publisher.publish_count(), 1);
        assert!(publisher.published().is_empty());
    }
}
