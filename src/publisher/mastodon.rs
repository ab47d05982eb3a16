//! Mastodon publishing
//!
//! Posts to Mastodon and other Fediverse servers that implement the
//! Mastodon API, using the megalodon library. Publishing is two API
//! calls: upload the image, then create a status that references the
//! returned media id.

use async_trait::async_trait;
use megalodon::{Megalodon, SNS};
use std::path::Path;
use tracing::{debug, error, info};

use crate::error::{PlatformError, Result};
use crate::publisher::{Credentials, Publisher};

pub struct MastodonPublisher {
    /// The megalodon client for API interactions
    client: Box<dyn Megalodon + Send + Sync>,

    /// The instance URL (e.g., "https://mastodon.social")
    base_url: String,
}

impl MastodonPublisher {
    /// Create a new Mastodon publisher from validated credentials
    pub fn new(credentials: Credentials) -> Result<Self> {
        // Ensure instance URL has a scheme
        let base_url = if credentials.base_url.starts_with("http://")
            || credentials.base_url.starts_with("https://")
        {
            credentials.base_url.clone()
        } else {
            format!("https://{}", credentials.base_url)
        };

        let client = megalodon::generator(
            SNS::Mastodon,
            base_url.clone(),
            Some(credentials.access_token),
            None,
        )
        .map_err(|e| {
            PlatformError::Authentication(format!("Failed to create Mastodon client: {:?}", e))
        })?;

        Ok(Self { client, base_url })
    }

    async fn upload_image(&self, image: &Path) -> Result<String> {
        let response = self
            .client
            .upload_media(image.to_string_lossy().to_string(), None)
            .await
            .map_err(|e| {
                let mapped = map_megalodon_error(e, PublishStep::Upload);
                error!("Media upload of {} failed: {}", image.display(), mapped);
                mapped
            })?;

        let media_id = match response.json {
            megalodon::entities::UploadMedia::Attachment(attachment) => attachment.id,
            megalodon::entities::UploadMedia::AsyncAttachment(attachment) => {
                // The instance is still processing the upload; the id is
                // already valid for attaching to a status.
                debug!("Instance returned async attachment {}", attachment.id);
                attachment.id
            }
        };

        Ok(media_id)
    }
}

#[async_trait]
impl Publisher for MastodonPublisher {
    async fn publish(&self, message: &str, image: &Path) -> Result<String> {
        let media_id = self.upload_image(image).await?;
        debug!("Uploaded {} as media {}", image.display(), media_id);

        let options = megalodon::megalodon::PostStatusInputOptions {
            media_ids: Some(vec![media_id]),
            ..Default::default()
        };

        let response = self
            .client
            .post_status(message.to_string(), Some(&options))
            .await
            .map_err(|e| {
                let mapped = map_megalodon_error(e, PublishStep::Post);
                error!("Posting to {} failed: {}", self.base_url, mapped);
                mapped
            })?;

        let status_id = match response.json {
            megalodon::megalodon::PostStatusOutput::Status(status) => status.id,
            megalodon::megalodon::PostStatusOutput::ScheduledStatus(scheduled) => scheduled.id,
        };

        info!("Posted status {} to {}", status_id, self.base_url);
        Ok(status_id)
    }

    fn name(&self) -> &str {
        "mastodon"
    }
}

#[derive(Clone, Copy)]
enum PublishStep {
    Upload,
    Post,
}

impl PublishStep {
    fn describe(self) -> &'static str {
        match self {
            PublishStep::Upload => "media upload",
            PublishStep::Post => "status post",
        }
    }
}

fn map_megalodon_error(error: megalodon::error::Error, step: PublishStep) -> PlatformError {
    classify_failure(
        format!("Mastodon {} failed: {}", step.describe(), error),
        step,
    )
}

/// Classify an API failure into our platform error variants.
///
/// megalodon surfaces HTTP failures as message strings, so this leans on
/// status codes and keywords in the text.
fn classify_failure(message: String, step: PublishStep) -> PlatformError {
    let lower = message.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("401") || has("403") || has("unauthorized") || has("forbidden") {
        PlatformError::Authentication(message)
    } else if has("429") || has("rate limit") || has("too many requests") {
        PlatformError::RateLimit(message)
    } else if has("timed out") || has("connect") || has("dns") || has("502") || has("503") {
        PlatformError::Network(message)
    } else {
        match step {
            PublishStep::Upload => PlatformError::Upload(message),
            PublishStep::Post => PlatformError::Posting(message),
        }
    }
}
