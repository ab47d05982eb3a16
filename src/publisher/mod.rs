//! Publishing abstraction and implementations
//!
//! A publisher takes a finished message plus a local image file and turns
//! them into a post on a social platform. The real implementation speaks
//! the Mastodon API; the mock exists so the pipeline can be exercised
//! without credentials or network access.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{PlatformError, Result};

pub mod mastodon;

// Available in all builds (not just tests) so integration tests can drive
// the pipeline without platform credentials.
pub mod mock;

pub const ENV_BASE_URL: &str = "MASTODON_BASE_URL";
pub const ENV_CLIENT_ID: &str = "MASTODON_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "MASTODON_CLIENT_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "MASTODON_ACCESS_TOKEN";

/// Platform credentials sourced from the environment
///
/// The client id and secret identify the registered application; the
/// access token authorizes posting on the account's behalf.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub access_token: String,
}

impl Credentials {
    /// Read all four credentials from the environment.
    ///
    /// Every variable must be set and non-empty. This runs before any
    /// network or store side effect so a half-configured run fails early
    /// instead of mid-pipeline.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: require_env(ENV_BASE_URL)?,
            client_id: require_env(ENV_CLIENT_ID)?,
            client_secret: require_env(ENV_CLIENT_SECRET)?,
            access_token: require_env(ENV_ACCESS_TOKEN)?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PlatformError::Authentication(format!(
            "Missing credential environment variable {}",
            name
        ))
        .into()),
    }
}

/// Publisher trait for posting a captioned image
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish the message with the image attached.
    ///
    /// Uploads the image, then creates a status referencing it. Returns
    /// the platform-specific status id.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Upload` if the media upload fails and
    /// `PlatformError::Posting` if the status creation fails. Either way
    /// the failure is logged before it propagates; there is no retry.
    async fn publish(&self, message: &str, image: &Path) -> Result<String>;

    /// Lowercase platform identifier (e.g., "mastodon")
    fn name(&self) -> &str;
}
