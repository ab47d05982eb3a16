//! Local image cache
//!
//! Publishing attaches the image from disk, so every photo gets a cached
//! copy under the cache directory before posting. A present file is
//! trusted as-is; nothing here evicts or re-validates.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{MediaError, Result};
use crate::types::PhotoRecord;

/// Cache file location for a photo record
pub fn cached_path(cache_dir: &Path, name: &str) -> PathBuf {
    cache_dir.join(format!("{}.jpg", name))
}

/// Return the cached image for a photo, downloading it first on a miss
pub async fn ensure_local_copy(cache_dir: &Path, photo: &PhotoRecord) -> Result<PathBuf> {
    let path = cached_path(cache_dir, &photo.name);

    if path.exists() {
        debug!("Cache hit for {}", photo.name);
        return Ok(path);
    }

    std::fs::create_dir_all(cache_dir).map_err(MediaError::Io)?;

    info!("Downloading {} from {}", photo.name, photo.download_url);
    let response = reqwest::get(&photo.download_url)
        .await
        .map_err(MediaError::Download)?
        .error_for_status()
        .map_err(MediaError::Download)?;

    let bytes = response.bytes().await.map_err(MediaError::Download)?;
    tokio::fs::write(&path, &bytes).await.map_err(MediaError::Io)?;

    Ok(path)
}
