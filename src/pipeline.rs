//! The posting pipeline
//!
//! A run is a single pass: select the postable bird photos, pick one at
//! random, compose its caption, make sure the image exists in the local
//! cache, publish it, then write the new posting timestamps back to the
//! store. There is no retry; a failed run leaves the store untouched and
//! the next scheduled run starts fresh.

use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{BirbybotError, Result};
use crate::media;
use crate::publisher::Publisher;
use crate::shortlink;
use crate::store::PhotoStore;
use crate::types::PhotoRecord;

/// Hashtag appended to every message
pub const HASHTAG: &str = "#birbybot";

/// Pick one photo uniformly at random.
///
/// An empty candidate set is fatal for the run.
pub fn pick_photo(photos: &[PhotoRecord]) -> Result<&PhotoRecord> {
    photos
        .choose(&mut rand::thread_rng())
        .ok_or(BirbybotError::NoCandidates)
}

/// Caption for a photo: "{title} by {photographer} {shortlink} #birbybot"
pub fn compose_message(photo: &PhotoRecord) -> Result<String> {
    let source_id = photo.source_id().ok_or_else(|| {
        BirbybotError::InvalidRecord(format!(
            "photo name '{}' has no source id segment",
            photo.name
        ))
    })?;
    let link = shortlink::shortlink(source_id)?;

    let message = format!("{} by {} {} {}", photo.title, photo.ownername, link, HASHTAG);
    debug!("Composed message: {}", message);
    Ok(message)
}

/// Run the pipeline once, end to end
pub async fn run(config: &Config, store: &PhotoStore, publisher: &dyn Publisher) -> Result<()> {
    let cutoff = chrono::Utc::now() - chrono::Duration::days(config.posting.cooldown_days);
    info!(
        "Selecting bird photos not posted since {}",
        cutoff.format("%Y-%m-%d")
    );

    let candidates = store.select_postable(Some(cutoff.timestamp())).await?;
    info!("Retrieved {} postable photos", candidates.len());

    let photo = pick_photo(&candidates)?;
    info!("Posting {}", photo.name);

    let message = compose_message(photo)?;
    let image = media::ensure_local_copy(&config.cache_dir(), photo).await?;

    let status_id = publisher.publish(&message, &image).await?;
    info!(
        "Published {} as {} status {}",
        photo.name,
        publisher.name(),
        status_id
    );

    // TODO: use the created_at timestamp from the publish response for
    // last_posted once the publisher surfaces it.
    let now = chrono::Utc::now().timestamp();
    let mut updated = photo.clone();
    updated.mark_posted(now);
    store.upsert_photos(std::slice::from_ref(&updated)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_photo() -> PhotoRecord {
        PhotoRecord {
            name: "Flickr-12345".to_string(),
            title: "Sanderling at dawn".to_string(),
            ownername: "shorebird_sue".to_string(),
            download_url: "https://live.example.com/12345.jpg".to_string(),
            is_bird: true,
            last_posted: None,
            updated_at: 0,
        }
    }

    #[test]
    fn test_pick_photo_from_empty_set_is_fatal() {
        let result = pick_photo(&[]);
        match result {
            Err(BirbybotError::NoCandidates) => {}
            other => panic!("Expected NoCandidates, got {:?}", other),
        }
        assert_eq!(pick_photo(&[]).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn test_pick_photo_returns_a_member() {
        let photos: Vec<PhotoRecord> = (0..5)
            .map(|i| {
                let mut photo = sample_photo();
                photo.name = format!("Flickr-{}", i);
                photo
            })
            .collect();

        for _ in 0..20 {
            let picked = pick_photo(&photos).unwrap();
            assert!(photos.iter().any(|p| p.name == picked.name));
        }
    }

    #[test]
    fn test_pick_photo_with_single_candidate() {
        let photos = vec![sample_photo()];
        let picked = pick_photo(&photos).unwrap();
        assert_eq!(picked.name, "Flickr-12345");
    }

    #[test]
    fn test_compose_message_format() {
        let message = compose_message(&sample_photo()).unwrap();
        assert_eq!(
            message,
            "Sanderling at dawn by shorebird_sue https://flic.kr/p/4ER #birbybot"
        );
    }

    #[test]
    fn test_compose_message_ends_with_hashtag() {
        let message = compose_message(&sample_photo()).unwrap();
        assert!(message.ends_with(HASHTAG));
    }

    #[test]
    fn test_compose_message_rejects_name_without_separator() {
        let mut photo = sample_photo();
        photo.name = "36092472285".to_string();

        let result = compose_message(&photo);
        match result {
            Err(BirbybotError::InvalidRecord(msg)) => {
                assert!(msg.contains("36092472285"));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_compose_message_rejects_non_numeric_source_id() {
        let mut photo = sample_photo();
        photo.name = "Flickr-not-a-number".to_string();

        let result = compose_message(&photo);
        assert!(matches!(result, Err(BirbybotError::InvalidRecord(_))));
    }
}
