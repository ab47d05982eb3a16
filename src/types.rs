//! Core types for birbybot

use serde::{Deserialize, Serialize};

/// A photo record as written by the upstream ingest
///
/// The key is `<Source>-<numeric id>` (e.g. `Flickr-36092472285`). Only
/// `last_posted` and `updated_at` are mutated here; everything else is owned
/// by the ingest. Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub name: String,
    pub title: String,
    pub ownername: String,
    pub download_url: String,
    pub is_bird: bool,
    pub last_posted: Option<i64>,
    pub updated_at: i64,
}

impl PhotoRecord {
    /// The numeric id embedded in the record key, used for the shortlink
    ///
    /// Returns `None` when the key has no `<source>-<id>` shape.
    pub fn source_id(&self) -> Option<&str> {
        self.name.split_once('-').map(|(_, id)| id)
    }

    /// Stamp the record as published at `now`
    pub fn mark_posted(&mut self, now: i64) {
        self.last_posted = Some(now);
        self.updated_at = now;
    }
}
