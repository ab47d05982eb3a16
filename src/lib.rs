//! Birbybot - posts a beach bird photo to the Fediverse
//!
//! This library holds the pipeline behind the `birbybot` binary: photo
//! record storage, caption composition, a local image cache, and the
//! Mastodon publishing client.

pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod pipeline;
pub mod publisher;
pub mod shortlink;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{BirbybotError, Result};
pub use publisher::{Credentials, Publisher};
pub use store::PhotoStore;
pub use types::PhotoRecord;
