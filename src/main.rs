//! birbybot - posts a beach bird photo to the Fediverse
//!
//! Runs the pipeline exactly once and exits; scheduling is left to cron
//! or a systemd timer. The binary takes no arguments: behavior comes from
//! the config file and credentials from the environment.

use birbybot::publisher::mastodon::MastodonPublisher;
use birbybot::{logging, pipeline, Config, Credentials, PhotoStore, Result};
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init_default();

    // Run the main logic and handle errors
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> Result<()> {
    let config = Config::load_or_default()?;

    // Credentials are validated before anything has side effects
    let credentials = Credentials::from_env()?;
    let publisher = MastodonPublisher::new(credentials)?;

    let store = PhotoStore::connect(&config.store.path).await?;

    pipeline::run(&config, &store, &publisher).await?;

    info!("Run complete");
    Ok(())
}
