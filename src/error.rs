//! Error types for birbybot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BirbybotError>;

#[derive(Error, Debug)]
pub enum BirbybotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("No postable photos matched the query")]
    NoCandidates,

    #[error("Invalid photo record: {0}")]
    InvalidRecord(String),
}

impl BirbybotError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BirbybotError::NoCandidates => 3,
            BirbybotError::InvalidRecord(_) => 3,
            BirbybotError::Platform(PlatformError::Authentication(_)) => 2,
            BirbybotError::Platform(_) => 1,
            BirbybotError::Config(_) => 1,
            BirbybotError::Store(_) => 1,
            BirbybotError::Media(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store operation failed: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Media upload failed: {0}")]
    Upload(String),

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
}
