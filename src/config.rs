//! Configuration management for birbybot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Longest accepted cooldown window (100 years)
const MAX_COOLDOWN_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub posting: PostingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingConfig {
    /// Minimum days since the last publish before a photo is postable again
    pub cooldown_days: i64,
}

impl Config {
    /// Load configuration from the default location, falling back to the
    /// built-in defaults when no config file exists
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Ok(Self::default_config())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot act on sensibly
    fn validate(&self) -> Result<()> {
        let days = self.posting.cooldown_days;
        if !(1..=MAX_COOLDOWN_DAYS).contains(&days) {
            return Err(ConfigError::InvalidValue(format!(
                "posting.cooldown_days must be between 1 and {}, got {}",
                MAX_COOLDOWN_DAYS, days
            ))
            .into());
        }
        Ok(())
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            store: StoreConfig {
                path: "~/.local/share/birbybot/photos.db".to_string(),
            },
            cache: CacheConfig {
                dir: "~/.local/share/birbybot/assets".to_string(),
            },
            posting: PostingConfig { cooldown_days: 30 },
        }
    }

    /// Image cache directory with `~` expanded
    pub fn cache_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.cache.dir).to_string())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("BIRBYBOT_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("birbybot").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BirbybotError, ConfigError};
    use serial_test::serial;

    fn write_config_with_cooldown(dir: &Path, cooldown_days: i64) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            format!(
                r#"
[store]
path = "/tmp/test/photos.db"

[cache]
dir = "/tmp/test/assets"

[posting]
cooldown_days = {}
"#,
                cooldown_days
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.store.path, "~/.local/share/birbybot/photos.db");
        assert_eq!(config.cache.dir, "~/.local/share/birbybot/assets");
        assert_eq!(config.posting.cooldown_days, 30);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[store]
path = "/tmp/test/photos.db"

[cache]
dir = "/tmp/test/assets"

[posting]
cooldown_days = 7
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.store.path, "/tmp/test/photos.db");
        assert_eq!(config.cache.dir, "/tmp/test/assets");
        assert_eq!(config.posting.cooldown_days, 7);
    }

    #[test]
    fn test_load_from_path_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let result = Config::load_from_path(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path_rejects_nonpositive_cooldown() {
        let dir = tempfile::tempdir().unwrap();

        for days in [0, -5] {
            let path = write_config_with_cooldown(dir.path(), days);
            match Config::load_from_path(&path) {
                Err(BirbybotError::Config(ConfigError::InvalidValue(msg))) => {
                    assert!(msg.contains("cooldown_days"));
                }
                other => panic!("Expected InvalidValue for {} days, got {:?}", days, other),
            }
        }
    }

    #[test]
    fn test_load_from_path_rejects_oversized_cooldown() {
        let dir = tempfile::tempdir().unwrap();
        // Large enough that the cutoff arithmetic would leave chrono's range
        let path = write_config_with_cooldown(dir.path(), 200_000_000);

        let result = Config::load_from_path(&path);
        assert!(matches!(
            result,
            Err(BirbybotError::Config(ConfigError::InvalidValue(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_load_or_default_falls_back_when_config_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("BIRBYBOT_CONFIG", dir.path().join("missing.toml"));

        let config = Config::load_or_default().unwrap();
        assert_eq!(config.store.path, "~/.local/share/birbybot/photos.db");
        assert_eq!(config.cache.dir, "~/.local/share/birbybot/assets");
        assert_eq!(config.posting.cooldown_days, 30);

        std::env::remove_var("BIRBYBOT_CONFIG");
    }

    #[test]
    #[serial]
    fn test_load_or_default_reads_the_override_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_with_cooldown(dir.path(), 7);
        std::env::set_var("BIRBYBOT_CONFIG", &path);

        let config = Config::load_or_default().unwrap();
        assert_eq!(config.posting.cooldown_days, 7);

        std::env::remove_var("BIRBYBOT_CONFIG");
    }

    #[test]
    fn test_cache_dir_expands_tilde() {
        let config = Config {
            store: StoreConfig {
                path: "/tmp/photos.db".to_string(),
            },
            cache: CacheConfig {
                dir: "/tmp/assets".to_string(),
            },
            posting: PostingConfig { cooldown_days: 30 },
        };
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/assets"));

        let home_config = Config::default_config();
        let expanded = home_config.cache_dir();
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
