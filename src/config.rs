// src/config.rs

//! Configuration loading utilities.
//!
//! A missing config file is not an error: the bot runs on built-in defaults
//! with credentials taken from the environment.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;

/// Load configuration from `path` and apply environment overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Like [`load_config`], reading overrides through `lookup`.
pub fn load_config_with<F>(path: &Path, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if path.exists() {
        log::debug!("Loading configuration from {}", path.display());
        Config::load(path)?
    } else {
        log::warn!("Config file {} not found, using defaults", path.display());
        Config::default()
    };

    config.apply_env(|key| lookup(key).filter(|value| !value.trim().is_empty()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_missing_file_uses_defaults_and_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = load_config_with(&path, |key| match key {
            "DISCORD_TOKEN" => Some("secret".into()),
            "CHANNEL_ID" => Some("42".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.discord.token, "secret");
        assert_eq!(config.discord.channel_id, 42);
        assert_eq!(config.discord.thread_parent_id, 0);
        assert_eq!(config.poll.interval_secs, 600);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[discord]\nchannel_id = 1\nthread_parent_id = 2\n\n[poll]\ninterval_secs = 60\n",
        )
        .unwrap();

        let config = load_config_with(&path, |key| {
            (key == "SERIES_THREAD_CHANNEL_ID").then(|| "99".to_string())
        })
        .unwrap();

        assert_eq!(config.discord.channel_id, 1);
        assert_eq!(config.discord.thread_parent_id, 99);
        assert_eq!(config.poll.interval_secs, 60);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[discord]\nchannel_id = 7\n").unwrap();

        let config = load_config_with(&path, |_| Some("  ".into())).unwrap();
        assert_eq!(config.discord.channel_id, 7);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[poll]\ninterval_secs = \"often\"\n").unwrap();

        let err = load_config_with(&path, |_| None).unwrap_err();
        assert!(matches!(err, AppError::Toml(_)));
    }
}
