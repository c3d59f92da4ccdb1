//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Discord credentials and channels
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Catalog feed location and fetch behavior
    #[serde(default)]
    pub feed: FeedConfig,

    /// Polling loop settings
    #[serde(default)]
    pub poll: PollConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override Discord settings from environment-style lookups.
    ///
    /// Recognized keys: `DISCORD_TOKEN`, `CHANNEL_ID`, `SERIES_THREAD_CHANNEL_ID`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            self.discord.token = token;
        }
        if let Some(raw) = lookup("CHANNEL_ID") {
            self.discord.channel_id = parse_channel_id("CHANNEL_ID", &raw)?;
        }
        if let Some(raw) = lookup("SERIES_THREAD_CHANNEL_ID") {
            self.discord.thread_parent_id = parse_channel_id("SERIES_THREAD_CHANNEL_ID", &raw)?;
        }
        Ok(())
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.feed.user_agent.trim().is_empty() {
            return Err(AppError::validation("feed.user_agent is empty"));
        }
        if self.feed.timeout_secs == 0 {
            return Err(AppError::validation("feed.timeout_secs must be > 0"));
        }
        if self.feed.freshness_secs == 0 {
            return Err(AppError::validation("feed.freshness_secs must be > 0"));
        }
        if self.poll.interval_secs == 0 {
            return Err(AppError::validation("poll.interval_secs must be > 0"));
        }
        if self.discord.command_prefix.trim().is_empty() {
            return Err(AppError::validation("discord.command_prefix is empty"));
        }
        for (key, value) in [
            ("feed.csv_url", &self.feed.csv_url),
            ("feed.base_url", &self.feed.base_url),
            ("feed.cdn_base", &self.feed.cdn_base),
        ] {
            Url::parse(value)
                .map_err(|e| AppError::validation(format!("{key} is not a valid URL: {e}")))?;
        }
        Ok(())
    }

    /// Validate everything needed to connect to Discord.
    pub fn validate_for_run(&self) -> Result<()> {
        self.validate()?;
        if self.discord.token.trim().is_empty() {
            return Err(AppError::config("DISCORD_TOKEN is not set"));
        }
        if self.discord.channel_id == 0 {
            return Err(AppError::config("CHANNEL_ID is not set"));
        }
        Ok(())
    }
}

fn parse_channel_id(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("{key} must be a numeric channel id, got {raw:?}")))
}

/// Discord connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token
    #[serde(default)]
    pub token: String,

    /// Channel receiving chapter announcements
    #[serde(default)]
    pub channel_id: u64,

    /// Text channel hosting per-series threads (0 disables threads)
    #[serde(default)]
    pub thread_parent_id: u64,

    /// Prefix for text commands
    #[serde(default = "defaults::command_prefix")]
    pub command_prefix: String,

    /// "Playing" status shown on the bot profile
    #[serde(default = "defaults::activity")]
    pub activity: String,
}

impl DiscordConfig {
    /// Whether per-series threads are enabled.
    pub fn threads_enabled(&self) -> bool {
        self.thread_parent_id != 0
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            channel_id: 0,
            thread_parent_id: 0,
            command_prefix: defaults::command_prefix(),
            activity: defaults::activity(),
        }
    }
}

/// Catalog feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// URL of the CSV catalog
    #[serde(default = "defaults::csv_url")]
    pub csv_url: String,

    /// Reader site base URL used for deep links
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// CDN base for relative cover paths
    #[serde(default = "defaults::cdn_base")]
    pub cdn_base: String,

    /// Prefix stripped from relative cover paths
    #[serde(default = "defaults::cover_prefix")]
    pub cover_prefix: String,

    /// User-Agent header for feed requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// How long a fetched catalog is reused, in seconds
    #[serde(default = "defaults::freshness")]
    pub freshness_secs: u64,
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            csv_url: defaults::csv_url(),
            base_url: defaults::base_url(),
            cdn_base: defaults::cdn_base(),
            cover_prefix: defaults::cover_prefix(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            freshness_secs: defaults::freshness(),
        }
    }
}

/// Polling loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between two chapter checks
    #[serde(default = "defaults::interval")]
    pub interval_secs: u64,

    /// Pause between two outbound messages in milliseconds
    #[serde(default = "defaults::send_delay")]
    pub send_delay_ms: u64,

    /// How many archived threads to scan when looking for a series thread
    #[serde(default = "defaults::archived_thread_limit")]
    pub archived_thread_limit: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::interval(),
            send_delay_ms: defaults::send_delay(),
            archived_thread_limit: defaults::archived_thread_limit(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Discord defaults
    pub fn command_prefix() -> String {
        "++".into()
    }
    pub fn activity() -> String {
        "Manga Okuyor...".into()
    }

    // Feed defaults
    pub fn csv_url() -> String {
        "https://zebzetoon.vercel.app/liste.csv".into()
    }
    pub fn base_url() -> String {
        "https://zebzetoon.vercel.app".into()
    }
    pub fn cdn_base() -> String {
        "https://cdn.jsdelivr.net/gh/toonarc/kapaklar/".into()
    }
    pub fn cover_prefix() -> String {
        "kapaklar/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; toonbell/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn freshness() -> u64 {
        300
    }

    // Poll defaults
    pub fn interval() -> u64 {
        600
    }
    pub fn send_delay() -> u64 {
        500
    }
    pub fn archived_thread_limit() -> u64 {
        100
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.feed.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = Config::default();
        config.poll.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut config = Config::default();
        config.feed.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_for_run_requires_token_and_channel() {
        let mut config = Config::default();
        assert!(config.validate_for_run().is_err());

        config.discord.token = "secret".to_string();
        assert!(config.validate_for_run().is_err());

        config.discord.channel_id = 42;
        assert!(config.validate_for_run().is_ok());
    }

    #[test]
    fn apply_env_overrides_discord_settings() {
        let vars = env(&[
            ("DISCORD_TOKEN", "abc"),
            ("CHANNEL_ID", "123"),
            ("SERIES_THREAD_CHANNEL_ID", "456"),
        ]);
        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.discord.channel_id, 123);
        assert_eq!(config.discord.thread_parent_id, 456);
        assert!(config.discord.threads_enabled());
    }

    #[test]
    fn apply_env_rejects_non_numeric_channel() {
        let vars = env(&[("CHANNEL_ID", "general")]);
        let mut config = Config::default();
        assert!(config.apply_env(|key| vars.get(key).cloned()).is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [discord]
            channel_id = 7

            [poll]
            interval_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.discord.channel_id, 7);
        assert_eq!(config.discord.command_prefix, "++");
        assert_eq!(config.poll.interval_secs, 60);
        assert_eq!(config.poll.archived_thread_limit, 100);
        assert_eq!(config.feed.freshness_secs, 300);
        assert!(!config.discord.threads_enabled());
    }
}
