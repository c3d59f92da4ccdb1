// src/error.rs

//! Unified error handling for the bot.

use std::fmt;

use thiserror::Error;

/// Result type alias for bot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (transport error or timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed answered with a non-success status
    #[error("Feed {url} answered with status {status}")]
    FeedStatus { url: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A queried title is not in the catalog
    #[error("Title not found: {0}")]
    NotFound(String),

    /// The catalog has no records
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Thread lookup or creation failed
    #[error("Thread error for {title}: {message}")]
    Thread { title: String, message: String },

    /// Discord API or gateway error
    #[cfg(feature = "discord")]
    #[error("Discord error: {0}")]
    Discord(#[from] poise::serenity_prelude::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a thread resolution error with context.
    pub fn thread(title: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Thread {
            title: title.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error came from fetching the feed.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Http(_) | Self::FeedStatus { .. })
    }
}
