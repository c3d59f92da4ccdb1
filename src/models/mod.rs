// src/models/mod.rs

//! Domain models for the bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod announcement;
mod config;
mod record;

// Re-export all public types
pub use announcement::{Announcement, CardField, LinkButton};
pub use config::{Config, DiscordConfig, FeedConfig, LoggingConfig, PollConfig};
pub use record::{Catalog, CatalogRecord, SeriesStatus, fold_title};
