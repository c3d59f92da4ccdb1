//! Service layer for the bot.
//!
//! This module contains the business logic for:
//! - Feed fetching (`FeedFetcher`)
//! - Card building (`AnnouncementFormatter`)
//! - Series thread lookup (`resolve_or_create`)
//! - Deep link recognition (`LinkPattern`)
//!
//! and the seams the chat platform plugs into (`ChatSink`, `ThreadDirectory`).

mod feed;
mod format;
mod links;
pub(crate) mod threads;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Announcement;

pub use feed::{FeedFetcher, FeedSource};
pub use format::{AnnouncementFormatter, truncate_summary};
pub use links::{LinkMatch, LinkPattern};
pub use threads::{ThreadInfo, ThreadParent, resolve_or_create};

/// Sends cards to chat channels.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Check that a channel exists and can receive messages.
    async fn check_channel(&self, channel_id: u64) -> Result<()>;

    /// Post a card to a channel (or thread).
    async fn send(&self, channel_id: u64, announcement: &Announcement) -> Result<()>;
}

/// Lists and creates threads under a parent channel.
#[async_trait]
pub trait ThreadDirectory: Send + Sync {
    /// Resolve the parent channel; fails if it is missing or outside a guild.
    async fn resolve_parent(&self, parent_id: u64) -> Result<ThreadParent>;

    /// Threads of the parent already known locally.
    async fn loaded_threads(&self, parent: &ThreadParent) -> Result<Vec<ThreadInfo>>;

    /// Active threads of the whole guild.
    async fn active_threads(&self, parent: &ThreadParent) -> Result<Vec<ThreadInfo>>;

    /// Most recent archived threads of the parent.
    async fn archived_threads(&self, parent: &ThreadParent, limit: u64) -> Result<Vec<ThreadInfo>>;

    /// Post `intro` in the parent and open a thread named `name` on it.
    async fn create_thread(
        &self,
        parent: &ThreadParent,
        name: &str,
        intro: &Announcement,
    ) -> Result<ThreadInfo>;
}

/// Everything a polling cycle needs from the chat platform.
pub trait ChatPlatform: ChatSink + ThreadDirectory {}

impl<T: ChatSink + ThreadDirectory + ?Sized> ChatPlatform for T {}
