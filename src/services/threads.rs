// src/services/threads.rs

//! Per-series discussion threads.

use crate::models::{Announcement, fold_title};
use crate::services::ThreadDirectory;

/// A resolved parent channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadParent {
    pub channel_id: u64,
    /// Guild hosting the channel
    pub guild_id: u64,
    /// Whether new threads may be opened here (text channels only)
    pub accepts_new_threads: bool,
}

/// A thread as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadInfo {
    pub id: u64,
    pub name: String,
    pub parent_id: Option<u64>,
}

impl ThreadInfo {
    fn matches(&self, folded_title: &str) -> bool {
        fold_title(&self.name) == folded_title
    }
}

/// Find the thread named after `title` under `parent_id`, or create it.
///
/// Looks at loaded threads, then the guild's active threads, then the most
/// recent `archived_limit` archived threads. Creating posts `intro` in the
/// parent and opens the thread on it; parents that do not accept new threads
/// are searched but never created in. Every failure is logged and yields
/// `None`.
pub async fn resolve_or_create<D>(
    directory: &D,
    parent_id: u64,
    archived_limit: u64,
    title: &str,
    intro: &Announcement,
) -> Option<ThreadInfo>
where
    D: ThreadDirectory + ?Sized,
{
    if parent_id == 0 || title.trim().is_empty() {
        return None;
    }

    let parent = match directory.resolve_parent(parent_id).await {
        Ok(parent) => parent,
        Err(e) => {
            log::warn!("Thread parent {} unavailable: {}", parent_id, e);
            return None;
        }
    };
    let wanted = fold_title(title);

    match directory.loaded_threads(&parent).await {
        Ok(threads) => {
            if let Some(found) = threads.into_iter().find(|t| t.matches(&wanted)) {
                return Some(found);
            }
        }
        Err(e) => log::warn!("Loaded thread lookup failed for {}: {}", title, e),
    }

    match directory.active_threads(&parent).await {
        Ok(threads) => {
            if let Some(found) = threads
                .into_iter()
                .find(|t| t.parent_id == Some(parent.channel_id) && t.matches(&wanted))
            {
                return Some(found);
            }
        }
        Err(e) => log::warn!("Active thread lookup failed for {}: {}", title, e),
    }

    match directory.archived_threads(&parent, archived_limit).await {
        Ok(threads) => {
            if let Some(found) = threads.into_iter().find(|t| t.matches(&wanted)) {
                return Some(found);
            }
        }
        Err(e) => log::warn!("Archived thread lookup failed for {}: {}", title, e),
    }

    if !parent.accepts_new_threads {
        log::warn!(
            "No thread for {} and parent {} does not accept new threads",
            title,
            parent_id
        );
        return None;
    }

    match directory.create_thread(&parent, title, intro).await {
        Ok(thread) => {
            log::info!("Created series thread: {}", title);
            Some(thread)
        }
        Err(e) => {
            log::warn!("Thread creation failed for {}: {}", title, e);
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{FakeDirectory, thread};
    use super::*;

    const PARENT: u64 = 55;

    fn intro() -> Announcement {
        Announcement::new("📚 Moon Knight", "intro", 0)
    }

    #[tokio::test]
    async fn test_disabled_when_parent_is_zero() {
        let dir = FakeDirectory::new();
        assert!(resolve_or_create(&dir, 0, 100, "Moon Knight", &intro()).await.is_none());
        assert!(dir.created_names().is_empty());
    }

    #[tokio::test]
    async fn test_loaded_thread_matches_case_insensitively() {
        let mut dir = FakeDirectory::new();
        dir.loaded = vec![thread(1, "moon knight", PARENT)];
        dir.active = vec![thread(2, "Moon Knight", PARENT)];

        let found = resolve_or_create(&dir, PARENT, 100, "Moon Knight", &intro()).await;
        assert_eq!(found.map(|t| t.id), Some(1));
    }

    #[tokio::test]
    async fn test_active_thread_must_share_parent() {
        let mut dir = FakeDirectory::new();
        dir.active = vec![
            thread(2, "Moon Knight", 999),
            thread(3, "MOON KNIGHT", PARENT),
        ];

        let found = resolve_or_create(&dir, PARENT, 100, "Moon Knight", &intro()).await;
        assert_eq!(found.map(|t| t.id), Some(3));
    }

    #[tokio::test]
    async fn test_archived_thread_found_with_limit() {
        let mut dir = FakeDirectory::new();
        dir.archived = vec![thread(4, "Moon Knight", PARENT)];

        let found = resolve_or_create(&dir, PARENT, 100, "Moon Knight", &intro()).await;
        assert_eq!(found.map(|t| t.id), Some(4));
        assert_eq!(*dir.archived_limits.lock().unwrap(), vec![100]);
        assert!(dir.created_names().is_empty());
    }

    #[tokio::test]
    async fn test_creates_when_nothing_matches() {
        let mut dir = FakeDirectory::new();
        dir.loaded = vec![thread(1, "Other", PARENT)];

        let found = resolve_or_create(&dir, PARENT, 100, "Moon Knight", &intro()).await;
        let created = found.unwrap();
        assert_eq!(created.name, "Moon Knight");
        assert_eq!(created.parent_id, Some(PARENT));
        assert_eq!(dir.created_names(), vec!["Moon Knight"]);
        assert_eq!(dir.created.lock().unwrap()[0].1.title, "📚 Moon Knight");
    }

    #[tokio::test]
    async fn test_non_text_parent_is_searched_but_not_created_in() {
        let mut dir = FakeDirectory::new();
        dir.parent_is_text = false;
        dir.archived = vec![thread(4, "Moon Knight", PARENT)];

        let found = resolve_or_create(&dir, PARENT, 100, "Moon Knight", &intro()).await;
        assert_eq!(found.map(|t| t.id), Some(4));

        let found = resolve_or_create(&dir, PARENT, 100, "Solo", &intro()).await;
        assert!(found.is_none());
        assert!(dir.created_names().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failures_fall_through_to_creation() {
        let mut dir = FakeDirectory::new();
        dir.fail_lookups = true;

        let found = resolve_or_create(&dir, PARENT, 100, "Moon Knight", &intro()).await;
        assert!(found.is_some());
        assert_eq!(dir.created_names().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_yield_none() {
        let mut dir = FakeDirectory::new();
        dir.fail_create = true;
        assert!(resolve_or_create(&dir, PARENT, 100, "Moon Knight", &intro()).await.is_none());

        let mut dir = FakeDirectory::new();
        dir.parent_ok = false;
        assert!(resolve_or_create(&dir, PARENT, 100, "Moon Knight", &intro()).await.is_none());
    }
}
