// src/herald.rs

//! Bot state and operations shared by the polling task and chat handlers.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{Announcement, Catalog, CatalogRecord, Config};
use crate::pipeline::{ChapterEvent, FreshnessCache, ObservedChapters};
use crate::services::{
    AnnouncementFormatter, ChatPlatform, FeedFetcher, FeedSource, LinkPattern, ThreadDirectory,
    ThreadInfo, resolve_or_create,
};

/// Where announcements go.
#[derive(Debug, Clone)]
pub struct AnnounceSettings {
    /// Main announcement channel
    pub channel_id: u64,
    /// Parent of per-series threads (0 disables threads)
    pub thread_parent_id: u64,
    pub archived_thread_limit: u64,
    /// Pause between two outbound messages
    pub send_delay: Duration,
}

impl AnnounceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            channel_id: config.discord.channel_id,
            thread_parent_id: config.discord.thread_parent_id,
            archived_thread_limit: config.poll.archived_thread_limit,
            send_delay: config.poll.send_delay(),
        }
    }
}

/// Outcome of one polling cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub catalog_size: usize,
    pub events: Vec<ChapterEvent>,
    pub send_failures: usize,
}

/// Catalog cache, observed chapters and card building in one context.
pub struct Herald {
    cache: FreshnessCache,
    observed: Mutex<ObservedChapters>,
    formatter: AnnouncementFormatter,
    links: LinkPattern,
    settings: AnnounceSettings,
}

impl Herald {
    pub fn new(source: Arc<dyn FeedSource>, config: &Config) -> Result<Self> {
        Ok(Self {
            cache: FreshnessCache::new(source, config.feed.freshness_window()),
            observed: Mutex::new(ObservedChapters::new()),
            formatter: AnnouncementFormatter::new(&config.feed),
            links: LinkPattern::new(&config.feed.base_url)?,
            settings: AnnounceSettings::from_config(config),
        })
    }

    /// Build a herald fetching the configured feed over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = FeedFetcher::new(&config.feed)?;
        Self::new(Arc::new(fetcher), config)
    }

    pub fn settings(&self) -> &AnnounceSettings {
        &self.settings
    }

    /// Current catalog through the freshness cache.
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.cache.get_catalog().await
    }

    /// Record the chapters currently published, before the first poll.
    pub async fn seed(&self) -> usize {
        let catalog = self.catalog().await;
        let mut observed = self.observed.lock().await;
        let seeded = observed.seed(&catalog);
        if observed.is_empty() {
            log::warn!("Nothing to track yet; the first poll will seed chapters");
        } else {
            log::info!("Chapter tracking seeded with {} series", seeded);
        }
        seeded
    }

    /// Last chapter seen for a title.
    pub async fn observed_chapter(&self, title: &str) -> Option<u32> {
        self.observed.lock().await.get(title)
    }

    /// Check the feed and announce every new chapter.
    pub async fn poll_cycle<P>(&self, platform: &P) -> Result<CycleReport>
    where
        P: ChatPlatform + ?Sized,
    {
        let started_at = Utc::now();
        let catalog = self.catalog().await;
        let mut report = CycleReport {
            started_at,
            finished_at: started_at,
            catalog_size: catalog.len(),
            events: Vec::new(),
            send_failures: 0,
        };

        if catalog.is_empty() {
            report.finished_at = Utc::now();
            return Ok(report);
        }

        if let Err(e) = platform.check_channel(self.settings.channel_id).await {
            log::warn!(
                "Announcement channel {} unavailable: {}",
                self.settings.channel_id,
                e
            );
            report.finished_at = Utc::now();
            return Ok(report);
        }

        let events = self.observed.lock().await.detect(&catalog);

        for (i, event) in events.iter().enumerate() {
            if i > 0 {
                self.pace().await;
            }
            log::info!("New chapter: {} - {}", event.title, event.chapter);
            report.send_failures += self.announce(platform, event).await;
        }

        report.events = events;
        report.finished_at = Utc::now();
        Ok(report)
    }

    /// Send one release to the main channel and the series thread.
    ///
    /// Returns the number of failed sends.
    async fn announce<P>(&self, platform: &P, event: &ChapterEvent) -> usize
    where
        P: ChatPlatform + ?Sized,
    {
        let thread = self.series_thread(platform, &event.record).await;
        let card = self.formatter.chapter_release(&event.record, event.chapter);
        let mut failures = 0;

        if let Err(e) = platform.send(self.settings.channel_id, &card).await {
            log::warn!("Failed to announce {} in main channel: {}", event.title, e);
            failures += 1;
        }

        if let Some(thread) = thread {
            self.pace().await;
            if let Err(e) = platform.send(thread.id, &card).await {
                log::warn!("Failed to announce {} in its thread: {}", event.title, e);
                failures += 1;
            }
        }

        failures
    }

    /// Thread for a series, created on demand; `None` when threads are off or unavailable.
    pub async fn series_thread<D>(&self, directory: &D, record: &CatalogRecord) -> Option<ThreadInfo>
    where
        D: ThreadDirectory + ?Sized,
    {
        if self.settings.thread_parent_id == 0 {
            return None;
        }
        let intro = self.formatter.thread_intro(
            &record.title,
            &record.status_text,
            &record.genre,
            self.formatter.cover_url(record),
        );
        resolve_or_create(
            directory,
            self.settings.thread_parent_id,
            self.settings.archived_thread_limit,
            &record.title,
            &intro,
        )
        .await
    }

    /// One compact card per series in the catalog.
    pub async fn list_titles(&self) -> Result<Vec<Announcement>> {
        let catalog = self.catalog().await;
        if catalog.is_empty() {
            return Err(AppError::EmptyCatalog);
        }
        Ok(catalog
            .iter()
            .map(|record| self.formatter.catalog_entry(record))
            .collect())
    }

    /// Detailed card for one series, matched case-insensitively.
    pub async fn show_title(&self, name: &str) -> Result<Announcement> {
        let catalog = self.catalog().await;
        catalog
            .get(name)
            .map(|record| self.formatter.series_detail(record))
            .ok_or_else(|| AppError::NotFound(name.trim().to_string()))
    }

    /// Preview cards for every known reader link in `text`.
    pub async fn expand_links(&self, text: &str) -> Vec<Announcement> {
        let links = self.links.find_links(text);
        if links.is_empty() {
            return Vec::new();
        }

        let catalog = self.catalog().await;
        links
            .iter()
            .filter_map(|link| match catalog.get(&link.title) {
                Some(record) => {
                    Some(self.formatter.link_preview(record, &link.encoded_title, link.chapter))
                }
                None => {
                    log::info!("Linked series not found: {}", link.title);
                    None
                }
            })
            .collect()
    }

    /// Wait between two outbound messages.
    pub async fn pace(&self) {
        if !self.settings.send_delay.is_zero() {
            tokio::time::sleep(self.settings.send_delay).await;
        }
    }
}
