// src/services/format.rs

//! Card building for announcements and lookups.

use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Announcement, CatalogRecord, FeedConfig, SeriesStatus};
use crate::utils::{encode_component, resolve_cover_url, series_link};

/// Summary cap for catalog listing cards.
pub const LIST_SUMMARY_LIMIT: usize = 150;

/// Summary cap for link preview cards.
pub const PREVIEW_SUMMARY_LIMIT: usize = 200;

const FOOTER: &str = "Zebze Toon";
const DETAIL_FOOTER: &str = "Zebze Toon • ++seri";
const READ_LABEL: &str = "📖 Oku";
const SERIES_LABEL: &str = "📚 Seriye Git";
const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━";
const THREAD_CALL_TO_ACTION: &str = "Yeni bölümler burada paylaşılacak!";
const BLANK: &str = "\u{200b}";

/// Cap `text` at `limit` characters, appending "..." only when something was cut.
pub fn truncate_summary(text: &str, limit: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(limit).collect();
    if graphemes.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Builds cards from catalog records.
#[derive(Debug, Clone)]
pub struct AnnouncementFormatter {
    base_url: String,
    cdn_base: String,
    cover_prefix: String,
}

impl AnnouncementFormatter {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            cdn_base: config.cdn_base.clone(),
            cover_prefix: config.cover_prefix.clone(),
        }
    }

    /// Full cover image URL for a record.
    pub fn cover_url(&self, record: &CatalogRecord) -> Option<String> {
        resolve_cover_url(&record.cover, &self.cdn_base, &self.cover_prefix)
    }

    /// Reader link for a title, optionally at a chapter.
    pub fn deep_link(&self, title: &str, chapter: Option<u32>) -> String {
        series_link(&self.base_url, &encode_component(title), chapter)
    }

    /// Card announcing a newly published chapter.
    pub fn chapter_release(&self, record: &CatalogRecord, chapter: u32) -> Announcement {
        Announcement::new(
            format!("🔔 {}", record.title),
            format!("**Bölüm {chapter}** yayınlandı!\n\n{DIVIDER}"),
            record.status.color(),
        )
        .field("📚 Seri", format!("`{}`", record.title), true)
        .field("📄 Bölüm", format!("`{chapter}`"), true)
        .field(BLANK, BLANK, true)
        .image(self.cover_url(record))
        .footer(FOOTER)
        .link(READ_LABEL, self.deep_link(&record.title, Some(chapter)))
    }

    /// Compact card used when listing the whole catalog.
    pub fn catalog_entry(&self, record: &CatalogRecord) -> Announcement {
        let summary = truncate_summary(&record.summary, LIST_SUMMARY_LIMIT);
        let description = if summary.is_empty() {
            String::new()
        } else {
            format!("**Özet:**\n{summary}")
        };
        let genre = if record.genre.is_empty() {
            "—"
        } else {
            record.genre.as_str()
        };

        Announcement::new(&record.title, description, record.status.color())
            .field("Durum", &record.status_text, true)
            .field("Türler", genre, true)
            .thumbnail(self.cover_url(record))
            .link(SERIES_LABEL, self.deep_link(&record.title, None))
    }

    /// Detailed card for a single series lookup.
    pub fn series_detail(&self, record: &CatalogRecord) -> Announcement {
        Announcement::new(
            format!("📚 {}", record.title),
            format!(
                "**{}**\n\n🏷️ {}\n\n{}",
                record.status_text, record.genre, record.summary
            ),
            record.status.color(),
        )
        .image(self.cover_url(record))
        .footer(DETAIL_FOOTER)
        .link(SERIES_LABEL, self.deep_link(&record.title, None))
    }

    /// Preview card for a reader link pasted in chat.
    ///
    /// The button reuses `encoded_title` exactly as it appeared in the link.
    pub fn link_preview(
        &self,
        record: &CatalogRecord,
        encoded_title: &str,
        chapter: Option<u32>,
    ) -> Announcement {
        let mut card = Announcement::new(
            format!("📖 {}", record.title),
            truncate_summary(&record.summary, PREVIEW_SUMMARY_LIMIT),
            record.status.color(),
        )
        .field("📚 Seri", format!("`{}`", record.title), true);

        if let Some(chapter) = chapter {
            card = card.field("📄 Bölüm", format!("`{chapter}`"), true);
        }
        card = card.field("📊 Durum", &record.status_text, true);
        if !record.genre.is_empty() {
            card = card.field("🏷️ Tür", &record.genre, false);
        }

        card.image(self.cover_url(record))
            .footer(FOOTER)
            .link(READ_LABEL, series_link(&self.base_url, encoded_title, chapter))
    }

    /// First message of a newly created series thread.
    pub fn thread_intro(
        &self,
        title: &str,
        status_text: &str,
        genre: &str,
        cover_url: Option<String>,
    ) -> Announcement {
        let mut lines = Vec::new();
        if !status_text.is_empty() {
            lines.push(format!("**{status_text}**"));
        }
        if !genre.is_empty() {
            lines.push(format!("🏷️ {genre}"));
        }
        lines.push(THREAD_CALL_TO_ACTION.to_string());

        Announcement::new(
            format!("📚 {title}"),
            lines.join("\n"),
            SeriesStatus::from_text(status_text).color(),
        )
        .thumbnail(cover_url)
    }
}
