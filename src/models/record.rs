//! Catalog data structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::pipeline::chapter::latest_chapter;

/// Publication status of a series, normalized from the feed's free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    Ongoing,
    Completed,
    Dropped,
    Other,
}

impl SeriesStatus {
    /// Normalize a raw status cell ("Devam Ediyor", "Tamamlandı", ...).
    pub fn from_text(text: &str) -> Self {
        if text.contains("Devam") {
            Self::Ongoing
        } else if text.contains("Tamamlandı") {
            Self::Completed
        } else if text.contains("Bırakıldı") {
            Self::Dropped
        } else {
            Self::Other
        }
    }

    /// Card color for this status.
    pub fn color(self) -> u32 {
        match self {
            Self::Ongoing => 0x00FF7F,
            Self::Completed => 0xFFD700,
            Self::Dropped => 0xFF4500,
            Self::Other => 0x00BFFF,
        }
    }
}

/// One row of the catalog feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Series title (display form)
    pub title: String,

    /// Folder holding the chapters
    pub folder: String,

    /// Source repository owner
    pub source_user: String,

    /// Source repository name
    pub source_repo: String,

    /// Chapter range, e.g. "1-8"
    pub chapter_range: String,

    /// Cover image path or URL
    pub cover: String,

    /// Banner image path or URL
    pub banner: String,

    /// Genre tags
    pub genre: String,

    /// Raw status text
    pub status_text: String,

    /// Normalized status
    pub status: SeriesStatus,

    pub author: String,
    pub summary: String,
    pub rating: String,
    pub date: String,

    /// Lock flag as written in the feed
    pub locked: String,

    /// Number of locked chapters as written in the feed
    pub locked_chapters: String,
}

impl CatalogRecord {
    /// Build a record from the 15 trimmed feed cells, in feed order.
    pub fn from_fields(fields: [&str; 15]) -> Self {
        let [
            title,
            folder,
            source_user,
            source_repo,
            chapter_range,
            cover,
            banner,
            genre,
            status_text,
            author,
            summary,
            rating,
            date,
            locked,
            locked_chapters,
        ] = fields;

        Self {
            title: title.to_string(),
            folder: folder.to_string(),
            source_user: source_user.to_string(),
            source_repo: source_repo.to_string(),
            chapter_range: chapter_range.to_string(),
            cover: cover.to_string(),
            banner: banner.to_string(),
            genre: genre.to_string(),
            status: SeriesStatus::from_text(status_text),
            status_text: status_text.to_string(),
            author: author.to_string(),
            summary: summary.to_string(),
            rating: rating.to_string(),
            date: date.to_string(),
            locked: locked.to_string(),
            locked_chapters: locked_chapters.to_string(),
        }
    }

    /// Case-folded lookup key.
    pub fn key(&self) -> String {
        fold_title(&self.title)
    }

    /// Latest published chapter, if the range is parsable.
    pub fn latest_chapter(&self) -> Option<u32> {
        latest_chapter(&self.chapter_range)
    }

    pub fn is_locked(&self) -> bool {
        matches!(
            self.locked.to_lowercase().as_str(),
            "1" | "true" | "evet"
        )
    }

    pub fn locked_chapter_count(&self) -> Option<u32> {
        self.locked_chapters.trim().parse().ok()
    }
}

/// Case-fold a title for lookups.
pub fn fold_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Parsed catalog keyed by case-folded title, iterated in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; a record with the same folded title is replaced in place.
    ///
    /// Returns the replaced record, if any.
    pub fn insert(&mut self, record: CatalogRecord) -> Option<CatalogRecord> {
        let key = record.key();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    /// Case-insensitive lookup by title.
    pub fn get(&self, title: &str) -> Option<&CatalogRecord> {
        self.index
            .get(&fold_title(title))
            .map(|&pos| &self.records[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogRecord;
    type IntoIter = std::slice::Iter<'a, CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
