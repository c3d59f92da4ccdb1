//! New chapter detection.
//!
//! Compares the latest chapter of every series in the current catalog with
//! the value observed on previous polls. A series seen for the first time is
//! only recorded, so a fresh start never announces the whole catalog.

use std::collections::HashMap;

use crate::models::{Catalog, CatalogRecord};

/// A series whose latest chapter moved forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEvent {
    pub title: String,
    pub chapter: u32,
    pub record: CatalogRecord,
}

/// Last chapter seen per series title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedChapters {
    chapters: HashMap<String, u32>,
}

impl ObservedChapters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current chapter of every series without emitting events.
    ///
    /// Returns how many series were recorded.
    pub fn seed(&mut self, catalog: &Catalog) -> usize {
        let mut seeded = 0;
        for record in catalog {
            if let Some(chapter) = record.latest_chapter() {
                self.chapters.insert(record.title.clone(), chapter);
                seeded += 1;
            }
        }
        seeded
    }

    /// Compare `catalog` against the observed chapters.
    ///
    /// Emits an event for every series whose chapter grew, and moves its
    /// watermark. Unknown series are recorded silently; lower values never
    /// move the watermark back.
    pub fn detect(&mut self, catalog: &Catalog) -> Vec<ChapterEvent> {
        let mut events = Vec::new();

        for record in catalog {
            let Some(current) = record.latest_chapter() else {
                continue;
            };

            match self.chapters.get_mut(&record.title) {
                None => {
                    self.chapters.insert(record.title.clone(), current);
                }
                Some(observed) if current > *observed => {
                    *observed = current;
                    events.push(ChapterEvent {
                        title: record.title.clone(),
                        chapter: current,
                        record: record.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        events
    }

    pub fn get(&self, title: &str) -> Option<u32> {
        self.chapters.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}
