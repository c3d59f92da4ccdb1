//! Catalog processing pipeline.
//!
//! - `parse`: CSV document to catalog
//! - `chapter`: chapter range notation
//! - `cache`: freshness-windowed catalog cache
//! - `diff`: new chapter detection against observed state

pub mod cache;
pub mod chapter;
pub mod diff;
pub mod parse;

pub use cache::FreshnessCache;
pub use chapter::latest_chapter;
pub use diff::{ChapterEvent, ObservedChapters};
pub use parse::{ParseOutcome, ParseSummary, parse_catalog};
