//! Catalog CSV parsing.
//!
//! The feed is a naive comma-separated file: one header line, then one
//! series per line with 15 cells. Only the first 14 commas split cells, so
//! the last cell may itself contain commas.

use serde::Serialize;

use crate::models::{Catalog, CatalogRecord};

/// Cell delimiter.
const DELIMITER: char = ',';

/// Number of cells in a data line.
pub const FIELD_COUNT: usize = 15;

/// Result of parsing one feed document.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub catalog: Catalog,
    /// 1-based line numbers of skipped data lines
    pub skipped: Vec<usize>,
    /// Number of data lines seen (header excluded)
    pub data_lines: usize,
}

/// Summary of a parse, for logs and CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct ParseSummary {
    pub records: usize,
    pub data_lines: usize,
    pub skipped: Vec<usize>,
}

impl ParseOutcome {
    pub fn summary(&self) -> ParseSummary {
        ParseSummary {
            records: self.catalog.len(),
            data_lines: self.data_lines,
            skipped: self.skipped.clone(),
        }
    }
}

/// Parse a raw feed document into a catalog.
///
/// Malformed lines are skipped silently; their line numbers are reported in
/// [`ParseOutcome::skipped`].
pub fn parse_catalog(raw: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    let lines: Vec<&str> = raw.trim().lines().collect();
    if lines.len() < 2 {
        return outcome;
    }

    for (idx, line) in lines.iter().enumerate().skip(1) {
        outcome.data_lines += 1;
        match parse_line(line) {
            Some(record) => {
                outcome.catalog.insert(record);
            }
            None => outcome.skipped.push(idx + 1),
        }
    }

    outcome
}

/// Parse a single data line, or `None` if it is malformed.
fn parse_line(line: &str) -> Option<CatalogRecord> {
    let cells: Vec<&str> = line.splitn(FIELD_COUNT, DELIMITER).map(str::trim).collect();
    let fields: [&str; FIELD_COUNT] = cells.try_into().ok()?;

    if fields[0].is_empty() {
        return None;
    }
    Some(CatalogRecord::from_fields(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesStatus;

    const HEADER: &str = "Isim,Klasor,User,Repo,Aralik,Kapak,Banner,Tur,Durum,Yazar,Ozet,Puan,Tarih,Kilitli,KilitliBolumSayisi";
    const MOON_KNIGHT: &str = "Moon Knight,moon,u,r,1-8,cover.png,banner.png,Action,Devam Ediyor,Author,Summary text,9.1,2024-01-01,0,0";

    fn document(lines: &[&str]) -> String {
        let mut all = vec![HEADER];
        all.extend_from_slice(lines);
        all.join("\n")
    }

    #[test]
    fn test_parse_single_record() {
        let outcome = parse_catalog(&document(&[MOON_KNIGHT]));

        assert_eq!(outcome.catalog.len(), 1);
        assert!(outcome.skipped.is_empty());
        let record = outcome.catalog.get("moon knight").unwrap();
        assert_eq!(record.title, "Moon Knight");
        assert_eq!(record.folder, "moon");
        assert_eq!(record.chapter_range, "1-8");
        assert_eq!(record.status, SeriesStatus::Ongoing);
        assert_eq!(record.locked_chapters, "0");
    }

    #[test]
    fn test_last_field_keeps_commas() {
        let line = "Solo,solo,u,r,1-3,c.png,b.png,Drama,Tamamlandı,Yazar,Bir, iki, üç,8.0,2024-02-02,1,2";
        let outcome = parse_catalog(&document(&[line]));
        let record = outcome.catalog.get("solo").unwrap();

        // commas in the summary shift every later cell; the last one takes the rest
        assert_eq!(record.summary, "Bir");
        assert_eq!(record.rating, "iki");
        assert_eq!(record.locked_chapters, "2024-02-02,1,2");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let line = "  Spaced  , f , u , r , 1-2 , c , b , g , Devam , a , s , 1 , d , 0 , 0 ";
        let outcome = parse_catalog(&document(&[line]));
        let record = outcome.catalog.get("spaced").unwrap();
        assert_eq!(record.title, "Spaced");
        assert_eq!(record.chapter_range, "1-2");
        assert_eq!(record.locked_chapters, "0");
    }

    #[test]
    fn test_malformed_lines_are_skipped_and_reported() {
        let outcome = parse_catalog(&document(&[
            MOON_KNIGHT,
            "too,few,fields",
            ",empty,title,r,1-2,c,b,g,s,a,s,1,d,0,0",
            "",
            "Other,o,u,r,1-2,c,b,g,s,a,s,1,d,0,0",
        ]));

        assert_eq!(outcome.catalog.len(), 2);
        assert_eq!(outcome.data_lines, 5);
        assert_eq!(outcome.skipped, vec![3, 4, 5]);
        assert!(outcome.catalog.get("other").is_some());
    }

    #[test]
    fn test_fewer_than_two_lines_is_empty() {
        assert!(parse_catalog("").catalog.is_empty());
        assert!(parse_catalog(HEADER).catalog.is_empty());
        assert_eq!(parse_catalog(HEADER).data_lines, 0);
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = format!("{HEADER}\r\n{MOON_KNIGHT}\r\n");
        let outcome = parse_catalog(&raw);
        let record = outcome.catalog.get("moon knight").unwrap();
        assert_eq!(record.locked_chapters, "0");
    }

    #[test]
    fn test_duplicate_titles_last_write_wins() {
        // Ambiguous in the feed format; the later row replaces the earlier one.
        let outcome = parse_catalog(&document(&[
            MOON_KNIGHT,
            "MOON KNIGHT,moon2,u,r,1-12,c,b,g,Tamamlandı,a,s,1,d,0,0",
        ]));

        assert_eq!(outcome.catalog.len(), 1);
        assert!(outcome.skipped.is_empty());
        let record = outcome.catalog.get("Moon Knight").unwrap();
        assert_eq!(record.chapter_range, "1-12");
        assert_eq!(record.status, SeriesStatus::Completed);
    }

    #[test]
    fn test_summary_counts() {
        let outcome = parse_catalog(&document(&[MOON_KNIGHT, "bad"]));
        let summary = outcome.summary();
        assert_eq!(summary.records, 1);
        assert_eq!(summary.data_lines, 2);
        assert_eq!(summary.skipped, vec![3]);
    }
}
