//! Substitution plan reader.
//!
//! The scraper produces JSON in one of two shapes: an array of structured
//! table rows (arbitrary column headers plus a synthesized `Datum` field),
//! or a single raw-text record when no table structure was detected. The
//! two shapes are modeled as a tagged enum so downstream code never has to
//! sniff field presence.
//!
//! The whole feed is best effort: an absent or unreadable file degrades to
//! an empty substitution set.

use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::error::BoteResult;

/// One substitution entry as scraped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubstitutionRow {
    /// No recognizable table on the page; the scraper dumped the text.
    RawText {
        #[serde(rename = "rawText")]
        raw_text: String,
        #[serde(rename = "Datum", default)]
        datum: String,
    },
    /// Column-header → cell-text mapping from a detected table.
    Structured(BTreeMap<String, String>),
}

impl SubstitutionRow {
    /// The inferred date string attached by the scraper, if any.
    pub fn datum(&self) -> &str {
        match self {
            SubstitutionRow::RawText { datum, .. } => datum,
            SubstitutionRow::Structured(cells) => cells
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("datum"))
                .map(|(_, value)| value.as_str())
                .unwrap_or(""),
        }
    }
}

/// The feed file is either a sequence of rows or one raw-text record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubstitutionFeed {
    Many(Vec<SubstitutionRow>),
    One(SubstitutionRow),
}

/// Read the substitution feed; absence yields an empty set.
pub fn read(path: Option<&Path>) -> BoteResult<Vec<SubstitutionRow>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            info!("no substitution feed at {} ({e}), continuing without", path.display());
            return Ok(Vec::new());
        }
    };

    match serde_json::from_str::<SubstitutionFeed>(&content) {
        Ok(SubstitutionFeed::Many(rows)) => Ok(rows),
        Ok(SubstitutionFeed::One(row)) => Ok(vec![row]),
        Err(e) => {
            warn!("unreadable substitution feed {}: {e}", path.display());
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_rows() {
        let json = r#"[
            {"Klasse": "10HBFI", "Stunde": "3", "Fach": "Mathe", "Datum": "Mittwoch"},
            {"Klasse": "10HBFI", "Stunde": "5", "Fach": "Englisch", "Datum": "Mittwoch"}
        ]"#;
        let feed: SubstitutionFeed = serde_json::from_str(json).unwrap();
        let SubstitutionFeed::Many(rows) = feed else {
            panic!("expected row array");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].datum(), "Mittwoch");
        let SubstitutionRow::Structured(cells) = &rows[0] else {
            panic!("expected structured row");
        };
        assert_eq!(cells.get("Klasse").map(String::as_str), Some("10HBFI"));
    }

    #[test]
    fn test_raw_text_record() {
        let json = r#"{"rawText": "Keine Tabelle gefunden", "Datum": "04.06.2025"}"#;
        let feed: SubstitutionFeed = serde_json::from_str(json).unwrap();
        let SubstitutionFeed::One(row) = feed else {
            panic!("expected single record");
        };
        assert!(matches!(row, SubstitutionRow::RawText { .. }));
        assert_eq!(row.datum(), "04.06.2025");
    }

    #[test]
    fn test_absent_feed_is_empty() {
        assert!(read(None).unwrap().is_empty());
        assert!(read(Some(Path::new("/nonexistent/plan.json")))
            .unwrap()
            .is_empty());
    }
}
