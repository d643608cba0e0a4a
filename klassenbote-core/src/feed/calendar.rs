//! Calendar export reader.
//!
//! The school portal exports appointments as a semicolon-delimited table
//! with a fixed German header row. A missing or unreadable export is fatal
//! for the run (there is no schedule without it); individual rows that fail
//! to decode are logged and skipped.

use std::io::Read;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::{BoteError, BoteResult};

/// One row of the calendar export, field names as exported.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarRow {
    #[serde(rename = "Titel", default)]
    pub titel: String,
    #[serde(rename = "Art", default)]
    pub art: String,
    #[serde(rename = "Von_Datum", default)]
    pub von_datum: String,
    #[serde(rename = "Von_Uhrzeit", default)]
    pub von_uhrzeit: String,
    #[serde(rename = "Bis_Datum", default)]
    pub bis_datum: String,
    #[serde(rename = "Bis_Uhrzeit", default)]
    pub bis_uhrzeit: String,
    #[serde(rename = "Beschreibung", default)]
    pub beschreibung: String,
    #[serde(rename = "Ort", default)]
    pub ort: String,
    #[serde(rename = "Verantwortlich", default)]
    pub verantwortlich: String,
}

/// Read the calendar export from disk.
pub fn read(path: &Path) -> BoteResult<Vec<CalendarRow>> {
    let file = std::fs::File::open(path).map_err(|e| {
        BoteError::SourceUnavailable(format!("calendar export {}: {e}", path.display()))
    })?;
    Ok(parse_reader(file))
}

/// Decode calendar rows from any reader. Undecodable rows are skipped.
pub fn parse_reader<R: Read>(reader: R) -> Vec<CalendarRow> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => warn!("skipping undecodable calendar row: {e}"),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Titel;Art;Von_Datum;Von_Uhrzeit;Bis_Datum;Bis_Uhrzeit;Beschreibung;Ort;Verantwortlich
Matheprüfung;Klausuren;05.06.2025;08:00;05.06.2025;09:30;2. Teil;Raum 204;Hr. Müller
Sommerferien;Ferien;07.07.2025;00:00;15.08.2025;23:59;;;
";

    #[test]
    fn test_parse_export_rows() {
        let rows = parse_reader(EXPORT.as_bytes());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].titel, "Matheprüfung");
        assert_eq!(rows[0].art, "Klausuren");
        assert_eq!(rows[0].von_datum, "05.06.2025");
        assert_eq!(rows[0].ort, "Raum 204");
        assert_eq!(rows[1].titel, "Sommerferien");
        assert_eq!(rows[1].bis_datum, "15.08.2025");
        assert_eq!(rows[1].beschreibung, "");
    }

    #[test]
    fn test_parse_empty_export() {
        let rows = parse_reader("Titel;Art;Von_Datum\n".as_bytes());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = read(Path::new("/nonexistent/kalender.csv")).unwrap_err();
        assert!(matches!(err, BoteError::SourceUnavailable(_)));
    }
}
