//! Date parsing shared by normalization, filtering, sorting, and rendering.
//!
//! All `DD.MM.YYYY` handling lives here so the same logic backs every
//! consumer instead of drifting apart in per-module copies.

use std::sync::OnceLock;

use chrono::{NaiveDate, Weekday};
use regex::Regex;

/// German weekday names in canonical Monday-start order.
pub const GERMAN_WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

/// Far-future sentinel used to sort undated entries last.
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()
}

fn embedded_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4})").unwrap())
}

/// Parse a `DD.MM.YYYY` string into a date.
///
/// Requires all three dot-separated components; rejects out-of-range
/// day/month values.
pub fn parse_dotted_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().splitn(3, '.');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Find the first `DD.MM.YYYY` pattern embedded anywhere in free text.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let caps = embedded_date_re().captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Match a German weekday name embedded anywhere in the text.
pub fn weekday_from_german(text: &str) -> Option<Weekday> {
    let lower = text.to_lowercase();
    GERMAN_WEEKDAYS
        .iter()
        .position(|name| lower.contains(&name.to_lowercase()))
        .map(weekday_from_index)
}

/// German display name for a weekday.
pub fn german_weekday_name(weekday: Weekday) -> &'static str {
    GERMAN_WEEKDAYS[weekday.num_days_from_monday() as usize]
}

fn weekday_from_index(index: usize) -> Weekday {
    match index {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// Format a date back into the feed's `DD.MM.YYYY` notation.
pub fn format_dotted_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_dotted_date() {
        assert_eq!(
            parse_dotted_date("05.06.2025"),
            NaiveDate::from_ymd_opt(2025, 6, 5)
        );
        assert_eq!(
            parse_dotted_date(" 1.1.2026 "),
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
    }

    #[test]
    fn test_parse_dotted_date_rejects_incomplete() {
        assert_eq!(parse_dotted_date("05.06"), None);
        assert_eq!(parse_dotted_date("2025-06-05"), None);
        assert_eq!(parse_dotted_date(""), None);
        assert_eq!(parse_dotted_date("32.01.2025"), None);
    }

    #[test]
    fn test_parsed_weekday_matches_gregorian_calendar() {
        // 2025-06-05 is a Thursday, 2025-06-07 a Saturday
        let thursday = parse_dotted_date("05.06.2025").unwrap();
        assert_eq!(thursday.weekday(), Weekday::Thu);
        let saturday = parse_dotted_date("07.06.2025").unwrap();
        assert_eq!(saturday.weekday(), Weekday::Sat);
    }

    #[test]
    fn test_extract_date_from_text() {
        let date = extract_date("Vertretungsplan für Mittwoch, den 04.06.2025");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 4));
        assert_eq!(extract_date("kein Datum hier"), None);
    }

    #[test]
    fn test_weekday_from_german() {
        assert_eq!(weekday_from_german("Mittwoch"), Some(Weekday::Wed));
        assert_eq!(
            weekday_from_german("Plan für DONNERSTAG (B-Woche)"),
            Some(Weekday::Thu)
        );
        assert_eq!(weekday_from_german("05.06.2025"), None);
    }

    #[test]
    fn test_german_weekday_name() {
        assert_eq!(german_weekday_name(Weekday::Mon), "Montag");
        assert_eq!(german_weekday_name(Weekday::Sun), "Sonntag");
    }

    #[test]
    fn test_format_dotted_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(format_dotted_date(date), "05.06.2025");
    }
}
