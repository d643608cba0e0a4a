//! Event normalization.
//!
//! Turns one raw feed row into a canonical [`Event`]. Calendar rows can be
//! dropped (malformed date, no title); substitution rows never fail, they
//! fall back to the run's weekday when no date can be derived.

use chrono::{Datelike, NaiveTime, Weekday};

use crate::dates;
use crate::error::DropReason;
use crate::event::{Event, EventCategory, TimeRange};
use crate::feed::{CalendarRow, SubstitutionRow};

/// Maximum length of a raw-text substitution line before truncation.
const RAW_TEXT_LIMIT: usize = 100;

/// Structured substitution columns in their fixed display order, paired
/// with a case-insensitive header fragment to match on.
const SUBSTITUTION_COLUMNS: [(&str, SubstitutionField); 6] = [
    ("klasse", SubstitutionField::Class),
    ("stunde", SubstitutionField::Period),
    ("fach", SubstitutionField::Subject),
    ("lehrer", SubstitutionField::Teacher),
    ("raum", SubstitutionField::Room),
    ("hinweis", SubstitutionField::Note),
];

#[derive(Clone, Copy)]
enum SubstitutionField {
    Class,
    Period,
    Subject,
    Teacher,
    Room,
    Note,
}

impl SubstitutionField {
    fn label(&self, value: &str) -> String {
        match self {
            SubstitutionField::Class => format!("Klasse {value}"),
            SubstitutionField::Period => format!("{value}. Std."),
            SubstitutionField::Subject => format!("Fach {value}"),
            SubstitutionField::Teacher => format!("bei {value}"),
            SubstitutionField::Room => format!("Raum {value}"),
            SubstitutionField::Note => format!("Hinweis: {value}"),
        }
    }
}

/// Normalize one calendar export row.
pub fn normalize_calendar_row(row: &CalendarRow) -> Result<Event, DropReason> {
    if row.titel.trim().is_empty() {
        return Err(DropReason::MissingTitle);
    }

    if row.von_datum.split('.').count() < 3 {
        return Err(DropReason::MalformedDate {
            raw: row.von_datum.clone(),
        });
    }
    let date = dates::parse_dotted_date(&row.von_datum).ok_or_else(|| {
        DropReason::MalformedDate {
            raw: row.von_datum.clone(),
        }
    })?;

    let end_date = dates::parse_dotted_date(&row.bis_datum).filter(|end| *end != date);

    let time_range = parse_time_range(&row.von_uhrzeit, &row.bis_uhrzeit);

    let category = EventCategory::from_art(&row.art)
        .unwrap_or_else(|| EventCategory::from_title(&row.titel));

    Ok(Event {
        title: row.titel.trim().to_string(),
        category,
        date: Some(date),
        end_date,
        time_range,
        description: non_empty(&row.beschreibung),
        location: non_empty(&row.ort),
        raw_text: None,
        weekday: date.weekday(),
    })
}

/// Normalize one substitution row. Never fails: weekday derivation falls
/// back to the run's weekday, and weekends roll over to Monday.
pub fn normalize_substitution_row(row: &SubstitutionRow, today: Weekday) -> Event {
    let datum = row.datum();
    let date = dates::extract_date(datum);
    let weekday = dates::weekday_from_german(datum)
        .or_else(|| date.map(|d| d.weekday()))
        .unwrap_or(today);
    let weekday = rollover_weekend(weekday);

    match row {
        SubstitutionRow::RawText { raw_text, .. } => Event {
            title: String::new(),
            category: EventCategory::Substitution,
            date,
            end_date: None,
            time_range: None,
            description: None,
            location: None,
            raw_text: Some(truncate(raw_text, RAW_TEXT_LIMIT)),
            weekday,
        },
        SubstitutionRow::Structured(cells) => Event {
            title: format_structured_cells(cells),
            category: EventCategory::Substitution,
            date,
            end_date: None,
            time_range: None,
            description: None,
            location: None,
            raw_text: None,
            weekday,
        },
    }
}

/// Saturday/Sunday substitution entries belong to the next school day.
pub fn rollover_weekend(weekday: Weekday) -> Weekday {
    match weekday {
        Weekday::Sat | Weekday::Sun => Weekday::Mon,
        other => other,
    }
}

/// Render known columns in fixed order, each labeled, empty cells skipped.
/// Rows without any recognized column fall back to their cell values.
fn format_structured_cells(cells: &std::collections::BTreeMap<String, String>) -> String {
    let mut parts = Vec::new();
    for (fragment, field) in SUBSTITUTION_COLUMNS {
        let value = cells.iter().find_map(|(header, value)| {
            let header = header.to_lowercase();
            (header.contains(fragment) && !header.contains("datum")).then_some(value.trim())
        });
        if let Some(value) = value {
            if !value.is_empty() {
                parts.push(field.label(value));
            }
        }
    }

    if parts.is_empty() {
        parts = cells
            .iter()
            .filter(|(header, value)| {
                !header.eq_ignore_ascii_case("datum") && !value.trim().is_empty()
            })
            .map(|(_, value)| value.trim().to_string())
            .collect();
    }

    parts.join(", ")
}

fn parse_time_range(von: &str, bis: &str) -> Option<TimeRange> {
    let start = NaiveTime::parse_from_str(von.trim(), "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(bis.trim(), "%H:%M").ok()?;
    let range = TimeRange { start, end };
    // Full-day sentinel is suppressed from rendering entirely
    if range.is_full_day() {
        None
    } else {
        Some(range)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn truncate(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= limit {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(limit).collect();
    out.push_str("...");
    out
}
