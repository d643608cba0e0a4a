//! Canonical event types.
//!
//! Both feeds are normalized into `Event` before aggregation. The struct is
//! deliberately flat: structured calendar fields and the raw-text fallback
//! for undecodable substitution rows share one type, with `raw_text`
//! mutually exclusive to the structured fields.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::dates;

/// Category tag derived from the feed's type field or title keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Exam,
    Holiday,
    Substitution,
    Generic,
}

impl EventCategory {
    /// Marker emoji prefixed to every rendered line of this category.
    pub fn marker(&self) -> &'static str {
        match self {
            EventCategory::Exam => "📝",
            EventCategory::Holiday => "🎊",
            EventCategory::Substitution => "🔄",
            EventCategory::Generic => "📌",
        }
    }

    /// Map the export's explicit `Art` field, if it names a known category.
    pub fn from_art(art: &str) -> Option<Self> {
        let lower = art.to_lowercase();
        if lower.contains("klausur") {
            Some(EventCategory::Exam)
        } else if lower.contains("ferien") {
            Some(EventCategory::Holiday)
        } else {
            None
        }
    }

    /// Keyword fallback on the title when `Art` is empty or unknown.
    pub fn from_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        if lower.contains("klausur") {
            EventCategory::Exam
        } else if lower.contains("ferien") || lower.contains("frei") {
            EventCategory::Holiday
        } else {
            EventCategory::Generic
        }
    }
}

/// Wall-clock time range within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// The export marks all-day events as 00:00–23:59; those are suppressed
    /// from rendering.
    pub fn is_full_day(&self) -> bool {
        self.start == NaiveTime::from_hms_opt(0, 0, 0).unwrap()
            && self.end == NaiveTime::from_hms_opt(23, 59, 0).unwrap()
    }
}

/// Canonical unit of schedule information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub category: EventCategory,
    /// Required for sorting and filtering calendar events; substitution
    /// fallback entries may lack it and sort last via the sentinel.
    pub date: Option<NaiveDate>,
    /// End date for multi-day events (holidays mostly); None when the event
    /// ends on its start day.
    pub end_date: Option<NaiveDate>,
    pub time_range: Option<TimeRange>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Undecodable substitution rows carry only this text, no structured
    /// fields.
    pub raw_text: Option<String>,
    /// Weekday bucket this event is filed under (post weekend-rollover for
    /// substitution entries).
    pub weekday: Weekday,
}

impl Event {
    /// Date used for ordering within a bucket; undated entries sort last.
    pub fn sort_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(dates::sentinel_date)
    }

    /// Format the event as one display line for the snapshot.
    pub fn to_line(&self) -> String {
        if let Some(raw) = &self.raw_text {
            return format!("{} {}", EventCategory::Substitution.marker(), raw);
        }

        if self.category == EventCategory::Substitution {
            return format!("{} {}", self.category.marker(), self.title);
        }

        let mut line = format!(
            "{} *{}:* {}",
            self.category.marker(),
            self.date_span(),
            self.title
        );

        if self.category == EventCategory::Holiday {
            line.push_str(" (schulfrei)");
        }

        if let Some(range) = &self.time_range {
            line.push_str(&format!(
                " ({}-{} Uhr)",
                range.start.format("%H:%M"),
                range.end.format("%H:%M")
            ));
        }

        if let Some(description) = &self.description {
            line.push_str(&format!(" - {description}"));
        }

        if let Some(location) = &self.location {
            line.push_str(&format!(" (Ort: {location})"));
        }

        line
    }

    fn date_span(&self) -> String {
        let start = match self.date {
            Some(date) => dates::format_dotted_date(date),
            None => return String::new(),
        };
        match self.end_date {
            Some(end) => format!("{} - {}", start, dates::format_dotted_date(end)),
            None => start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(category: EventCategory) -> Event {
        Event {
            title: "Matheprüfung".to_string(),
            category,
            date: NaiveDate::from_ymd_opt(2025, 6, 5),
            end_date: None,
            time_range: None,
            description: None,
            location: None,
            raw_text: None,
            weekday: Weekday::Thu,
        }
    }

    #[test]
    fn test_category_from_art() {
        assert_eq!(EventCategory::from_art("Klausuren"), Some(EventCategory::Exam));
        assert_eq!(EventCategory::from_art("Ferien"), Some(EventCategory::Holiday));
        assert_eq!(EventCategory::from_art("Sonstiges"), None);
        assert_eq!(EventCategory::from_art(""), None);
    }

    #[test]
    fn test_category_from_title_keywords() {
        assert_eq!(EventCategory::from_title("Mathe-Klausur"), EventCategory::Exam);
        assert_eq!(EventCategory::from_title("Sommerferien"), EventCategory::Holiday);
        assert_eq!(EventCategory::from_title("Beweglicher freier Tag"), EventCategory::Holiday);
        assert_eq!(EventCategory::from_title("Elternabend"), EventCategory::Generic);
    }

    #[test]
    fn test_exam_line_format() {
        let event = make_event(EventCategory::Exam);
        assert_eq!(event.to_line(), "📝 *05.06.2025:* Matheprüfung");
    }

    #[test]
    fn test_holiday_line_gets_schulfrei_suffix() {
        let mut event = make_event(EventCategory::Holiday);
        event.title = "Sommerferien".to_string();
        event.end_date = NaiveDate::from_ymd_opt(2025, 8, 15);
        assert_eq!(
            event.to_line(),
            "🎊 *05.06.2025 - 15.08.2025:* Sommerferien (schulfrei)"
        );
    }

    #[test]
    fn test_line_appends_time_description_and_location() {
        let mut event = make_event(EventCategory::Generic);
        event.time_range = Some(TimeRange {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        });
        event.description = Some("2. Teil".to_string());
        event.location = Some("Raum 204".to_string());
        assert_eq!(
            event.to_line(),
            "📌 *05.06.2025:* Matheprüfung (08:00-09:30 Uhr) - 2. Teil (Ort: Raum 204)"
        );
    }

    #[test]
    fn test_raw_text_line() {
        let mut event = make_event(EventCategory::Substitution);
        event.date = None;
        event.title = String::new();
        event.raw_text = Some("Vertretungsplan konnte nicht gelesen werden".to_string());
        assert_eq!(
            event.to_line(),
            "🔄 Vertretungsplan konnte nicht gelesen werden"
        );
    }

    #[test]
    fn test_full_day_detection() {
        let full_day = TimeRange {
            start: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        };
        assert!(full_day.is_full_day());
        let morning = TimeRange {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        };
        assert!(!morning.is_full_day());
    }

    #[test]
    fn test_undated_event_sorts_last() {
        let mut event = make_event(EventCategory::Substitution);
        event.date = None;
        assert!(event.sort_date() > NaiveDate::from_ymd_opt(2100, 1, 1).unwrap());
    }
}
