//! Weekly schedule aggregation and snapshot persistence.
//!
//! The aggregator merges normalized events from both feeds into one
//! `WeeklySchedule` per run. The snapshot decouples scrape time from send
//! time: `update` writes it wholesale, `send` reads it read-only.

use std::path::Path;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{BoteError, BoteResult};
use crate::event::Event;
use crate::relevance;

/// Visual separator between the substitution section and calendar entries.
pub const SECTION_SEPARATOR: &str = "----------";

/// Header line introducing the substitution section of a day.
pub const SUBSTITUTION_HEADER: &str = "🔄 *VERTRETUNGEN HEUTE:*";

/// Global fallback appended to every day of an empty week.
pub const NO_EVENTS_NOTICE: &str =
    "ℹ️ Keine Termine diese Woche - schau zur Sicherheit im Schulportal nach.";

/// Fixed per-weekday header strings, Monday..Sunday.
const DAY_HEADERS: [&str; 7] = [
    "📅 *TERMINÜBERSICHT FÜR DIESE WOCHE* 📅",
    "📚 *ANSTEHENDE KLAUSUREN* 📝",
    "🌟 *MITTE DER WOCHE* 🌟",
    "🗓️ *KOMMENDE FEIERTAGE* 🎉",
    "📝 *FREITAGS-KLAUSUREN* 📝",
    "🎉 *WOCHENENDE!* 🎉",
    "🔄 *WOCHE VORAUSPLANEN* 📆",
];

/// One weekday's slot of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub message: String,
    pub subjects: Vec<String>,
}

impl DayPlan {
    fn with_header(header: &str) -> Self {
        DayPlan {
            message: header.to_string(),
            subjects: Vec::new(),
        }
    }

    /// Lines that carry schedule information, as opposed to the purely
    /// visual separator and section header.
    pub fn actionable_lines(&self) -> usize {
        self.subjects
            .iter()
            .filter(|line| line.as_str() != SECTION_SEPARATOR)
            .filter(|line| line.as_str() != SUBSTITUTION_HEADER)
            .count()
    }
}

/// The canonical on-disk snapshot: one plan per weekday, serialized under
/// the German day names. Fixed field order keeps the JSON byte-identical
/// for identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(rename = "Montag")]
    pub monday: DayPlan,
    #[serde(rename = "Dienstag")]
    pub tuesday: DayPlan,
    #[serde(rename = "Mittwoch")]
    pub wednesday: DayPlan,
    #[serde(rename = "Donnerstag")]
    pub thursday: DayPlan,
    #[serde(rename = "Freitag")]
    pub friday: DayPlan,
    #[serde(rename = "Samstag")]
    pub saturday: DayPlan,
    #[serde(rename = "Sonntag")]
    pub sunday: DayPlan,
}

impl WeeklySchedule {
    fn with_headers() -> Self {
        WeeklySchedule {
            monday: DayPlan::with_header(DAY_HEADERS[0]),
            tuesday: DayPlan::with_header(DAY_HEADERS[1]),
            wednesday: DayPlan::with_header(DAY_HEADERS[2]),
            thursday: DayPlan::with_header(DAY_HEADERS[3]),
            friday: DayPlan::with_header(DAY_HEADERS[4]),
            saturday: DayPlan::with_header(DAY_HEADERS[5]),
            sunday: DayPlan::with_header(DAY_HEADERS[6]),
        }
    }

    pub fn day(&self, weekday: Weekday) -> &DayPlan {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    fn day_mut(&mut self, weekday: Weekday) -> &mut DayPlan {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// All weekdays in canonical Monday-start order.
    pub fn weekdays() -> [Weekday; 7] {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
    }

    /// Load the snapshot written by a previous `update` run.
    pub fn load(path: &Path) -> BoteResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| BoteError::NoSnapshot(path.display().to_string()))?;
        serde_json::from_str(&content).map_err(|e| BoteError::Serialization(e.to_string()))
    }

    /// Persist the snapshot, overwriting the previous one wholesale.
    pub fn save(&self, path: &Path) -> BoteResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BoteError::Serialization(e.to_string()))?;

        // Write via a temp file so a crashed run never leaves a torn snapshot
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, path)?;
        Ok(())
    }
}

/// Merge normalized events from both feeds into a fresh weekly schedule.
///
/// Substitution entries are filed first (input order, with a section header
/// and a separator when the bucket already has lines), then the
/// relevance-filtered calendar entries in stable date order. If the whole
/// week ends up empty, every day gets the fallback notice.
pub fn aggregate(
    calendar_events: &[Event],
    substitution_events: &[Event],
    reference: NaiveDate,
) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::with_headers();

    for weekday in WeeklySchedule::weekdays() {
        let lines: Vec<String> = substitution_events
            .iter()
            .filter(|event| event.weekday == weekday)
            .map(Event::to_line)
            .collect();
        if lines.is_empty() {
            continue;
        }

        let bucket = schedule.day_mut(weekday);
        if !bucket.subjects.is_empty() {
            bucket.subjects.push(SECTION_SEPARATOR.to_string());
        }
        bucket.subjects.push(SUBSTITUTION_HEADER.to_string());
        bucket.subjects.extend(lines);
    }

    for weekday in WeeklySchedule::weekdays() {
        let mut events: Vec<&Event> = calendar_events
            .iter()
            .filter(|event| event.weekday == weekday)
            .filter(|event| match event.date {
                Some(date) => {
                    relevance::within_grace(date, reference)
                        && relevance::is_relevant(date, reference)
                }
                None => false,
            })
            .collect();
        // Stable sort: equal dates keep feed order
        events.sort_by_key(|event| event.sort_date());

        let bucket = schedule.day_mut(weekday);
        bucket.subjects.extend(events.iter().map(|e| e.to_line()));
    }

    let week_is_empty = WeeklySchedule::weekdays()
        .iter()
        .all(|weekday| schedule.day(*weekday).actionable_lines() == 0);
    if week_is_empty {
        for weekday in WeeklySchedule::weekdays() {
            schedule
                .day_mut(weekday)
                .subjects
                .push(NO_EVENTS_NOTICE.to_string());
        }
    }

    schedule
}
