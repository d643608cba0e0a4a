//! Relevance filtering for calendar events.
//!
//! Substitution entries are always relevant for their assigned day; only
//! calendar events pass through these checks. The two windows are
//! independent: the trailing grace window is applied at ingestion, the
//! forward rule when filling the schedule.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Events older than this many days are excluded at ingestion.
pub const GRACE_DAYS: i64 = 7;

/// Forward horizon for events outside the reference year.
pub const HORIZON_MONTHS: u32 = 3;

/// Trailing grace window: a date exactly `GRACE_DAYS` old still passes.
pub fn within_grace(date: NaiveDate, reference: NaiveDate) -> bool {
    date >= reference - Duration::days(GRACE_DAYS)
}

/// Forward relevance: same year as the reference, or within the next three
/// months. Keeps the message focused on the current planning horizon
/// without hiding year-spanning items like holidays.
pub fn is_relevant(date: NaiveDate, reference: NaiveDate) -> bool {
    if date.year() == reference.year() {
        return true;
    }
    let horizon = reference
        .checked_add_months(Months::new(HORIZON_MONTHS))
        .unwrap_or(NaiveDate::MAX);
    date > reference && date < horizon
}
