//! Message rendering.
//!
//! Pure functions from `(schedule, weekday, time of day)` to outgoing text.
//! The renderer never touches the feeds; it only reads the persisted
//! snapshot, so a failed send can be retried without recomputing.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::dates::german_weekday_name;
use crate::schedule::WeeklySchedule;

/// Fixed signature appended to every outgoing message.
pub const SIGNATURE: &str = "Eine automatische Nachricht deines Klassen-Bots.";

/// Banner heading the weekly overview.
const WEEKLY_BANNER: &str = "📆 *WOCHENÜBERSICHT* 📆";

/// Greeting variant, selected by an external signal (default morning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
}

impl TimeOfDay {
    fn greeting(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Guten Morgen",
            TimeOfDay::Afternoon => "Guten Nachmittag",
        }
    }
}

fn greeting_line(weekday: Weekday, time_of_day: TimeOfDay, class_name: &str) -> String {
    format!(
        "*{} {}! - {}*",
        time_of_day.greeting(),
        class_name,
        german_weekday_name(weekday)
    )
}

/// Render the message for a single day.
pub fn render_daily(
    schedule: &WeeklySchedule,
    weekday: Weekday,
    time_of_day: TimeOfDay,
    class_name: &str,
) -> String {
    let day = schedule.day(weekday);

    let mut text = greeting_line(weekday, time_of_day, class_name);
    text.push_str("\n\n");
    text.push_str(&day.message);
    text.push_str("\n\n");

    for line in &day.subjects {
        text.push_str(&format!("• {line}\n"));
    }

    text.push('\n');
    text.push_str(SIGNATURE);
    text
}

/// Render the full week overview.
///
/// Today's lines appear in full; every other day is previewed as its first
/// line plus a "+N weitere" count. Days without lines are omitted entirely.
pub fn render_weekly(
    schedule: &WeeklySchedule,
    weekday: Weekday,
    time_of_day: TimeOfDay,
    class_name: &str,
) -> String {
    let mut sections = vec![
        greeting_line(weekday, time_of_day, class_name),
        WEEKLY_BANNER.to_string(),
    ];

    let today = schedule.day(weekday);
    if !today.subjects.is_empty() {
        let mut section = format!("*HEUTE ({}):*", german_weekday_name(weekday));
        for line in &today.subjects {
            section.push_str(&format!("\n• {line}"));
        }
        sections.push(section);
    }

    let today_index = weekday.num_days_from_monday() as usize;
    let weekdays = WeeklySchedule::weekdays();

    let upcoming = preview_section("*KOMMENDE TAGE:*", &weekdays[today_index + 1..], schedule);
    if let Some(section) = upcoming {
        sections.push(section);
    }

    // Wrap around to the days already behind us, but only when the week
    // actually has such days
    if weekday != Weekday::Mon {
        let next_week = preview_section("*NÄCHSTE WOCHE:*", &weekdays[..today_index], schedule);
        if let Some(section) = next_week {
            sections.push(section);
        }
    }

    sections.push(SIGNATURE.to_string());
    sections.join("\n\n")
}

/// One preview bullet per non-empty day: first line plus remainder count.
fn preview_section(
    header: &str,
    weekdays: &[Weekday],
    schedule: &WeeklySchedule,
) -> Option<String> {
    let mut bullets = Vec::new();
    for weekday in weekdays {
        let day = schedule.day(*weekday);
        let Some(first) = day.subjects.first() else {
            continue;
        };
        let mut bullet = format!("• {}: {}", german_weekday_name(*weekday), first);
        if day.subjects.len() > 1 {
            bullet.push_str(&format!(" (+{} weitere)", day.subjects.len() - 1));
        }
        bullets.push(bullet);
    }

    if bullets.is_empty() {
        return None;
    }
    Some(format!("{header}\n{}", bullets.join("\n")))
}
