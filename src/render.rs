//! TUI rendering for snapshot inspection.
//!
//! Colored terminal output for the `show` command, separate from the
//! outgoing message renderer in klassenbote-core.

use chrono::Weekday;
use klassenbote_core::dates::german_weekday_name;
use klassenbote_core::schedule::{DayPlan, WeeklySchedule};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for WeeklySchedule {
    fn render(&self) -> String {
        let mut sections = Vec::new();
        for weekday in WeeklySchedule::weekdays() {
            sections.push(render_day(weekday, self.day(weekday)));
        }
        sections.join("\n\n")
    }
}

pub fn render_day(weekday: Weekday, plan: &DayPlan) -> String {
    let mut lines = vec![
        format!("📆 {}", german_weekday_name(weekday).bold()),
        format!("   {}", plan.message),
    ];

    if plan.subjects.is_empty() {
        lines.push(format!("   {}", "(no entries)".dimmed()));
    } else {
        for subject in &plan.subjects {
            lines.push(format!("   • {subject}"));
        }
    }

    lines.join("\n")
}
