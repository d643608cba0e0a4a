use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use klassenbote_core::config::KlassenboteConfig;
use klassenbote_core::event::Event;
use klassenbote_core::{feed, normalize, schedule};
use log::{info, warn};
use owo_colors::OwoColorize;

pub fn run(calendar: &Path, substitutions: Option<&Path>, reference: NaiveDate) -> Result<()> {
    let config = KlassenboteConfig::load()?;

    // Calendar feed is mandatory: no schedule without it
    let calendar_rows = feed::calendar::read(calendar)?;

    let mut dropped = 0usize;
    let mut calendar_events: Vec<Event> = Vec::new();
    for row in &calendar_rows {
        match normalize::normalize_calendar_row(row) {
            Ok(event) => calendar_events.push(event),
            Err(reason) => {
                warn!("dropping calendar row '{}': {}", row.titel, reason);
                dropped += 1;
            }
        }
    }

    let substitution_rows = feed::substitution::read(substitutions)?;
    let today = reference.weekday();
    let substitution_events: Vec<Event> = substitution_rows
        .iter()
        .map(|row| normalize::normalize_substitution_row(row, today))
        .collect();

    let weekly = schedule::aggregate(&calendar_events, &substitution_events, reference);
    let path = config.schedule_path();
    weekly.save(&path)?;
    info!("schedule snapshot written for reference date {reference}");

    println!(
        "{}",
        format!(
            "📅 {} events, 🔄 {} substitutions",
            calendar_events.len(),
            substitution_events.len()
        )
        .green()
    );
    if dropped > 0 {
        println!("{}", format!("   {dropped} rows dropped (see log)").yellow());
    }
    println!("   {}", format!("Snapshot: {}", path.display()).dimmed());

    Ok(())
}
