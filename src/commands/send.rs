use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use klassenbote_core::config::KlassenboteConfig;
use klassenbote_core::messenger::Messenger;
use klassenbote_core::render::{render_daily, render_weekly, TimeOfDay};
use klassenbote_core::schedule::WeeklySchedule;
use owo_colors::OwoColorize;

pub async fn run(
    weekly: bool,
    time_of_day: Option<TimeOfDay>,
    send: bool,
    group: Option<String>,
    reference: NaiveDate,
) -> Result<()> {
    let config = KlassenboteConfig::load()?;
    let schedule = WeeklySchedule::load(&config.schedule_path())?;

    let time_of_day = time_of_day
        .or_else(time_of_day_from_env)
        .unwrap_or_default();
    let weekday = reference.weekday();

    let text = if weekly {
        render_weekly(&schedule, weekday, time_of_day, &config.class_name)
    } else {
        render_daily(&schedule, weekday, time_of_day, &config.class_name)
    };

    let send_mode = send || env_flag("KLASSENBOTE_SEND");
    if !send_mode {
        println!("{}", "Dry-run, printing instead of sending:".yellow());
        println!();
        println!("{text}");
        return Ok(());
    }

    let target = group
        .or_else(|| std::env::var("KLASSENBOTE_GROUP_ID").ok())
        .or_else(|| config.group_id.clone())
        .context(
            "No group chat configured.\n\n\
            Set group_id in the config file, export KLASSENBOTE_GROUP_ID,\n\
            or pass --group.",
        )?;

    let messenger = Messenger::from_name(&config.messenger);
    messenger.send(&target, &text).await?;

    println!("{}", format!("Sent to {target}").green());
    Ok(())
}

fn time_of_day_from_env() -> Option<TimeOfDay> {
    match std::env::var("KLASSENBOTE_TIME_OF_DAY").ok()?.as_str() {
        "afternoon" => Some(TimeOfDay::Afternoon),
        "morning" => Some(TimeOfDay::Morning),
        _ => None,
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}
