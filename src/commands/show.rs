use anyhow::Result;
use klassenbote_core::config::KlassenboteConfig;
use klassenbote_core::dates;
use klassenbote_core::schedule::WeeklySchedule;

use crate::render::Render;

pub fn run(day: Option<&str>) -> Result<()> {
    let config = KlassenboteConfig::load()?;
    let schedule = WeeklySchedule::load(&config.schedule_path())?;

    match day {
        Some(name) => {
            let weekday = dates::weekday_from_german(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown weekday '{}'. Expected one of: {}",
                    name,
                    dates::GERMAN_WEEKDAYS.join(", ")
                )
            })?;
            println!("{}", crate::render::render_day(weekday, schedule.day(weekday)));
        }
        None => println!("{}", schedule.render()),
    }

    Ok(())
}
