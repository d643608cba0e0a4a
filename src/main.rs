mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use klassenbote_core::render::TimeOfDay;

#[derive(Parser)]
#[command(name = "klassenbote")]
#[command(about = "Aggregate the school week and notify the class group chat")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a fresh weekly snapshot from the raw feeds
    Update {
        /// Calendar export file (semicolon-delimited)
        #[arg(long)]
        calendar: PathBuf,

        /// Substitution plan JSON (optional)
        #[arg(long)]
        substitutions: Option<PathBuf>,

        /// Reference date override (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Render today's message and deliver it (dry-run prints by default)
    Send {
        /// Send the full week overview instead of a single day
        #[arg(long)]
        weekly: bool,

        /// Greeting variant (defaults to KLASSENBOTE_TIME_OF_DAY, then morning)
        #[arg(long, value_enum)]
        time_of_day: Option<TimeOfDayArg>,

        /// Actually deliver the message instead of printing it
        #[arg(long)]
        send: bool,

        /// Override the target group chat id
        #[arg(long)]
        group: Option<String>,

        /// Reference date override (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Print the persisted snapshot
    Show {
        /// Only this weekday (German name, e.g. "Mittwoch")
        #[arg(long)]
        day: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TimeOfDayArg {
    Morning,
    Afternoon,
}

impl From<TimeOfDayArg> for TimeOfDay {
    fn from(arg: TimeOfDayArg) -> Self {
        match arg {
            TimeOfDayArg::Morning => TimeOfDay::Morning,
            TimeOfDayArg::Afternoon => TimeOfDay::Afternoon,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Update {
            calendar,
            substitutions,
            date,
        } => {
            let reference = resolve_reference_date(date.as_deref())?;
            commands::update::run(&calendar, substitutions.as_deref(), reference)
        }
        Commands::Send {
            weekly,
            time_of_day,
            send,
            group,
            date,
        } => {
            let reference = resolve_reference_date(date.as_deref())?;
            commands::send::run(
                weekly,
                time_of_day.map(TimeOfDay::from),
                send,
                group,
                reference,
            )
            .await
        }
        Commands::Show { day } => commands::show::run(day.as_deref()),
    }
}

fn resolve_reference_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date '{s}'. Expected YYYY-MM-DD")),
        None => Ok(Local::now().date_naive()),
    }
}
