use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use schoolday::schedule::{WeekSchedule, current_lesson_now};
use schoolday_cli::load::{load_periods, load_specials, load_timetable, parse_at};
use schoolday_cli::render::{current_line, day_header, period_line, slot_line};
use schoolday_config::{FallbackCatalog, ScheduleConfig};
use schoolday_models::SchoolDay;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "schoolday-cli")]
#[command(about = "Schoolday CLI - Inspect merged timetables from JSON exports", long_about = None)]
struct Cli {
    /// Log as JSON lines instead of compact text
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Sources {
    /// Period definition document (falls back to the built-in table if missing)
    #[arg(short = 'p', long)]
    periods: Option<PathBuf>,

    /// Timetable document
    #[arg(short = 't', long)]
    timetable: PathBuf,

    /// Grade used to add special lessons (1-5 have breakfast, nap, snack)
    #[arg(short = 'g', long)]
    grade: Option<u8>,

    /// Class document to read the grade level from
    #[arg(long)]
    class: Option<PathBuf>,

    /// Override INSERT_BREAKS
    #[arg(long)]
    breaks: Option<bool>,

    /// Override FALLBACK_PERIODS (standard or compact)
    #[arg(long)]
    fallback: Option<FallbackCatalog>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the processed period catalog
    Periods {
        /// Period definition document
        #[arg(short = 'p', long)]
        periods: Option<PathBuf>,

        /// Override FALLBACK_PERIODS (standard or compact)
        #[arg(long)]
        fallback: Option<FallbackCatalog>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the merged weekly schedule
    Schedule {
        #[command(flatten)]
        sources: Sources,

        /// Only print this day (Monday..Friday)
        #[arg(short = 'd', long)]
        day: Option<SchoolDay>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the lesson running at a given time
    Current {
        #[command(flatten)]
        sources: Sources,

        /// Instant to evaluate, "YYYY-MM-DD HH:MM" (default: now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Re-evaluate the current lesson every CLOCK_TICK_SECONDS until Ctrl-C
    Watch {
        #[command(flatten)]
        sources: Sources,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    schoolday_config::load_dotenv();

    let cli = Cli::parse();
    if cli.json_logs {
        schoolday_observability::init_json_logging();
    } else {
        schoolday_observability::init_basic_console_logging();
    }

    let config = ScheduleConfig::from_env();
    debug!(?config, "schedule configuration");

    match cli.command {
        Commands::Periods {
            periods,
            fallback,
            json,
        } => handle_periods(periods, fallback.unwrap_or(config.fallback), json),
        Commands::Schedule { sources, day, json } => handle_schedule(&sources, &config, day, json),
        Commands::Current { sources, at } => handle_current(&sources, &config, at.as_deref()),
        Commands::Watch { sources } => handle_watch(&sources, &config).await,
    }
}

fn build_week(sources: &Sources, config: &ScheduleConfig) -> Result<WeekSchedule> {
    let config = ScheduleConfig {
        fallback: sources.fallback.unwrap_or(config.fallback),
        insert_breaks: sources.breaks.unwrap_or(config.insert_breaks),
        ..config.clone()
    };
    let defs = load_periods(sources.periods.as_deref())?;
    let entries = load_timetable(&sources.timetable)?;
    let specials = load_specials(sources.grade, sources.class.as_deref())?;
    Ok(WeekSchedule::build(&defs, &entries, &specials, &config))
}

fn handle_periods(path: Option<PathBuf>, fallback: FallbackCatalog, json: bool) -> Result<()> {
    let defs = load_periods(path.as_deref())?;
    let catalog = schoolday::schedule::normalize_with(&defs, fallback);
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        for period in &catalog {
            println!("{}", period_line(period));
        }
    }
    Ok(())
}

fn handle_schedule(
    sources: &Sources,
    config: &ScheduleConfig,
    day: Option<SchoolDay>,
    json: bool,
) -> Result<()> {
    let week = build_week(sources, config)?;
    let days: Vec<SchoolDay> = match day {
        Some(day) => vec![day],
        None => SchoolDay::ALL.to_vec(),
    };

    if json {
        let slots: Vec<_> = week.slots().iter().filter(|s| days.contains(&s.day)).collect();
        println!("{}", serde_json::to_string_pretty(&slots)?);
        return Ok(());
    }

    for day in days {
        println!("{}", day_header(day));
        for slot in week.day(day) {
            println!("{}", slot_line(slot));
        }
        println!();
    }
    Ok(())
}

fn handle_current(sources: &Sources, config: &ScheduleConfig, at: Option<&str>) -> Result<()> {
    let week = build_week(sources, config)?;
    let now = parse_at(at)?;
    println!("{}", current_line(week.current_lesson(now)));
    Ok(())
}

async fn handle_watch(sources: &Sources, config: &ScheduleConfig) -> Result<()> {
    let week = build_week(sources, config)?;
    let mut ticker = tokio::time::interval(config.clock_tick);
    let mut last: Option<String> = None;

    info!(tick = ?config.clock_tick, "watching current lesson, press Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let line = current_line(current_lesson_now(week.slots()));
                if last.as_deref() != Some(line.as_str()) {
                    println!("{line}");
                    last = Some(line);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping");
                break;
            }
        }
    }
    Ok(())
}
