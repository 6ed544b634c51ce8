/// Main entry point for the Cafecito journal
///
/// This file sets up logging, loads the configuration, parses command line
/// arguments and dispatches to the journal commands.

use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate, Timelike};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use cafecito_journal::commands::{self, ReportText};
use cafecito_journal::{
    cancellation, DateRange, DomainError, GeminiService, JournalApp, JournalConfig, JournalStorage,
    ReflectionClient,
};

/// Command line arguments for the journal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses the config file or a default location in the home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Path to the config file (default: ~/.cafecito/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// PIN, required when the journal is locked
    #[arg(long)]
    pin: Option<String>,

    /// Print responses as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new entry
    Write {
        text: String,
        /// calma, alegria, ansiedad, tristeza, ira or misterio
        #[arg(long)]
        emotion: Option<String>,
        /// Backdate the entry to YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// personal, trabajo, reflexion or otro
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        favorite: bool,
    },
    /// List entries, newest first
    Entries {
        /// Only entries of this YYYY-MM-DD day
        #[arg(long)]
        day: Option<String>,
    },
    /// Delete an entry
    DeleteEntry { id: String },
    /// Manage goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },
    /// Current and longest writing streak
    Streak,
    /// Month calendar with the days you wrote
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Dominant emotion per day over the last 120 days
    MoodMap,
    /// Overview numbers
    Metrics,
    /// Greeting and today's writing prompt
    Prompt,
    /// Ask for a reflection over a date range
    Reflect {
        /// First day, YYYY-MM-DD (default: six days ago)
        #[arg(long)]
        start: Option<String>,
        /// Last day, YYYY-MM-DD (default: today)
        #[arg(long)]
        end: Option<String>,
        /// Save the reflection as a report
        #[arg(long)]
        archive: bool,
    },
    /// List archived reports
    Reports,
    /// Delete an archived report
    DeleteReport { id: String },
    /// Set or check the PIN
    Pin {
        #[command(subcommand)]
        action: PinAction,
    },
    /// Flip a preference
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Delete everything
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum GoalAction {
    Add { text: String },
    Done { id: String },
    Undo { id: String },
    Delete { id: String },
    List,
}

#[derive(Subcommand, Debug)]
enum PinAction {
    /// Set the PIN; pass the current one with --pin to change it
    Set { new_pin: String },
    /// Check a PIN
    Unlock { attempt: String },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    Biometrics,
    AutoLock,
}

/// Print `value` as JSON, or as the given text
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn parse_or(value: Option<&str>, default: NaiveDate) -> Result<NaiveDate, DomainError> {
    value.map(commands::parse_day).unwrap_or(Ok(default))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = JournalConfig::load(args.config.as_deref())?;

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        config.logging.level.as_str()
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("cafecito_journal={},cafecito={}", log_level, log_level))
        .with_writer(std::io::stderr)
        .init();

    // Determine database path
    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => config.resolved_db_path()?,
    };

    info!("Using database at: {}", db_path.display());
    let app = JournalApp::new(db_path)?;
    let storage = app.storage();

    let now = Local::now();
    let today = now.date_naive();
    let json = args.json;

    // Everything but the prompt and PIN checks sits behind the lock
    let gated = !matches!(args.command, Command::Prompt | Command::Pin { action: PinAction::Unlock { .. } });
    if gated && storage.get_settings()?.is_locked() {
        commands::unlock(storage, args.pin.as_deref().unwrap_or_default())?;
    }

    match args.command {
        Command::Write { text, emotion, date, category, tags, favorite } => {
            let params = commands::WriteEntryParams { text, emotion, date, category, tags, favorite };
            let response = commands::write_entry(storage, params, today)?;
            emit(json, &response, |r| r.message.clone())?;
        }
        Command::Entries { day } => {
            let response = commands::list_entries(storage, commands::ListEntriesParams { day })?;
            emit(json, &response, |r| {
                let mut out = r.message.clone();
                for e in &r.entries {
                    let emotion = e.emotion.as_deref().unwrap_or("-");
                    out.push_str(&format!("\n\n{} {} [{}] {}\n{}", e.day, e.time, emotion, e.id, e.text));
                }
                out
            })?;
        }
        Command::DeleteEntry { id } => {
            let response = commands::delete_entry(storage, commands::DeleteEntryParams { entry_id: id })?;
            emit(json, &response, |r| r.message.clone())?;
        }
        Command::Goal { action } => match action {
            GoalAction::Add { text } => {
                let response = commands::add_goal(storage, commands::AddGoalParams { text })?;
                emit(json, &response, |r| r.message.clone())?;
            }
            GoalAction::Done { id } => {
                let params = commands::SetGoalParams { goal_id: id, completed: true };
                emit(json, &commands::set_goal_completed(storage, params)?, |r| r.message.clone())?;
            }
            GoalAction::Undo { id } => {
                let params = commands::SetGoalParams { goal_id: id, completed: false };
                emit(json, &commands::set_goal_completed(storage, params)?, |r| r.message.clone())?;
            }
            GoalAction::Delete { id } => {
                let params = commands::DeleteGoalParams { goal_id: id };
                emit(json, &commands::delete_goal(storage, params)?, |r| r.message.clone())?;
            }
            GoalAction::List => {
                let response = commands::list_goals(storage)?;
                emit(json, &response, |r| {
                    let mut out = format!("{}/{} metas logradas", r.completed_count, r.total_count);
                    for g in &r.goals {
                        out.push_str(&format!("\n[{}] {} ({})", g.status, g.text, g.id));
                    }
                    out
                })?;
            }
        },
        Command::Streak => {
            let response = commands::streak_status(storage, app.analytics(), today)?;
            emit(json, &response, |r| {
                format!(
                    "{}\nRacha actual: {} días, la más larga: {} días, récord: {} días",
                    r.message, r.current_streak, r.longest_streak, r.highest_recorded
                )
            })?;
        }
        Command::Calendar { year, month } => {
            let year = year.unwrap_or(today.year());
            let month = month.unwrap_or(today.month());
            let response = commands::calendar_view(storage, app.analytics(), year, month)?;
            emit(json, &response, |r| format!("{:02}/{}\n{}", r.month, r.year, r.render()))?;
        }
        Command::MoodMap => {
            let response = commands::mood_map_view(storage, today)?;
            emit(json, &response, |r| {
                let mut out = format!("{} días con una emoción dominante", r.tagged_days);
                for cell in r.days.iter().filter(|c| c.dominant.is_some()) {
                    out.push_str(&format!("\n{} {}", cell.date, cell.dominant.unwrap_or("-")));
                }
                out
            })?;
        }
        Command::Metrics => {
            let metrics = commands::metrics_view(storage, app.analytics(), today)?;
            emit(json, &metrics, |m| {
                format!(
                    "Entradas: {}\nRacha: {} días (la más larga {})\nMetas logradas: {}/{}",
                    m.total_entries, m.current_streak, m.longest_streak, m.completed_goals, m.total_goals
                )
            })?;
        }
        Command::Prompt => {
            let response = commands::prompt_view(today, now.hour());
            emit(json, &response, |r| format!("{}\n{}", r.greeting, r.prompt))?;
        }
        Command::Reflect { start, end, archive } => {
            let end = parse_or(end.as_deref(), today)?;
            let start = parse_or(start.as_deref(), end - chrono::Duration::days(6))?;
            let range = DateRange::new(start, end)?;

            let service = GeminiService::new(&config.reflection, config.reflection.api_key()?)?;
            let app = app.with_reflection(ReflectionClient::new(service));

            let (handle, token) = cancellation();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    handle.cancel();
                }
            });

            eprintln!("Leyendo tus entradas...");
            let reflection = app.reflect(range, &token).await?;
            emit(json, &reflection, |r| ReportText::from(r).render())?;

            if archive {
                let report = app.archive(reflection)?;
                eprintln!("Guardado como informe {}", report.id);
            }
        }
        Command::Reports => {
            let response = commands::list_reports(storage)?;
            emit(json, &response, |r| {
                let mut out = format!("{} informes", r.total_count);
                for report in &r.reports {
                    out.push_str(&format!(
                        "\n\n== {} (guardado el {})\n{}",
                        report.id,
                        report.saved_at.format("%d/%m/%Y %H:%M"),
                        ReportText::from(report).render()
                    ));
                }
                out
            })?;
        }
        Command::DeleteReport { id } => {
            let params = commands::DeleteReportParams { report_id: id };
            emit(json, &commands::delete_report(storage, params)?, |r| r.message.clone())?;
        }
        Command::Pin { action } => match action {
            PinAction::Set { new_pin } => {
                let params = commands::SetPinParams { pin: new_pin, current: args.pin };
                emit(json, &commands::set_pin(storage, params)?, |r| r.message.clone())?;
            }
            PinAction::Unlock { attempt } => {
                emit(json, &commands::unlock(storage, &attempt)?, |r| r.message.clone())?;
            }
        },
        Command::Settings { action } => {
            let preference = match action {
                SettingsAction::Biometrics => commands::Preference::Biometrics,
                SettingsAction::AutoLock => commands::Preference::AutoLock,
            };
            let response = commands::toggle_preference(storage, preference)?;
            emit(json, &response, |r| {
                let label = match r.preference {
                    "biometrics" => "Biometría",
                    _ => "Bloqueo automático",
                };
                format!("{}: {}", label, if r.enabled { "activado" } else { "desactivado" })
            })?;
        }
        Command::Reset { yes } => {
            if !yes {
                eprintln!("Esto borra todas las entradas, metas, informes y ajustes. Volvé a correrlo con --yes para confirmar.");
                return Ok(());
            }
            emit(json, &commands::reset_journal(storage)?, |r| r.message.clone())?;
        }
    }

    Ok(())
}

