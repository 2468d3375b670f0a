//! `timetable` CLI — check schedules for clashes and export them as text.
//!
//! Every subcommand reads the JSON state document written by the timetable
//! app (or produced by its backup export).
//!
//! ## Usage
//!
//! ```sh
//! # List clashing slots in the default schedule
//! timetable conflicts -i backup.json
//!
//! # Same, as JSON keyed by slot id
//! timetable conflicts -i backup.json --json
//!
//! # Detailed text export of a specific schedule (stdin → stdout)
//! cat backup.json | timetable export --schedule 1718000000000-k3j9x0a1b
//!
//! # Compact 24-hour export with notes, saved as <dir>/<schedule-name>-schedule.txt
//! timetable export -i backup.json --spacing compact --time-format 24h --notes --download out/
//!
//! # One line per day
//! timetable export -i backup.json --format inline
//!
//! # Check a backup before importing it
//! timetable validate -i backup.json
//! ```

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use timetable_core::storage::parse_document;
use timetable_core::{
    conflict_message, detect_conflicts, export_filename, generate_detailed_text,
    generate_detailed_text_now, generate_inline_text, AppState, ExportFormatOptions, ScheduleTable,
    Spacing, TimeConflict, TimeFormat,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "timetable", version, about = "Weekly timetable conflict checker and exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report slots whose times overlap on the same day
    Conflicts {
        /// State document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Schedule id (defaults to the default schedule, then the first one)
        #[arg(short, long)]
        schedule: Option<String>,
        /// Print the conflict map as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a schedule as text
    Export {
        /// State document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Schedule id (defaults to the default schedule, then the first one)
        #[arg(short, long)]
        schedule: Option<String>,
        /// Output layout
        #[arg(short, long, value_enum, default_value_t = Layout::Detailed)]
        format: Layout,
        /// JSON file with export options (flags below override it)
        #[arg(long)]
        options: Option<String>,
        /// Leave out rooms
        #[arg(long)]
        no_room: bool,
        /// Leave out teachers
        #[arg(long)]
        no_teacher: bool,
        /// Leave out subject codes
        #[arg(long)]
        no_stub_code: bool,
        /// Include notes
        #[arg(long)]
        notes: bool,
        /// Vertical density: compact, normal or spacious
        #[arg(long)]
        spacing: Option<Spacing>,
        /// Clock convention: 12h or 24h
        #[arg(long)]
        time_format: Option<TimeFormat>,
        /// Timestamp for the "Generated:" line, e.g. 2026-03-14T09:05:00 (defaults to now)
        #[arg(long)]
        generated_at: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long, conflicts_with = "download")]
        output: Option<String>,
        /// Directory to save into, named after the schedule
        #[arg(long)]
        download: Option<PathBuf>,
    },
    /// Check that a state document can be imported
    Validate {
        /// State document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Layout {
    Detailed,
    Inline,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Conflicts {
            input,
            schedule,
            json,
        } => {
            let state = read_state(input.as_deref())?;
            let table = select_schedule(&state, schedule.as_deref())?;
            let conflicts = detect_conflicts(&table.slots);
            tracing::info!(
                schedule = %table.name,
                slots = table.slots.len(),
                conflicting = conflicts.len(),
                "conflict check finished"
            );

            if json {
                // Slot order keeps the output stable.
                let ordered: Vec<&TimeConflict> = table
                    .slots
                    .iter()
                    .filter_map(|slot| conflicts.get(&slot.id))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&ordered)?);
            } else if conflicts.is_empty() {
                println!("No conflicts in {}", table.name);
            } else {
                for slot in &table.slots {
                    let Some(message) = conflict_message(&slot.id, &conflicts) else {
                        continue;
                    };
                    let label = slot
                        .subject_id
                        .as_deref()
                        .and_then(|id| state.subject(id))
                        .map(|s| s.name.as_str())
                        .unwrap_or("(unassigned)");
                    println!(
                        "{} {}-{} {} [{}]: {}",
                        slot.day, slot.start_time, slot.end_time, label, slot.id, message
                    );
                }
            }
        }
        Commands::Export {
            input,
            schedule,
            format,
            options,
            no_room,
            no_teacher,
            no_stub_code,
            notes,
            spacing,
            time_format,
            generated_at,
            output,
            download,
        } => {
            let state = read_state(input.as_deref())?;
            let table = select_schedule(&state, schedule.as_deref())?;

            let text = match format {
                Layout::Inline => generate_inline_text(table, &state.subjects),
                Layout::Detailed => {
                    let mut opts = match options.as_deref() {
                        Some(path) => {
                            let raw = std::fs::read_to_string(path)
                                .with_context(|| format!("Failed to read options file: {}", path))?;
                            ExportFormatOptions::from_json(&raw)
                                .with_context(|| format!("Invalid options file: {}", path))?
                        }
                        None => ExportFormatOptions::default(),
                    };
                    opts.include_room &= !no_room;
                    opts.include_teacher &= !no_teacher;
                    opts.include_stub_code &= !no_stub_code;
                    opts.include_notes |= notes;
                    if let Some(spacing) = spacing {
                        opts.spacing = spacing;
                    }
                    if let Some(time_format) = time_format {
                        opts.time_format = time_format;
                    }

                    match generated_at.as_deref() {
                        Some(raw) => {
                            let at = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                                .with_context(|| format!("Invalid --generated-at: {}", raw))?;
                            generate_detailed_text(table, &state.subjects, &opts, at)
                        }
                        None => generate_detailed_text_now(table, &state.subjects, &opts),
                    }
                }
            };

            let target = match (output, download) {
                (Some(path), _) => Some(PathBuf::from(path)),
                (None, Some(dir)) => Some(dir.join(export_filename(&table.name))),
                (None, None) => None,
            };
            write_output(target, &text)?;
        }
        Commands::Validate { input } => {
            let state = read_state(input.as_deref())?;
            let slots: usize = state.schedule_tables.iter().map(|t| t.slots.len()).sum();
            let inverted = state
                .schedule_tables
                .iter()
                .flat_map(|t| &t.slots)
                .filter(|s| s.start_time >= s.end_time)
                .count();

            println!("Version:    {}", state.version);
            println!("Subjects:   {}", state.subjects.len());
            println!("Schedules:  {}", state.schedule_tables.len());
            println!("Slots:      {}", slots);
            if inverted > 0 {
                tracing::warn!(inverted, "slots end at or before their start");
                println!("Invalid time ranges: {}", inverted);
            }
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "timetable=debug,timetable_core=debug"
    } else {
        "timetable=info,timetable_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Pick the schedule named by `--schedule`, else the default schedule, else
/// the first one.
fn select_schedule<'a>(state: &'a AppState, id: Option<&str>) -> Result<&'a ScheduleTable> {
    match id {
        Some(id) => state
            .schedule(id)
            .with_context(|| format!("No schedule with id '{}'", id)),
        None => state
            .default_schedule()
            .or_else(|| state.schedule_tables.first())
            .context("The document has no schedules"),
    }
}

fn read_state(path: Option<&str>) -> Result<AppState> {
    let raw = read_input(path)?;
    let state = parse_document(&raw).context("Failed to load state document")?;
    tracing::debug!(
        subjects = state.subjects.len(),
        schedules = state.schedule_tables.len(),
        "state document loaded"
    );
    Ok(state)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            tracing::info!(path = %path.display(), "schedule written");
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
