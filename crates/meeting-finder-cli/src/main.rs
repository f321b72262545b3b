//! `meeting-finder` CLI — find free meeting slots from a day of calendar events.
//!
//! ## Usage
//!
//! ```sh
//! # Find slots for the request in a calendar file (JSON on stdout)
//! meeting-finder query -i day.json
//!
//! # Same, read from stdin, as a text table
//! cat day.json | meeting-finder query --format text
//!
//! # Reproduce the half-hour occupancy grid
//! meeting-finder --granularity 30 query -i day.json
//!
//! # Load finder settings from a JSON file
//! meeting-finder --config finder.json query -i day.json
//!
//! # Show merged busy periods for some attendees
//! meeting-finder busy -i day.json --attendee alice --attendee bob
//! ```
//!
//! The input document is `{ "events": [...], "request": {...} }`. Logs go to stderr
//! and are controlled by `RUST_LOG`.

use std::collections::BTreeSet;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use meeting_finder::{
    conflicting_attendees, Attendee, Availability, Coverage, Event, FinderConfig, FreeSlotFinder,
    MeetingRequest, TimeRange,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "meeting-finder",
    version,
    about = "Find free meeting slots in a day of calendar events"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Finder settings as a JSON file (e.g. {"granularity_minutes": 30})
    #[arg(long, global = true)]
    config: Option<String>,

    /// Occupancy grid size in minutes; overrides the config file
    #[arg(long, global = true)]
    granularity: Option<u32>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find slots where the requested meeting fits
    Query {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Show merged busy periods for a set of attendees
    Busy {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Attendee to include (repeatable)
        #[arg(short, long = "attendee", required = true)]
        attendees: Vec<String>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// The document read from the input.
#[derive(Deserialize)]
struct Calendar {
    #[serde(default)]
    events: Vec<Event>,
    request: Option<MeetingRequest>,
}

#[derive(Serialize)]
struct SlotReport {
    #[serde(flatten)]
    when: TimeRange,
    /// Optional attendees who have a conflict somewhere in this slot.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    missing_optional: BTreeSet<Attendee>,
}

#[derive(Serialize)]
struct QueryReport {
    coverage: Coverage,
    slots: Vec<SlotReport>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.granularity)?;
    let finder = FreeSlotFinder::new(config).context("Invalid finder configuration")?;
    debug!(granularity = finder.granularity_minutes(), "finder ready");

    match cli.command {
        Commands::Query {
            input,
            output,
            format,
        } => {
            let calendar = read_calendar(input.as_deref())?;
            let request = calendar
                .request
                .context("Input has no \"request\" to schedule")?;

            let availability = finder.query_with_coverage(&calendar.events, &request);
            info!(
                slots = availability.slots.len(),
                coverage = ?availability.coverage,
                "query finished"
            );
            let report = build_report(&calendar.events, &request, availability);

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&report)?,
                Format::Text => render_report(&report),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Busy {
            input,
            output,
            attendees,
            format,
        } => {
            let calendar = read_calendar(input.as_deref())?;
            let attendees: BTreeSet<Attendee> = attendees.into_iter().collect();

            let busy = finder.busy_periods(&calendar.events, &attendees);

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&busy)?,
                Format::Text => render_ranges(&busy),
            };
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build the finder config from an optional JSON file and an optional override.
fn load_config(path: Option<&str>, granularity: Option<u32>) -> Result<FinderConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => FinderConfig::default(),
    };
    if let Some(granularity) = granularity {
        config.granularity_minutes = granularity;
    }
    Ok(config)
}

fn build_report(
    events: &[Event],
    request: &MeetingRequest,
    availability: Availability,
) -> QueryReport {
    let slots = availability
        .slots
        .into_iter()
        .map(|slot| {
            let missing_optional = if availability.coverage == Coverage::RequiredOnly {
                conflicting_attendees(events, slot, request.optional_attendees())
            } else {
                BTreeSet::new()
            };
            SlotReport {
                when: slot,
                missing_optional,
            }
        })
        .collect();

    QueryReport {
        coverage: availability.coverage,
        slots,
    }
}

fn render_report(report: &QueryReport) -> String {
    let coverage = match report.coverage {
        Coverage::AllAttendees => "all attendees",
        Coverage::RequiredOnly => "required attendees only",
        Coverage::Unavailable => "no slot available",
    };
    let mut out = format!("coverage: {}\n", coverage);
    for slot in &report.slots {
        out.push_str(&format!("{}  {:>4} min", slot.when, slot.when.duration()));
        if !slot.missing_optional.is_empty() {
            let names: Vec<&str> = slot.missing_optional.iter().map(String::as_str).collect();
            out.push_str(&format!("  (missing: {})", names.join(", ")));
        }
        out.push('\n');
    }
    out
}

fn render_ranges(ranges: &[TimeRange]) -> String {
    ranges
        .iter()
        .map(|r| format!("{}  {:>4} min\n", r, r.duration()))
        .collect()
}

fn read_calendar(path: Option<&str>) -> Result<Calendar> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to decode calendar JSON")
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
