//! `slots` CLI: schedule requests, inspect availability and check conflicts
//! against a calendar snapshot from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Decide a request (stdin → stdout)
//! echo '{"kind":"flexible","duration_minutes":30,"earliest":"2026-03-16T00:00:00Z"}' \
//!   | slots schedule --calendar calendar.json
//!
//! # Decide a request from a file, checking buffers on exact times too
//! slots --prefs prefs.json schedule -r request.json -c calendar.json --buffer-exact
//!
//! # Show busy cover and free intervals for a window
//! slots free -c calendar.json --from 2026-03-16T00:00 --to 2026-03-20T00:00
//!
//! # Check a proposed time
//! slots check -c calendar.json --start 2026-03-16T09:30 --end 2026-03-16T10:00
//!
//! # Suggest a meeting length
//! slots suggest-duration --kind team-meeting --attendees 8
//! ```
//!
//! Naive datetimes are read in the preferences' timezone. Logs go to stderr
//! (`RUST_LOG`, or `-v` for debug), so stdout is always JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

use slot_engine::recurrence::{self, RecurringCommitment};
use slot_engine::slots::DEFAULT_MAX_RESULTS;
use slot_engine::{
    conflict, parse_instant, schedule, suggest_duration, Availability, BusyEvent, Interval,
    MeetingKind, Preferences, SchedulerOptions, SchedulingRequest,
};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Availability, conflict checks and scheduling decisions as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Preferences JSON file (defaults apply when omitted)
    #[arg(long, global = true, env = "SLOTS_PREFS")]
    prefs: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide a scheduling request against a calendar snapshot
    Schedule {
        /// Request JSON file (reads from stdin if omitted or `-`)
        #[arg(short, long)]
        request: Option<String>,
        /// Calendar snapshot JSON file (empty calendar if omitted)
        #[arg(short, long)]
        calendar: Option<String>,
        /// Maximum number of alternatives to offer
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,
        /// Check exact requests against buffered busy time
        #[arg(long)]
        buffer_exact: bool,
        /// Accept the first slot of a flexible request
        #[arg(long)]
        auto_accept: bool,
        /// Offer alternatives nearest the requested time first
        #[arg(long)]
        rank_nearest: bool,
    },
    /// Show the busy cover and free intervals within a window
    Free {
        /// Calendar snapshot JSON file (empty calendar if omitted)
        #[arg(short, long)]
        calendar: Option<String>,
        /// Window start (RFC 3339, or local time in the preferences' timezone)
        #[arg(long)]
        from: String,
        /// Window end
        #[arg(long)]
        to: String,
    },
    /// List busy events overlapping a proposed time
    Check {
        /// Calendar snapshot JSON file (empty calendar if omitted)
        #[arg(short, long)]
        calendar: Option<String>,
        /// Proposed start
        #[arg(long)]
        start: String,
        /// Proposed end
        #[arg(long)]
        end: String,
        /// Widen busy events by the preferences' buffer
        #[arg(long)]
        buffer: bool,
    },
    /// Suggest a meeting length in minutes
    SuggestDuration {
        /// Meeting kind (standup, one-on-one, team-meeting, review, ...)
        #[arg(long)]
        kind: String,
        /// Number of attendees
        #[arg(long, default_value_t = 1)]
        attendees: u32,
    },
}

/// Calendar snapshot as handed over by the sync layer.
#[derive(Debug, Default, Deserialize)]
struct CalendarFile {
    #[serde(default)]
    events: Vec<BusyEvent>,
    #[serde(default)]
    recurring: Vec<RecurringCommitment>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let prefs = load_prefs(cli.prefs.as_deref())?;

    let json = match cli.command {
        Commands::Schedule {
            request,
            calendar,
            max_results,
            buffer_exact,
            auto_accept,
            rank_nearest,
        } => {
            let raw = read_input(request.as_deref())?;
            let request: SchedulingRequest =
                serde_json::from_str(&raw).context("Failed to parse scheduling request")?;
            let horizon = expansion_horizon(&request, &prefs)?;
            let busy = load_busy(calendar.as_deref(), &horizon.expand(prefs.buffer()))?;

            let options = SchedulerOptions {
                max_results,
                buffer_exact_requests: buffer_exact,
                auto_accept,
                rank_by_proximity: rank_nearest,
            };
            let decision = schedule(&request, &prefs, &busy, &options)
                .context("Failed to schedule request")?;
            tracing::info!(status = ?decision.status(), "decision made");
            serde_json::to_string_pretty(&decision)?
        }
        Commands::Free { calendar, from, to } => {
            let horizon = parse_interval(&from, &to, &prefs)?;
            let busy = load_busy(calendar.as_deref(), &horizon.expand(prefs.buffer()))?;
            let availability = Availability::compute(&busy, &prefs, horizon)
                .context("Failed to compute availability")?;
            serde_json::to_string_pretty(&availability)?
        }
        Commands::Check {
            calendar,
            start,
            end,
            buffer,
        } => {
            let proposed = parse_interval(&start, &end, &prefs)?;
            let busy = load_busy(calendar.as_deref(), &proposed.expand(prefs.buffer()))?;
            let conflicts = if buffer {
                conflict::check_with_buffer(&proposed, &busy, prefs.buffer())
            } else {
                conflict::check(&proposed, &busy)
            };
            serde_json::to_string_pretty(&conflicts)?
        }
        Commands::SuggestDuration { kind, attendees } => {
            let kind: MeetingKind = kind.parse()?;
            let minutes = suggest_duration(kind, attendees, prefs.default_meeting_minutes);
            serde_json::to_string(&serde_json::json!({ "minutes": minutes }))?
        }
    };

    write_output(cli.output.as_deref(), &format!("{}\n", json))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_prefs(path: Option<&str>) -> Result<Preferences> {
    let prefs = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read preferences: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse preferences: {}", path))?
        }
        None => Preferences::default(),
    };
    prefs.validate().context("Invalid preferences")?;
    Ok(prefs)
}

/// Load a calendar snapshot, expanding recurring commitments over `horizon`.
///
/// Callers widen `horizon` by the buffer, since an instance just outside the
/// window can still reach into it.
fn load_busy(path: Option<&str>, horizon: &Interval) -> Result<Vec<BusyEvent>> {
    let calendar = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read calendar: {}", path))?;
            serde_json::from_str::<CalendarFile>(&raw)
                .with_context(|| format!("Failed to parse calendar: {}", path))?
        }
        None => CalendarFile::default(),
    };

    let mut busy = calendar.events;
    recurrence::expand_into(&calendar.recurring, horizon, &mut busy)
        .context("Failed to expand recurring commitments")?;
    tracing::debug!(events = busy.len(), "calendar loaded");
    Ok(busy)
}

/// The span a request can touch: its search horizon plus, for exact requests,
/// the proposed time itself.
fn expansion_horizon(request: &SchedulingRequest, prefs: &Preferences) -> Result<Interval> {
    let horizon = match request {
        SchedulingRequest::Exact(exact) => {
            let search = exact.search_horizon(prefs)?;
            let proposed = exact.interval()?;
            Interval::new(
                search.start().min(proposed.start()),
                search.end().max(proposed.end()),
            )?
        }
        SchedulingRequest::Flexible(flexible) => flexible.search_horizon(prefs)?,
    };
    Ok(horizon)
}

fn parse_interval(start: &str, end: &str, prefs: &Preferences) -> Result<Interval> {
    let tz = prefs.tz()?;
    let start = parse_instant(start, tz)?;
    let end = parse_instant(end, tz)?;
    Ok(Interval::new(start, end)?)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path.filter(|p| *p != "-") {
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
