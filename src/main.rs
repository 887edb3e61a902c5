//! # u-stage
//!
//! Reads events (`<name> <start> <end>`, one per line) from a file or
//! standard input and prints the minimum-stage schedule.
//!
//! ## Usage
//!
//! ```bash
//! u-stage lineup.txt
//! cat lineup.txt | u-stage --format json
//! u-stage --skip-invalid --stats lineup.txt
//! ```
//!
//! Logs go to stderr. `RUST_LOG` overrides the filter and
//! `U_STAGE_LOG_FORMAT=json` switches to machine-parseable log lines.
//!
//! Exit codes: 0 success, 1 bad input or I/O failure, 2 internal
//! scheduling error.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use u_stage::models::{Assignment, Event, ScheduleResult, StageTimeline};
use u_stage::scheduler::{StageAllocator, StageKpi};
use u_stage::{parser, report, validation, Error};

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Assign events to the minimum number of non-overlapping stages.
///
/// End times are inclusive: an event ending at t and one starting at t
/// never share a stage.
#[derive(Parser, Debug)]
#[command(name = "u-stage")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input file; standard input is read when omitted
    path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Skip malformed lines (with a warning) instead of aborting
    #[arg(long)]
    skip_invalid: bool,

    /// Do not re-verify the computed schedule
    #[arg(long)]
    no_verify: bool,

    /// Log schedule metrics (implies --verbose)
    #[arg(long)]
    stats: bool,

    /// Enable info-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON document
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    stage_count: usize,
    events: &'a [Event],
    assignment: &'a Assignment,
    timelines: &'a [StageTimeline],
}

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose || cli.stats);

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Printed unconditionally: RUST_LOG may filter out the log event.
            eprintln!("error: {e}");
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let log_format = std::env::var("U_STAGE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if verbose { "u_stage=info" } else { "u_stage=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> Result<String, Error> {
    let text = read_input(cli.path.as_deref())?;

    let events = if cli.skip_invalid {
        let (events, errors) = parser::parse_lenient(text.lines());
        for e in &errors {
            warn!("skipping {e}");
        }
        events
    } else {
        parser::parse_str(&text)?
    };

    for warning in validation::check_input(&events) {
        warn!("{warning}");
    }

    let allocator = StageAllocator::new();
    let result = if cli.no_verify {
        allocator.allocate(&events)
    } else {
        allocator.allocate_checked(&events)?
    };
    info!(events = events.len(), stages = result.stage_count, "schedule computed");

    if cli.stats {
        log_stats(&events, &result);
    }

    match cli.format {
        OutputFormat::Text => Ok(report::render_report(&events, &result)),
        OutputFormat::Json => {
            let doc = JsonReport {
                stage_count: result.stage_count,
                events: &events,
                assignment: &result.assignment,
                timelines: &result.timelines,
            };
            let mut out = serde_json::to_string_pretty(&doc)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn log_stats(events: &[Event], result: &ScheduleResult) {
    let kpi = StageKpi::calculate(events, result);
    info!(
        stages = kpi.stage_count,
        events = kpi.event_count,
        peak_depth = kpi.peak_depth,
        horizon_start = ?kpi.horizon_start,
        horizon_end = ?kpi.horizon_end,
        avg_utilization = kpi.avg_utilization,
        "schedule metrics"
    );
    for (stage, busy) in result.stages().zip(&kpi.busy_by_stage) {
        info!(%stage, busy, "stage load");
    }
    if !kpi.is_minimal() {
        warn!(
            stages = kpi.stage_count,
            peak_depth = kpi.peak_depth,
            "stage count exceeds peak depth"
        );
    }
}
