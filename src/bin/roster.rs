//! roster CLI - Schedule and talent sheet extraction
//!
//! Reads saved HTML snapshots of the published sheets and prints the extracted
//! records as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use encoding_rs::{Encoding, UTF_8};
use rusty_roster::extract::{project_start_row, schedule_grid, talent_from_html};
use rusty_roster::extract::metrics::Metrics;
use rusty_roster::extract::projects::classify_projects;
use rusty_roster::extract::schedule::rebuild_schedule;
use rusty_roster::{Config, Dashboard};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about = "Staff schedule and talent sheet extraction", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML file overriding the sheet template defaults
    #[arg(short, long, value_name = "FILE", env = "ROSTER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the two-week schedule and its metrics
    Schedule {
        /// Saved schedule sheet page
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Extract the skill matrix
    Talent {
        /// Saved talent sheet page
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Classify the project block of the schedule sheet
    Projects {
        /// Saved schedule sheet page
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only projects of this coordinator
        #[arg(long)]
        coordinator: Option<String>,
    },

    /// Run every extractor over both sheets
    Report {
        /// Saved schedule sheet page
        #[arg(value_name = "SCHEDULE")]
        schedule: PathBuf,

        /// Saved talent sheet page
        #[arg(value_name = "TALENT")]
        talent: PathBuf,
    },
}

#[derive(Serialize)]
struct ScheduleOutput<'a> {
    schedule: &'a rusty_roster::Schedule,
    metrics: Metrics,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Schedule { file } => {
            let html = read_html(&file)?;
            let (_, grid) = schedule_grid(&html, &config);
            let schedule = rebuild_schedule(&grid, &config.schedule)
                .with_context(|| format!("Rebuild schedule from '{}'", file.display()))?;
            let metrics = Metrics::derive(&schedule, &config.metrics);
            print_json(
                &ScheduleOutput {
                    schedule: &schedule,
                    metrics,
                },
                cli.pretty,
            )?;
        }
        Commands::Talent { file } => {
            let html = read_html(&file)?;
            print_json(&talent_from_html(&html, &config), cli.pretty)?;
        }
        Commands::Projects { file, coordinator } => {
            let html = read_html(&file)?;
            let (_, grid) = schedule_grid(&html, &config);
            let schedule = rebuild_schedule(&grid, &config.schedule);
            let start_row = project_start_row(&schedule, &config);
            if let Err(error) = &schedule {
                warn!("{}, projects start at row {}", error, start_row);
            }
            let book = classify_projects(&grid, start_row, &config.projects);
            match coordinator {
                Some(name) => print_json(&book.for_coordinator(&name), cli.pretty)?,
                None => print_json(&book, cli.pretty)?,
            }
        }
        Commands::Report { schedule, talent } => {
            let schedule_html = read_html(&schedule)?;
            let talent_html = read_html(&talent)?;
            let dashboard = Dashboard::extract(&schedule_html, &talent_html, &config);
            print_json(&dashboard.report(&config), cli.pretty)?;
        }
    }

    Ok(())
}

/// Reads a saved page, honoring a byte order mark and replacing invalid UTF-8.
fn read_html(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Read '{}'", path.display()))?;
    let (encoding, bom_length) = Encoding::for_bom(&bytes).unwrap_or((UTF_8, 0));
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
    if had_errors {
        warn!(path = %path.display(), encoding = encoding.name(), "replaced malformed byte sequences");
    }
    debug!(path = %path.display(), bytes = bytes.len(), "page loaded");
    Ok(text.into_owned())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
