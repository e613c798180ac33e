//! scholarmetrics - citation metrics updater
//!
//! Fetches metrics from Semantic Scholar (plus Crossref counts), falls back to
//! a static record if that fails, and writes `scholar_metrics.json` and
//! `scholar_metrics.js`.
//!
//! ## Usage
//!
//! ```bash
//! scholarmetrics
//! scholarmetrics --output-dir ./site --debug
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use scholarmetrics::config::Config;
use scholarmetrics::events::TracingSink;
use scholarmetrics::output::{JSON_FILE, SCRIPT_FILE};
use scholarmetrics::pipeline::{Pipeline, RecordPath};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Citation metrics updater. Runs with built-in defaults when given no arguments.
#[derive(Parser)]
#[command(name = "scholarmetrics")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Directory receiving the JSON and script files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Author display name used for searches
    #[arg(long)]
    author: Option<String>,

    /// Surname a search candidate must contain
    #[arg(long)]
    surname: Option<String>,

    /// Google Scholar profile ID written to the output
    #[arg(long)]
    scholar_id: Option<String>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::default();
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(author) = self.author {
            config.author.name = author;
        }
        if let Some(surname) = self.surname {
            config.author.surname = surname;
        }
        if let Some(scholar_id) = self.scholar_id {
            config.author.scholar_id = scholar_id;
        }
        config
    }
}

fn init_logging(debug: bool, json: bool) {
    let log_level = if debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.json_logs);

    let config = cli.into_config();

    println!("{}", "=".repeat(60));
    println!("Google Scholar Metrics Updater");
    println!("Author: {}", config.author.name);
    println!("Scholar ID: {}", config.author.scholar_id);
    println!("{}", "=".repeat(60));

    let sink = TracingSink;
    let pipeline = Pipeline::new(config, &sink).context("Invalid configuration")?;
    let report = pipeline.run(Local::now().date_naive()).await;

    if report.path == RecordPath::Fallback {
        println!("\nSemantic Scholar unavailable, using fallback metrics.");
    }

    if report.writes.all_written() {
        println!("\n✓ All files created successfully!");
        println!("   - {}", JSON_FILE);
        println!("   - {}", SCRIPT_FILE);
        println!("\nCurrent Metrics:");
        println!("   H-index: {}", report.record.h_index);
        println!("   Citations: {}", report.record.total_citations);
        println!("   Publications: {}", report.record.publications_count);
        println!("   Source: {}", report.record.source);
    } else {
        println!("\n✗ Some files failed to create");
        if !report.writes.json_written {
            println!("   - {}", report.writes.json_path.display());
        }
        if !report.writes.script_written {
            println!("   - {}", report.writes.script_path.display());
        }
    }

    Ok(ExitCode::from(report.exit_code()))
}
