//! CLI entry point for the Fitbit step-export processor.
//!
//! Provides subcommands for bucketing a date range of step data into
//! 5-minute totals with CSV export, and for inspecting which step files
//! an export contains.

use anyhow::{Result, ensure};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use fitbit_steps::{
    archive::{ArchiveReader, DirReader},
    error::StepsError,
    export::{export_file_name, render, write_csv},
    pipeline::{self, Window, types::parse_timestamp},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fitbit_steps")]
#[command(about = "Buckets Fitbit step exports into 5-minute totals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a date range of step data and export it as CSV
    Process {
        /// Directory holding the extracted Fitbit export
        #[arg(short, long, value_name = "DIR")]
        input: String,

        /// Window start (e.g. 2024-01-01T23:50 or 2024-01-01)
        #[arg(short, long)]
        start: String,

        /// Window end, inclusive
        #[arg(short, long)]
        end: String,

        /// CSV file to write (default: fitbit-<start>--<end>.csv)
        #[arg(short, long)]
        output: Option<String>,

        /// Also print the bucket rows to stdout
        #[arg(short, long, default_value_t = false)]
        print: bool,
    },
    /// List the step files found in an export and their dates
    ListEntries {
        /// Directory holding the extracted Fitbit export
        #[arg(short, long, value_name = "DIR")]
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fitbit_steps.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fitbit_steps.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            start,
            end,
            output,
            print,
        } => {
            let window = parse_window(&start, &end)?;
            let reader = open_export(&input)?;

            let grid = pipeline::run(&reader, window).await?;

            if print {
                for (label, total) in render(&grid) {
                    println!("{label}\t{total}");
                }
            }

            let out_path = output.unwrap_or_else(|| export_file_name(&window));
            write_csv(&out_path, &grid)?;

            info!(
                rows = grid.len(),
                total_steps = grid.grand_total(),
                path = %out_path,
                "Export written"
            );
            info!(
                "Processed data from {} to {}",
                window.start.format("%d-%m-%Y"),
                window.end.format("%d-%m-%Y")
            );
        }
        Commands::ListEntries { input } => {
            let reader = open_export(&input)?;
            let entries = pipeline::catalog::build_catalog(&reader.member_names());

            for entry in &entries {
                info!(name = %entry.name, date = %entry.date, "Step file");
            }
            info!(total = entries.len(), "Step file listing complete");
        }
    }

    Ok(())
}

fn open_export(input: &str) -> Result<DirReader> {
    if !Path::new(input).is_dir() {
        return Err(StepsError::MissingInput("export directory").into());
    }
    Ok(DirReader::new(input)?)
}

fn parse_window(start: &str, end: &str) -> Result<Window> {
    let start = parse_stamp("start date", start)?;
    let end = parse_stamp("end date", end)?;
    ensure!(start <= end, "start date must not be after end date");
    Ok(Window::new(start, end))
}

fn parse_stamp(which: &'static str, raw: &str) -> Result<NaiveDateTime, StepsError> {
    parse_timestamp(raw).ok_or(StepsError::MissingInput(which))
}
