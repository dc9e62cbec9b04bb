//! CLI entry point for the bike rental summary tool.
//!
//! Loads the hourly and daily rental tables, filters the daily table to a
//! date range, and prints or exports the aggregated dashboard tables.

use anyhow::Result;
use bike_rental_summary::aggregators::types::BucketPolicy;
use bike_rental_summary::output::{export_summary, render_text, write_json};
use bike_rental_summary::{DateRange, RecordStore};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_rental_summary")]
#[command(about = "Summarize bike rental data over a date range", long_about = None)]
struct Cli {
    /// Hourly rentals CSV
    #[arg(long, env = "BIKE_HOURLY_CSV", default_value = "hour_cleaned.csv", global = true)]
    hourly: PathBuf,

    /// Daily rentals CSV
    #[arg(long, env = "BIKE_DAILY_CSV", default_value = "day_cleaned.csv", global = true)]
    daily: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RangeArgs {
    /// First date to include (YYYY-MM-DD); defaults to the earliest date in the data
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD); defaults to the latest date in the data
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Emit zero rows for hours, weekdays, seasons, etc. with no rentals
    #[arg(long, default_value_t = false)]
    zero_fill: bool,
}

impl RangeArgs {
    fn resolve(&self, store: &RecordStore) -> (DateRange, BucketPolicy) {
        let range = DateRange::resolve(self.start, self.end, store.date_span());
        let policy = if self.zero_fill {
            BucketPolicy::ZeroFill
        } else {
            BucketPolicy::Omit
        };
        (range, policy)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every summary table for a date range
    Summary {
        #[command(flatten)]
        range: RangeArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Write every summary table as CSV, plus summary.json, into a directory
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Directory to write the tables to
        #[arg(short, long, default_value = "summary")]
        output_dir: PathBuf,
    },
    /// Show the date span and row counts of the loaded tables
    Span,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bike_rental_summary.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_rental_summary.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let store = RecordStore::load(&cli.hourly, &cli.daily)?;

    match cli.command {
        Commands::Summary { range, format } => {
            let (range, policy) = range.resolve(&store);
            let summary = store.summarize(range, policy);

            match format {
                Format::Json => write_json(std::io::stdout().lock(), &summary)?,
                Format::Text => print!("{}", render_text(&summary)?),
            }
        }
        Commands::Export { range, output_dir } => {
            let (range, policy) = range.resolve(&store);
            let summary = store.summarize(range, policy);

            let written = export_summary(&output_dir, &summary)?;
            for path in &written {
                info!(path = %path.display(), "Wrote");
            }
        }
        Commands::Span => match store.date_span() {
            Some((start, end)) => info!(
                %start,
                %end,
                daily_rows = store.daily().len(),
                hourly_rows = store.hourly().len(),
                "Daily table span"
            ),
            None => info!(
                hourly_rows = store.hourly().len(),
                "Daily table is empty"
            ),
        },
    }

    Ok(())
}
