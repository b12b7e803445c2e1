//! `inventory-aging` command line entry point.
//!
//! Loads the pipeline settings, runs the aging pipeline once and writes the
//! three reports.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use inventory_aging::config::ConfigLoader;
use inventory_aging::error::AgingResult;
use inventory_aging::output::ReportFormat;
use inventory_aging::runner;

const LOG_FILE_NAME: &str = "inventory-aging.log";

#[derive(Debug, Parser)]
#[command(name = "inventory-aging", author, version, about, long_about = None)]
struct Cli {
    /// YAML pipeline settings.
    #[arg(long, default_value = "inventory_aging.yaml")]
    settings: PathBuf,

    /// Directory the finished reports are copied to; overrides the settings.
    #[arg(long, env = "SHAREPOINT_DIRECTORY")]
    publish_dir: Option<PathBuf>,

    /// Report file format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Xlsx)]
    format: ReportFormat,

    /// Directory of the log file.
    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,
}

fn setup_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir);
    let (file_layer, guard, file_error) = match appender {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
            (Some(layer), Some(guard), None)
        }
        Err(err) => (None, None, Some(err)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    if let Some(err) = file_error {
        warn!(log_dir = %log_dir.display(), error = %err, "File logging disabled");
    }
    guard
}

fn run(cli: Cli) -> AgingResult<()> {
    let mut settings = ConfigLoader::load(&cli.settings)?.into_settings();
    if let Some(publish_dir) = cli.publish_dir {
        settings.publish_dir = Some(publish_dir);
    }

    let now = Local::now().naive_local();
    let summary = runner::run(&settings, cli.format, now)?;
    info!(
        run_id = %summary.run_id,
        aged_load = summary.report.aged_load.len(),
        aged_unload = summary.report.aged_unload.len(),
        aged_8qi = summary.report.aged_8qi.len(),
        schedule_warnings = summary.schedule_warnings,
        "Inventory aging reports ready"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = setup_logging(&cli.log_dir);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Inventory aging failed");
            ExitCode::FAILURE
        }
    }
}
