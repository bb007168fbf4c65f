mod chart;
mod cli;
mod config;
mod dashboard;
mod engine;
mod extract;
mod models;
mod storage;
mod transform;
mod types;

use std::io::stderr;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::cli::Cli;
use crate::config::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    // Held until shutdown so buffered file logs are flushed.
    let _log_guard = setup_logging(parse_log_level(&cli.log_level), &config.logging)?;

    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    cli::run(cli.command, &config).await
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter, logging: &LoggingConfig) -> Result<WorkerGuard> {
    //NOTE: CSV results may go to stdout, so the terminal log is written to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&logging.file_prefix)
        .build(&logging.directory)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(terminal_log)
        .with(file_log)
        .init();

    Ok(guard)
}
