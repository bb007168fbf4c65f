mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::SourceKind;
use crate::types::{GrowthMeasure, SortOrder};

pub use commands::run;

#[derive(Debug, Parser)]
#[command(name = "deal-report", version, about = "Trading-account deal history reports and growth dashboard")]
pub struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Terminal log level: error, warn, info, debug or trace.
    #[arg(short, long, global = true, default_value = "error")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pull deals from the terminal and write the report file.
    Extract(ExtractArgs),
    /// Daily growth from a report file (or a stored report table).
    Growth(GrowthArgs),
    /// Deposits and withdrawals from a report file.
    Deposits(SeriesArgs),
    /// Net result per trading deal from a report file.
    Profits(SeriesArgs),
    /// Store a report file in the database, replacing the table.
    Load(LoadArgs),
    /// Create a sample report table with ten trading days.
    Seed(SeedArgs),
    /// Render the growth chart to a standalone HTML file.
    Chart(ChartArgs),
    /// Serve the dashboard.
    Serve(ServeArgs)
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// First day of the range (defaults to extraction.from_date).
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day of the range (defaults to today).
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,
    /// Report file to write (defaults to report.file_path).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Also replace the report table in the database.
    #[arg(long)]
    pub store: bool
}

#[derive(Debug, Args)]
pub struct GrowthOptions {
    #[arg(long, value_enum)]
    pub measure: Option<GrowthMeasure>,
    #[arg(long, value_enum)]
    pub order: Option<SortOrder>
}

#[derive(Debug, Args)]
pub struct GrowthArgs {
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Compute growth in the database from this report table instead of a file.
    #[arg(long, conflicts_with = "input")]
    pub table: Option<String>,
    #[command(flatten)]
    pub options: GrowthOptions,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Also replace the growth table in the database.
    #[arg(long)]
    pub store: bool
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub store: bool
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    #[arg(long)]
    pub table: Option<String>
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[arg(long, default_value = "fx_tabtest")]
    pub table: String
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    #[command(flatten)]
    pub options: GrowthOptions,
    #[arg(short, long, default_value = "growth.html")]
    pub output: PathBuf,
    #[arg(long)]
    pub title: Option<String>
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (defaults to dashboard.bind).
    #[arg(long)]
    pub bind: Option<String>
}
