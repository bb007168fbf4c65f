use std::fs;
use std::io::{stdout, BufWriter};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::chart::{render_page, PageContent, DEFAULT_TITLE};
use crate::cli::{
    ChartArgs, Command, ExtractArgs, GrowthArgs, GrowthOptions, LoadArgs, SeedArgs, SeriesArgs, ServeArgs
};
use crate::config::{AppConfig, SourceKind};
use crate::dashboard::{serve, DashboardState};
use crate::engine::{deal_profits_from_file, deposits_from_file, growth_from_file, load_report, ReportEngine};
use crate::extract::{DateRange, DealSource, ExportFileSource, GatewaySource};
use crate::models::REPORT_COLUMNS;
use crate::storage::{write_csv, write_csv_file, SqliteStore, TableRow};
use crate::transform::GrowthAggregator;

pub async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let timer = Instant::now();

    match command {
        Command::Extract(args) => extract(args, config).await?,
        Command::Growth(args) => growth(args, config).await?,
        Command::Deposits(args) => deposits(args, config).await?,
        Command::Profits(args) => profits(args, config).await?,
        Command::Load(args) => load(args, config).await?,
        Command::Seed(args) => seed(args, config)?,
        Command::Chart(args) => chart(args, config).await?,
        Command::Serve(args) => return dashboard(args, config).await
    }

    info!("Program completed successfully in {:?}", timer.elapsed());

    Ok(())
}

fn aggregator(options: &GrowthOptions, config: &AppConfig) -> GrowthAggregator {
    GrowthAggregator::new(
        options.measure.unwrap_or(config.report.measure),
        options.order.unwrap_or(config.report.order)
    )
}

fn open_store(config: &AppConfig) -> Result<SqliteStore> {
    SqliteStore::open(&config.storage.database_path)
        .with_context(|| format!("opening database at {}", config.storage.database_path.display()))
}

/// Writes rows to the given file, or to stdout when no file is given.
fn emit<R: TableRow + Serialize>(output: Option<&Path>, rows: &[R]) -> Result<()> {
    match output {
        Some(path) => write_csv_file(path, rows)?,
        None => write_csv(BufWriter::new(stdout().lock()), rows)?
    }

    Ok(())
}

fn build_source(kind: SourceKind, config: &AppConfig) -> Result<Box<dyn DealSource>> {
    let source: Box<dyn DealSource> = match kind {
        SourceKind::Export => Box::new(ExportFileSource::new(config.terminal.export_path.clone())),
        SourceKind::Gateway => Box::new(GatewaySource::connect(&config.terminal)?)
    };

    Ok(source)
}

async fn extract(args: ExtractArgs, config: &AppConfig) -> Result<()> {
    let range = DateRange::new(
        args.from.unwrap_or(config.extraction.from_date),
        args.to.unwrap_or_else(|| Utc::now().date_naive())
    );
    let source = build_source(args.source.unwrap_or(config.terminal.source), config)?;
    let engine = ReportEngine::new(source);

    let rows = engine.extract_report(range).await?;

    let output = args.output.as_deref().unwrap_or(&config.report.file_path);
    write_csv_file(output, &rows)?;
    info!("Data extraction completed at {}", Utc::now());

    if args.store {
        open_store(config)?.write_table(&config.storage.report_table, &rows)?;
    }

    Ok(())
}

async fn growth(args: GrowthArgs, config: &AppConfig) -> Result<()> {
    let aggregator = aggregator(&args.options, config);

    let series = match &args.table {
        Some(table) => open_store(config)?.growth_from_table(table, aggregator.measure(), aggregator.order())?,
        None => {
            let input = args.input.as_deref().unwrap_or(&config.report.file_path);
            growth_from_file(input, aggregator).await?
        }
    };

    if args.store {
        open_store(config)?.write_table(&config.storage.growth_table, &series)?;
    }

    emit(args.output.as_deref(), &series)
}

async fn deposits(args: SeriesArgs, config: &AppConfig) -> Result<()> {
    let input = args.input.as_deref().unwrap_or(&config.report.file_path);
    let rows = deposits_from_file(input).await?;

    if args.store {
        open_store(config)?.write_table(&config.storage.deposits_table, &rows)?;
    }

    emit(args.output.as_deref(), &rows)
}

async fn profits(args: SeriesArgs, config: &AppConfig) -> Result<()> {
    let input = args.input.as_deref().unwrap_or(&config.report.file_path);
    let rows = deal_profits_from_file(input).await?;

    if args.store {
        open_store(config)?.write_table(&config.storage.profits_table, &rows)?;
    }

    emit(args.output.as_deref(), &rows)
}

async fn load(args: LoadArgs, config: &AppConfig) -> Result<()> {
    let input = args.input.as_deref().unwrap_or(&config.report.file_path);
    let table = args.table.as_deref().unwrap_or(&config.storage.report_table);

    let rows = load_report(input, REPORT_COLUMNS.to_vec()).await?;
    info!("Start inserting data into {table}");
    open_store(config)?.write_table(table, &rows)?;

    Ok(())
}

fn seed(args: SeedArgs, config: &AppConfig) -> Result<()> {
    open_store(config)?.seed_sample_growth(&args.table)?;
    Ok(())
}

async fn chart(args: ChartArgs, config: &AppConfig) -> Result<()> {
    let input = args.input.as_deref().unwrap_or(&config.report.file_path);
    let series = growth_from_file(input, aggregator(&args.options, config)).await?;
    let title = args.title.as_deref().unwrap_or(DEFAULT_TITLE);

    let page = render_page(&config.dashboard.title, title, PageContent::Growth(&series));

    if let Some(parent) = args.output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(&args.output, page)?;
    info!("Chart written to {}", args.output.display());

    Ok(())
}

async fn dashboard(args: ServeArgs, config: &AppConfig) -> Result<()> {
    let bind = args.bind.as_deref().unwrap_or(&config.dashboard.bind);
    let state = DashboardState::new(
        config.report.file_path.clone(),
        GrowthAggregator::new(config.report.measure, config.report.order),
        config.dashboard.title.clone(),
        config.dashboard.cache_capacity,
        Duration::from_secs(config.dashboard.cache_ttl_secs)
    );

    serve(bind, Arc::new(state)).await
}
