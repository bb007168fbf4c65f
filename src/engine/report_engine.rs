use std::path::{Path, PathBuf};

use tokio::task::spawn_blocking;
use tracing::info;

use crate::engine::EngineError;
use crate::extract::{DateRange, DealSource};
use crate::models::{DealProfit, DepositRow, GrowthPoint, ReportRow};
use crate::storage::read_report_file;
use crate::transform::{
    deal_profits, filter_deposits, growth_columns, reshape, GrowthAggregator, DEPOSIT_COLUMNS, PROFIT_COLUMNS
};

/// Runs the extraction half of the pipeline: pull deals, then reshape them into report rows.
pub struct ReportEngine {
    source: Box<dyn DealSource>
}

impl ReportEngine {
    pub fn new(source: Box<dyn DealSource>) -> Self {
        Self { source }
    }

    /// Extracts and reshapes one batch, newest date first.
    pub async fn extract_report(&self, range: DateRange) -> Result<Vec<ReportRow>, EngineError> {
        let deals = self.source.history_deals(range).await?;

        info!("Data transformation in process ....");
        let mut rows = reshape(&deals)?;
        rows.sort_by(|left, right| right.date.cmp(&left.date));
        info!("Data transformation done!");

        Ok(rows)
    }
}

/// Reads a report file on a blocking thread, checking the columns the caller needs.
pub async fn load_report(path: &Path, required: Vec<&'static str>) -> Result<Vec<ReportRow>, EngineError> {
    let path: PathBuf = path.to_path_buf();
    let rows = spawn_blocking(move || read_report_file(&path, &required)).await??;

    Ok(rows)
}

pub async fn growth_from_file(path: &Path, aggregator: GrowthAggregator) -> Result<Vec<GrowthPoint>, EngineError> {
    let rows = load_report(path, growth_columns(aggregator.measure())).await?;
    let series = aggregator.aggregate(&rows)?;

    info!("Data transformed to required format ({} growth point(s))", series.len());

    Ok(series)
}

pub async fn deposits_from_file(path: &Path) -> Result<Vec<DepositRow>, EngineError> {
    let rows = load_report(path, DEPOSIT_COLUMNS.to_vec()).await?;
    Ok(filter_deposits(&rows))
}

pub async fn deal_profits_from_file(path: &Path) -> Result<Vec<DealProfit>, EngineError> {
    let rows = load_report(path, PROFIT_COLUMNS.to_vec()).await?;
    Ok(deal_profits(&rows)?)
}
