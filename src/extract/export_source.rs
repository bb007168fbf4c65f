use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use tokio::task::spawn_blocking;
use tracing::{error, info, warn};

use crate::extract::{DateRange, DealSource, ExtractionError};
use crate::models::RawDeal;
use crate::transform::split_timestamp;

/// Reads a deal-history CSV exported from the trading terminal.
pub struct ExportFileSource {
    path: PathBuf
}

impl ExportFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(path: &Path, range: DateRange) -> Result<Vec<RawDeal>, ExtractionError> {
        let file = File::open(path).map_err(|error| {
            ExtractionError::ConnectionFailed(format!("cannot open export at {}: {error}", path.display()))
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut deals = Vec::new();

        for result in reader.deserialize::<RawDeal>() {
            match result {
                // Deals with an unreadable timestamp stay in the batch for the reshaper to reject.
                Ok(deal) => match split_timestamp(&deal.time) {
                    Some((date, _)) if !range.contains(date) => continue,
                    _ => deals.push(deal)
                },
                Err(error) => {
                    error!("CSV deserialization error: {error}");
                }
            }
        }

        Ok(deals)
    }
}

#[async_trait]
impl DealSource for ExportFileSource {
    async fn history_deals(&self, range: DateRange) -> Result<Vec<RawDeal>, ExtractionError> {
        let path = self.path.clone();
        let deals = spawn_blocking(move || Self::read(&path, range))
            .await
            .map_err(|error| ExtractionError::ConnectionFailed(format!("export reader stopped: {error}")))??;

        if deals.is_empty() {
            warn!("No deals found between {} and {}", range.from, range.to);
        } else {
            info!("history_deals({}, {}) = {}", range.from, range.to, deals.len());
        }

        Ok(deals)
    }
}
