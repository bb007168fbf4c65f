mod errors;
mod export_source;
mod gateway_source;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::RawDeal;

pub use errors::ExtractionError;
pub use export_source::ExportFileSource;
pub use gateway_source::GatewaySource;

/// Inclusive calendar range of deals to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.from.and_time(NaiveTime::MIN)
    }

    /// Last second that still belongs to the range.
    pub fn end(&self) -> NaiveDateTime {
        self.to.and_hms_opt(23, 59, 59).unwrap_or_else(|| self.to.and_time(NaiveTime::MIN))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Anything that can hand over the account's deal history for a date range.
///
/// An empty history is an empty batch, never an error.
#[async_trait]
pub trait DealSource: Send + Sync {
    async fn history_deals(&self, range: DateRange) -> Result<Vec<RawDeal>, ExtractionError>;
}
