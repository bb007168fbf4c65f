use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::DealTypeCode;

/// Column layout of the report, in output order.
pub const REPORT_COLUMNS: [&str; 8] = [
    "date", "type", "volume", "commission", "swap", "profit", "fee", "symbol"
];

/// One deal projected onto the report columns.
///
/// The time of day is dropped once the date is derived from it. Optional amount
/// columns default to zero when a report file does not carry them; which columns
/// are mandatory depends on the consumer and is checked before rows are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub deal_type: DealTypeCode,
    #[serde(default)]
    pub volume: Decimal,
    #[serde(default)]
    pub commission: Decimal,
    #[serde(default)]
    pub swap: Decimal,
    pub profit: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub symbol: String
}

impl ReportRow {
    /// Profit together with every cost attached to the deal, or `None` on overflow.
    pub fn total_profit(&self) -> Option<Decimal> {
        self.profit.checked_add(self.swap)?
            .checked_add(self.commission)?
            .checked_add(self.fee)
    }
}
