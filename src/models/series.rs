use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::DealTypeCode;

/// Aggregate trading result for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub growth: Decimal
}

/// A single balance operation, kept as-is rather than aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepositRow {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub deal_type: DealTypeCode,
    pub deposit: Decimal
}

/// Net result of a single trading deal (profit with swap and commission applied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealProfit {
    pub date: NaiveDate,
    pub symbol: String,
    #[serde(rename = "type")]
    pub deal_type: DealTypeCode,
    pub volume: Decimal,
    pub total_profit: Decimal
}
