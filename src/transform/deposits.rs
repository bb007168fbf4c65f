use tracing::info;

use crate::models::{DepositRow, ReportRow};
use crate::types::{DealTypeCode, DEPOSIT_DEAL_TYPE};

/// Keeps every row of the given type, with its profit reported as the deposit amount.
pub fn filter_by_type(rows: &[ReportRow], deal_type: DealTypeCode) -> Vec<DepositRow> {
    rows.iter()
        .filter(|row| row.deal_type == deal_type)
        .map(|row| DepositRow {
            date: row.date,
            deal_type: row.deal_type,
            deposit: row.profit
        })
        .collect()
}

pub fn filter_deposits(rows: &[ReportRow]) -> Vec<DepositRow> {
    let deposits = filter_by_type(rows, DEPOSIT_DEAL_TYPE);
    info!("Deposit table is ready with {} row(s)", deposits.len());
    deposits
}
