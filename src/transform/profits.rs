use crate::models::{DealProfit, ReportRow};
use crate::transform::TransformError;
use crate::types::DEPOSIT_DEAL_TYPE;

/// Net result per trading deal, oldest first. Balance operations are left out.
pub fn deal_profits(rows: &[ReportRow]) -> Result<Vec<DealProfit>, TransformError> {
    let mut profits = rows.iter()
        .filter(|row| row.deal_type != DEPOSIT_DEAL_TYPE)
        .map(|row| {
            let total_profit = row.commission.checked_add(row.swap)
                .and_then(|costs| costs.checked_add(row.profit))
                .ok_or(TransformError::Overflow { date: row.date })?;

            Ok(DealProfit {
                date: row.date,
                symbol: row.symbol.clone(),
                deal_type: row.deal_type,
                volume: row.volume,
                total_profit
            })
        })
        .collect::<Result<Vec<DealProfit>, TransformError>>()?;

    // Stable, so deals sharing a date keep their input order.
    profits.sort_by_key(|profit| profit.date);
    Ok(profits)
}
