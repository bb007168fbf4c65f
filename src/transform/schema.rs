use csv::StringRecord;

use crate::transform::TransformError;
use crate::types::GrowthMeasure;

pub const DEPOSIT_COLUMNS: [&str; 3] = ["date", "type", "profit"];
pub const PROFIT_COLUMNS: [&str; 7] = ["date", "type", "volume", "commission", "swap", "profit", "symbol"];

/// Fails when any required column is absent from a batch header.
pub fn require_columns(headers: &StringRecord, required: &[&str]) -> Result<(), TransformError> {
    let missing: Vec<String> = required.iter()
        .filter(|column| !headers.iter().any(|header| header.trim() == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TransformError::SchemaMismatch { missing })
    }
}

/// Columns the growth aggregation reads for the given measure.
pub fn growth_columns(measure: GrowthMeasure) -> Vec<&'static str> {
    let mut columns = vec!["date", "type"];
    columns.extend_from_slice(measure.columns());
    columns
}
