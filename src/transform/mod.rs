mod deposits;
mod errors;
mod growth;
mod profits;
mod reshaper;
mod schema;
#[cfg(test)]
mod tests;

pub use deposits::{filter_by_type, filter_deposits};
pub use errors::TransformError;
pub use growth::GrowthAggregator;
pub use profits::deal_profits;
pub use reshaper::{reshape, split_timestamp};
pub use schema::{growth_columns, require_columns, DEPOSIT_COLUMNS, PROFIT_COLUMNS};
