mod raw_deal;
mod report_row;
mod series;

pub use raw_deal::RawDeal;
pub use report_row::{ReportRow, REPORT_COLUMNS};
pub use series::{DealProfit, DepositRow, GrowthPoint};
