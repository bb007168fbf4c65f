mod errors;
mod options;

pub use errors::OptionError;
pub use options::{GrowthMeasure, SortOrder};

pub type DealTicket = u64;
pub type DealTypeCode = i32;

/// Type code the terminal uses for balance operations (deposits and withdrawals).
pub const DEPOSIT_DEAL_TYPE: DealTypeCode = 2;
