mod errors;
mod report_engine;

pub use errors::EngineError;
pub use report_engine::{deal_profits_from_file, deposits_from_file, growth_from_file, load_report, ReportEngine};
