mod app_config;
mod errors;

pub use app_config::{
    AppConfig, ConnectionConfig, DashboardConfig, ExtractionConfig, LoggingConfig, ReportConfig, SourceKind,
    StorageConfig, PASSWORD_ENV
};
pub use errors::ConfigError;
