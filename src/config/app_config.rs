use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use secrecy::SecretString;
use serde::Deserialize;

use crate::config::ConfigError;
use crate::storage::validate_table_name;
use crate::types::{GrowthMeasure, SortOrder};

/// Environment variable that overrides the terminal password from the config file.
pub const PASSWORD_ENV: &str = "DEAL_REPORT_TERMINAL_PASSWORD";

/// Top-level configuration. Every section falls back to its defaults when absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub terminal: ConnectionConfig,
    pub extraction: ExtractionConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub dashboard: DashboardConfig
}

/// Where the report lives and how growth is computed from it.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub file_path: PathBuf,
    pub measure: GrowthMeasure,
    pub order: SortOrder
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A deal-history CSV exported from the terminal.
    #[default]
    Export,
    /// The terminal's HTTP gateway.
    Gateway
}

/// Connection details handed to the extraction source at construction.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub source: SourceKind,
    pub endpoint: String,
    pub login: String,
    pub server: String,
    pub password: SecretString,
    pub export_path: PathBuf,
    pub timeout_secs: u64
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub from_date: NaiveDate
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub report_table: String,
    pub growth_table: String,
    pub deposits_table: String,
    pub profits_table: String
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_prefix: String
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub bind: String,
    pub title: String,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64
}

impl AppConfig {
    /// Loads the configuration file, or the defaults when no path is given.
    ///
    /// The terminal password is taken from the environment when set there.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default()
        };

        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            config.terminal.password = SecretString::from(password);
        }

        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.file_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("report.file_path cannot be empty".into()));
        }

        if self.storage.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.database_path cannot be empty".into()));
        }

        for table in [
            &self.storage.report_table,
            &self.storage.growth_table,
            &self.storage.deposits_table,
            &self.storage.profits_table
        ] {
            validate_table_name(table).map_err(|error| ConfigError::Invalid(error.to_string()))?;
        }

        if self.terminal.source == SourceKind::Gateway && self.terminal.endpoint.is_empty() {
            return Err(ConfigError::Invalid("terminal.endpoint is required for the gateway source".into()));
        }

        if self.extraction.from_date > Utc::now().date_naive() {
            return Err(ConfigError::Invalid(format!("extraction.from_date {} is in the future", self.extraction.from_date)));
        }

        if self.dashboard.cache_capacity == 0 {
            return Err(ConfigError::Invalid("dashboard.cache_capacity must be positive".into()));
        }

        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("data/deal_report.csv"),
            measure: GrowthMeasure::default(),
            order: SortOrder::default()
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            endpoint: String::new(),
            login: String::new(),
            server: String::new(),
            password: SecretString::from(String::new()),
            export_path: PathBuf::from("data/deal_history.csv"),
            timeout_secs: 30
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            from_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap_or_default()
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/deal_report.db"),
            report_table: "fx_history".into(),
            growth_table: "fx_growth".into(),
            deposits_table: "fx_deposits".into(),
            profits_table: "fx_totalprofit".into()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_prefix: "deal_report.log".into()
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".into(),
            title: "Forex Dashboard".into(),
            cache_ttl_secs: 60,
            cache_capacity: 32
        }
    }
}
