use thiserror::Error;

use crate::transform::TransformError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Storage error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Schema(#[from] TransformError),
    #[error("Invalid table name '{0}': use letters, digits and underscores only")]
    InvalidTableName(String)
}
