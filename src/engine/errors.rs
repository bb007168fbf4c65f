use thiserror::Error;

use crate::extract::ExtractionError;
use crate::storage::StorageError;
use crate::transform::TransformError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError)
}
