use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Connection to the trading terminal failed: {0}")]
    ConnectionFailed(String),
    #[error("Trading terminal unavailable: {0}")]
    Unavailable(String),
    #[error("Extraction error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Extraction error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Extraction error: {0}")]
    Csv(#[from] csv::Error)
}
