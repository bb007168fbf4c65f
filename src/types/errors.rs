use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionError {
    #[error("Unknown growth measure '{0}' (expected narrow or wide)")]
    UnknownMeasure(String),
    #[error("Unknown sort order '{0}' (expected ascending or descending)")]
    UnknownOrder(String)
}
