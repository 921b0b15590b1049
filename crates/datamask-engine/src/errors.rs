use thiserror::Error;

/// Errors raised while producing a synthetic replacement value.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("entropy source unavailable: {0}")]
    Entropy(String),
    #[error("invalid range: min {min} must be <= max {max}")]
    InvalidRange { min: i64, max: i64 },
    #[error("date out of range: {0}")]
    DateOutOfRange(String),
}

/// Errors emitted by the masking engine and its table adapters.
#[derive(Debug, Error)]
pub enum MaskingError {
    #[error("failed to mask column '{column}': {source}")]
    Column {
        column: String,
        #[source]
        source: GenerationError,
    },
    #[error("table error: {0}")]
    Table(#[from] datamask_core::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
