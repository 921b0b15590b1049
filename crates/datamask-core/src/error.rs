use thiserror::Error;

/// Core error type shared across Datamask crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The table violates internal invariants (ragged rows, duplicate headers).
    #[error("invalid table: {0}")]
    InvalidTable(String),
}

/// Convenience alias for results returned by Datamask crates.
pub type Result<T> = std::result::Result<T, Error>;
