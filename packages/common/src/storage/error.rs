use thiserror::Error;

/// Errors that can occur during photo storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested photo was not found.
    #[error("photo not found: {0}")]
    NotFound(String),

    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The provided photo reference is not a valid stored name.
    #[error("invalid photo reference: {0}")]
    InvalidRef(String),

    /// The photo exceeds the configured size limit.
    #[error("photo exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}
