use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Ledger `{0}` not found")]
    LedgerNotFound(String),
    #[error("No ledger loaded")]
    NotLoaded,
    #[error("Unsupported schema version {found} (supported up to {supported})")]
    UnsupportedSchema { found: u8, supported: u8 },
}
