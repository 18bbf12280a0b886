//! Error types for the storage layer.

use credence_types::TableName;
use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named table does not exist in this store.
    #[error("table not found: {0}")]
    TableMissing(TableName),

    /// A row position outside the table was addressed.
    #[error("row {row} out of range in table {table}")]
    RowOutOfRange { table: TableName, row: usize },

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Atomic rewrite of the workbook file failed.
    #[error("persist error: {0}")]
    Persist(String),
}
