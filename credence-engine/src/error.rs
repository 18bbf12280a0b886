//! Error types for engine operations.
//!
//! Validation and not-found conditions are plain typed failures so request
//! handlers can render a user-facing message; decode issues and audit-write
//! failures never reach this enum — they are logged where they occur.

use credence_registry::RegistryError;
use credence_store::StoreError;
use credence_types::TableName;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unknown entity type.
    #[error(transparent)]
    SchemaNotFound(#[from] RegistryError),

    /// The id does not exist in the table.
    #[error("no row with id {id} in table {table}")]
    NotFound { table: TableName, id: String },

    /// A create was rejected for missing input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backing store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
