//! Tabular storage contract for Credence.
//!
//! The engine sees every backing store as a set of named grids: a header row
//! of column labels followed by data rows, addressed by 1-based row position
//! where the header row is row 1. There are no transactions, no secondary
//! indexes and no query language — the engine compensates with full scans
//! and its own row-index cache.
//!
//! Two implementations ship here:
//! - [`MemoryStore`] — in-process grids, used in tests and embedding
//! - [`WorkbookFile`] — a single JSON file holding all tables, rewritten
//!   atomically on every mutation

mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::WorkbookFile;
pub use memory::MemoryStore;

use credence_types::{StoreId, TableName};
use serde_json::Value;

/// One grid row: cells are JSON scalars (string, number, bool, null).
pub type Row = Vec<Value>;

/// A full table grid, header row included.
pub type Grid = Vec<Row>;

/// Row position of the header row. Data rows start at `HEADER_ROW + 1`.
pub const HEADER_ROW: usize = 1;

/// The grid-of-cells contract every backing store implements.
///
/// All row positions are 1-based and count the header row, matching how the
/// row-index cache addresses rows.
pub trait TabularStore: Send + Sync {
    /// Identifies this store. Part of the row-index cache key.
    fn store_id(&self) -> &StoreId;

    /// Creates a table with the given header row if it does not already
    /// exist. Existing tables are left untouched, header included.
    fn ensure_table(&self, table: &TableName, header: Row) -> StoreResult<()>;

    /// Returns the whole grid of a table, header row first.
    fn list_rows(&self, table: &TableName) -> StoreResult<Grid>;

    /// Appends one data row at the bottom of the table.
    fn append_row(&self, table: &TableName, row: Row) -> StoreResult<()>;

    /// Overwrites specific cells of one row. `cells` pairs a 0-based column
    /// index with the new value. Cells past the current row width extend it.
    fn update_cells(&self, table: &TableName, row: usize, cells: &[(usize, Value)])
    -> StoreResult<()>;

    /// Removes one row; rows below shift up by one position.
    fn delete_row(&self, table: &TableName, row: usize) -> StoreResult<()>;
}
