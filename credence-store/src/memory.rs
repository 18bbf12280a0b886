//! In-memory grid store.

use crate::{Grid, Row, StoreError, StoreResult, TabularStore};
use credence_types::{StoreId, TableName};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// A process-local store holding every table as a grid in memory.
///
/// The default backend for tests and for embedding the engine without a
/// persistent workbook.
pub struct MemoryStore {
    store_id: StoreId,
    tables: RwLock<HashMap<TableName, Grid>>,
}

impl MemoryStore {
    /// Creates an empty store with the given id.
    #[must_use]
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: StoreId::new(store_id),
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Number of tables currently held.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }
}

impl TabularStore for MemoryStore {
    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn ensure_table(&self, table: &TableName, header: Row) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables.entry(table.clone()).or_insert_with(|| vec![header]);
        Ok(())
    }

    fn list_rows(&self, table: &TableName) -> StoreResult<Grid> {
        let tables = self.tables.read();
        tables
            .get(table)
            .cloned()
            .ok_or_else(|| StoreError::TableMissing(table.clone()))
    }

    fn append_row(&self, table: &TableName, row: Row) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let grid = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableMissing(table.clone()))?;
        grid.push(row);
        Ok(())
    }

    fn update_cells(
        &self,
        table: &TableName,
        row: usize,
        cells: &[(usize, Value)],
    ) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let grid = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableMissing(table.clone()))?;
        apply_cells(grid, table, row, cells)
    }

    fn delete_row(&self, table: &TableName, row: usize) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let grid = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableMissing(table.clone()))?;
        if row == 0 || row > grid.len() {
            return Err(StoreError::RowOutOfRange {
                table: table.clone(),
                row,
            });
        }
        grid.remove(row - 1);
        Ok(())
    }
}

/// Writes `cells` into `grid` at 1-based `row`, widening the row if a cell
/// index falls past its current width.
pub(crate) fn apply_cells(
    grid: &mut Grid,
    table: &TableName,
    row: usize,
    cells: &[(usize, Value)],
) -> StoreResult<()> {
    if row == 0 || row > grid.len() {
        return Err(StoreError::RowOutOfRange {
            table: table.clone(),
            row,
        });
    }
    let target = &mut grid[row - 1];
    for (col, value) in cells {
        if *col >= target.len() {
            target.resize(col + 1, Value::String(String::new()));
        }
        target[*col] = value.clone();
    }
    Ok(())
}
