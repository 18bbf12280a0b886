//! JSON workbook file store.
//!
//! All tables live in one JSON document on disk. Every mutation rewrites the
//! whole file through a temp-file rename, so a crash mid-write leaves the
//! previous workbook intact rather than a torn one. A mutation whose persist
//! fails is rolled back in memory, keeping reads consistent with the file.

use crate::memory::apply_cells;
use crate::{Grid, Row, StoreError, StoreResult, TabularStore};
use credence_types::{StoreId, TableName};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk shape of the workbook document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WorkbookDoc {
    tables: HashMap<String, Grid>,
}

/// A store persisted as a single JSON workbook file.
pub struct WorkbookFile {
    store_id: StoreId,
    path: PathBuf,
    tables: RwLock<HashMap<TableName, Grid>>,
}

impl WorkbookFile {
    /// Opens a workbook, loading it from `path` if the file exists and
    /// starting empty otherwise. The file's path doubles as the store id.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let doc: WorkbookDoc = serde_json::from_str(&raw)?;
            doc.tables
                .into_iter()
                .map(|(name, grid)| (TableName::new(name), grid))
                .collect()
        } else {
            HashMap::new()
        };
        debug!(path = %path.display(), tables = tables.len(), "opened workbook");
        Ok(Self {
            store_id: StoreId::new(path.display().to_string()),
            path,
            tables: RwLock::new(tables),
        })
    }

    /// Serializes the given table map and renames it over the workbook file.
    fn persist(&self, tables: &HashMap<TableName, Grid>) -> StoreResult<()> {
        let doc = WorkbookDoc {
            tables: tables
                .iter()
                .map(|(name, grid)| (name.as_str().to_string(), grid.clone()))
                .collect(),
        };
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let tmp = tempfile::NamedTempFile::new_in(parent)?;
        serde_json::to_writer(&tmp, &doc)?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Persist(e.to_string()))?;
        Ok(())
    }
}

impl TabularStore for WorkbookFile {
    fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    fn ensure_table(&self, table: &TableName, header: Row) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.contains_key(table) {
            tables.insert(table.clone(), vec![header]);
            if let Err(e) = self.persist(&tables) {
                tables.remove(table);
                return Err(e);
            }
        }
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
        let before = grid.clone();
        grid.push(row);
        if let Err(e) = self.persist(&tables) {
            // Memory must not get ahead of disk.
            tables.insert(table.clone(), before);
            return Err(e);
        }
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
        let before = grid.clone();
        apply_cells(grid, table, row, cells)?;
        if let Err(e) = self.persist(&tables) {
            tables.insert(table.clone(), before);
            return Err(e);
        }
        Ok(())
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
        let before = grid.clone();
        grid.remove(row - 1);
        if let Err(e) = self.persist(&tables) {
            tables.insert(table.clone(), before);
            return Err(e);
        }
        Ok(())
    }
}
