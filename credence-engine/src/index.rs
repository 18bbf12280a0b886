//! The row-index cache: id → 1-based row position per table.
//!
//! Built by a full decode of the table, cached with a TTL, and removed
//! unconditionally after any insert or delete. In-place patches leave the
//! index alone since row positions are unaffected.
//!
//! There is no locking around builds: two callers racing on a miss both
//! scan and both insert, computing the same answer from the same grid. One
//! scan is wasted; nothing is corrupted.

use credence_codec::decode_logged;
use credence_registry::Header;
use credence_store::{TabularStore, HEADER_ROW};
use credence_types::{StoreId, TableName};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::EngineResult;

/// Cache key: one index per (store, table) pair, so two stores holding a
/// table of the same name never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexKey {
    pub store_id: StoreId,
    pub table: TableName,
}

/// A built index plus its build instant.
struct CacheEntry {
    positions: Arc<HashMap<String, usize>>,
    built_at: Instant,
}

/// TTL-cached id → row-position maps.
pub struct RowIndex {
    entries: RwLock<HashMap<IndexKey, CacheEntry>>,
    ttl: Duration,
}

impl RowIndex {
    /// Creates an empty cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the cached index for a table, building it from a full table
    /// decode on miss or expiry. Data rows map to positions starting at 2
    /// (the header row is 1).
    pub fn get_or_build<S: TabularStore + ?Sized>(
        &self,
        store: &S,
        table: &TableName,
        headers: &[Header],
    ) -> EngineResult<Arc<HashMap<String, usize>>> {
        let key = IndexKey {
            store_id: store.store_id().clone(),
            table: table.clone(),
        };
        if let Some(entry) = self.entries.read().get(&key) {
            if entry.built_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.positions));
            }
        }

        let grid = store.list_rows(table)?;
        let records = decode_logged(&grid, headers);
        let mut positions = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if let Some(id) = record.get("id").and_then(|v| v.as_str()) {
                positions.insert(id.to_string(), i + HEADER_ROW + 1);
            }
        }
        debug!(table = %table, rows = positions.len(), "built row index");

        let positions = Arc::new(positions);
        self.entries.write().insert(
            key,
            CacheEntry {
                positions: Arc::clone(&positions),
                built_at: Instant::now(),
            },
        );
        Ok(positions)
    }

    /// Drops the cached entry for a table, if any. Called after every
    /// insert or delete on that table.
    pub fn invalidate(&self, store_id: &StoreId, table: &TableName) {
        let key = IndexKey {
            store_id: store_id.clone(),
            table: table.clone(),
        };
        self.entries.write().remove(&key);
    }

    /// True when a live (unexpired) entry exists for the table.
    #[must_use]
    pub fn contains(&self, store_id: &StoreId, table: &TableName) -> bool {
        let key = IndexKey {
            store_id: store_id.clone(),
            table: table.clone(),
        };
        self.entries
            .read()
            .get(&key)
            .is_some_and(|e| e.built_at.elapsed() < self.ttl)
    }
}
