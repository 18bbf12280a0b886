//! Generic mutators, reads and graph assembly.

use crate::audit::AuditLog;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::index::RowIndex;
use crate::notify::{ChangeObserver, FieldChange};
use chrono::Utc;
use credence_codec::{decode_logged, decode_row, encode_cell, encode_row, header_row, Record};
use credence_registry::{ChildSpec, Header, Registry, TableSpec};
use credence_store::{TabularStore, HEADER_ROW};
use credence_types::{AuditKind, RecordId, TableName};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// Derived key of the creation-timestamp column, where a table declares one.
const CREATED_AT_KEY: &str = "createdAt";
/// Derived key of the last-modified column, where a table declares one.
const UPDATED_AT_KEY: &str = "updatedAt";

/// Result of a partial update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchOutcome {
    /// False when every supplied field already held its new value — the
    /// patch was an idempotent no-op and nothing was written.
    pub updated: bool,
    /// The fields that actually changed.
    pub diff: Vec<FieldChange>,
    /// The record after the patch.
    pub record: Record,
}

/// Result of a cascade delete. Best-effort: success reflects the root
/// delete only; child-table failures are logged, counted rows are those
/// actually removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeOutcome {
    pub success: bool,
    pub message: String,
    /// Whether the root row existed and was removed.
    pub root_deleted: bool,
    /// Rows removed across all declared child tables.
    pub children_deleted: usize,
}

/// The schema-driven data-access engine over one tabular store.
pub struct Engine<S: TabularStore + ?Sized> {
    store: Arc<S>,
    registry: Registry,
    index: RowIndex,
    audit: AuditLog<S>,
    observers: Vec<Arc<dyn ChangeObserver>>,
}

impl<S: TabularStore + ?Sized> Engine<S> {
    /// Creates an engine over a store, ensuring every registry table (and
    /// the audit table) exists with its declared header row.
    pub fn new(store: Arc<S>, registry: Registry, config: EngineConfig) -> EngineResult<Self> {
        for (table, headers) in registry.all_tables() {
            store.ensure_table(&table, header_row(&headers))?;
        }
        let audit = AuditLog::new(Arc::clone(&store), config.audit_table.clone());
        Ok(Self {
            store,
            registry,
            index: RowIndex::new(config.index_ttl),
            audit,
            observers: Vec::new(),
        })
    }

    /// Registers a post-commit observer for patch diffs.
    pub fn add_observer(&mut self, observer: Arc<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The entity registry this engine was built with.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The row-index cache (exposed for cache-behavior assertions).
    #[must_use]
    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    /// The audit log.
    #[must_use]
    pub fn audit(&self) -> &AuditLog<S> {
        &self.audit
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Full-scan decode of a table.
    pub fn list_records(&self, table: &TableName, headers: &[Header]) -> EngineResult<Vec<Record>> {
        let grid = self.store.list_rows(table)?;
        Ok(decode_logged(&grid, headers))
    }

    /// Loads one record by id via a full scan (reads bypass the index).
    pub fn get_record(&self, spec: &TableSpec, id: &str) -> EngineResult<Record> {
        self.list_records(&spec.table, &spec.headers)?
            .into_iter()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| EngineError::NotFound {
                table: spec.table.clone(),
                id: id.to_string(),
            })
    }

    // ── Generic mutators ─────────────────────────────────────────

    /// Appends a new row with an engine-generated id. Cannot collide.
    pub fn create_record(&self, spec: &TableSpec, fields: Record) -> EngineResult<RecordId> {
        self.append_with_id(&spec.table, &spec.headers, fields, &spec.entity_type)
    }

    /// Appends a child row linked to `parent_id` through the child's
    /// parent-link column.
    pub fn create_child_record(
        &self,
        child: &ChildSpec,
        parent_id: &str,
        mut fields: Record,
    ) -> EngineResult<RecordId> {
        if parent_id.is_empty() {
            let err = EngineError::Validation(format!(
                "{} create requires a parent id",
                child.entity_type
            ));
            self.audit_error(&child.table, &err);
            return Err(err);
        }
        for required in &child.required {
            let missing = match fields.get(required) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            if missing {
                let err = EngineError::Validation(format!(
                    "{} create requires field {required}",
                    child.entity_type
                ));
                self.audit_error(&child.table, &err);
                return Err(err);
            }
        }
        fields.insert(
            child.parent_link.clone(),
            Value::String(parent_id.to_string()),
        );
        self.append_with_id(&child.table, &child.headers, fields, &child.entity_type)
    }

    fn append_with_id(
        &self,
        table: &TableName,
        headers: &[Header],
        mut fields: Record,
        entity_type: &str,
    ) -> EngineResult<RecordId> {
        let id = RecordId::new();
        fields.insert("id".to_string(), Value::String(id.to_string()));
        let now = Utc::now().to_rfc3339();
        for stamp in [CREATED_AT_KEY, UPDATED_AT_KEY] {
            if !headers.iter().any(|h| h.key == stamp) {
                continue;
            }
            let supplied = matches!(fields.get(stamp), Some(Value::String(s)) if !s.is_empty());
            if !supplied {
                fields.insert(stamp.to_string(), Value::String(now.clone()));
            }
        }
        let row = encode_row(&fields, headers);
        if let Err(e) = self.store.append_row(table, row) {
            let err = EngineError::Store(e);
            self.audit_error(table, &err);
            return Err(err);
        }
        self.index.invalidate(self.store.store_id(), table);
        self.audit.record(
            AuditKind::Request,
            &format!("created {entity_type}"),
            None,
            json!({ "table": table.as_str(), "id": id.to_string() }),
        );
        Ok(id)
    }

    /// Partial update by id. Only cells whose value actually differs are
    /// written; a patch that changes nothing is an idempotent no-op. The
    /// identity column is immutable and silently skipped, as are keys that
    /// match no declared column.
    pub fn patch_by_id(
        &self,
        spec: &TableSpec,
        id: &str,
        partial: &Record,
    ) -> EngineResult<PatchOutcome> {
        let positions = self
            .index
            .get_or_build(self.store.as_ref(), &spec.table, &spec.headers)?;
        let Some(&row_pos) = positions.get(id) else {
            let err = EngineError::NotFound {
                table: spec.table.clone(),
                id: id.to_string(),
            };
            self.audit_error(&spec.table, &err);
            return Err(err);
        };

        let grid = self.store.list_rows(&spec.table)?;
        let Some(row) = grid.get(row_pos - 1) else {
            // Index position past the grid: stale beyond repair for this id.
            let err = EngineError::NotFound {
                table: spec.table.clone(),
                id: id.to_string(),
            };
            self.audit_error(&spec.table, &err);
            return Err(err);
        };
        let mut issues = Vec::new();
        let old = decode_row(row, &spec.headers, row_pos, &mut issues);
        for issue in &issues {
            warn!(table = %spec.table, "decode issue during patch: {issue}");
        }

        let mut diff = Vec::new();
        let mut cells = Vec::new();
        for (key, new_value) in partial {
            let Some(header) = spec.header(key) else {
                continue;
            };
            if header.is_identity() {
                continue;
            }
            let old_value = old.get(key).cloned().unwrap_or(Value::String(String::new()));
            if &old_value == new_value {
                continue;
            }
            // column_index is always Some here: the header was found above.
            if let Some(col) = spec.column_index(key) {
                cells.push((col, encode_cell(new_value, header.kind)));
                diff.push(FieldChange {
                    key: key.clone(),
                    old: old_value,
                    new: new_value.clone(),
                });
            }
        }

        if cells.is_empty() {
            self.audit.record(
                AuditKind::Request,
                &format!("patched {} (no change)", spec.entity_type),
                None,
                json!({ "table": spec.table.as_str(), "id": id }),
            );
            return Ok(PatchOutcome {
                updated: false,
                diff,
                record: old,
            });
        }

        // A real change bumps the last-modified column, when the table
        // declares one and the caller did not set it themselves.
        let mut stamp = None;
        if !partial.contains_key(UPDATED_AT_KEY) {
            if let Some(col) = spec.column_index(UPDATED_AT_KEY) {
                let now = Value::String(Utc::now().to_rfc3339());
                cells.push((col, now.clone()));
                stamp = Some(now);
            }
        }

        if let Err(e) = self.store.update_cells(&spec.table, row_pos, &cells) {
            let err = EngineError::Store(e);
            self.audit_error(&spec.table, &err);
            return Err(err);
        }
        // Row count unchanged, so the index stays valid.

        let mut record = old;
        for change in &diff {
            record.insert(change.key.clone(), change.new.clone());
        }
        if let Some(now) = stamp {
            record.insert(UPDATED_AT_KEY.to_string(), now);
        }
        self.audit.record(
            AuditKind::Request,
            &format!("patched {}", spec.entity_type),
            None,
            json!({
                "table": spec.table.as_str(),
                "id": id,
                "changed": diff.iter().map(|c| c.key.clone()).collect::<Vec<_>>(),
            }),
        );
        for observer in &self.observers {
            observer.on_patched(&spec.table, &record, &diff);
        }
        Ok(PatchOutcome {
            updated: true,
            diff,
            record,
        })
    }

    /// Deletes a row by id. A missing id is not an error: `Ok(false)`.
    pub fn delete_by_id(&self, spec: &TableSpec, id: &str) -> EngineResult<bool> {
        let positions = self
            .index
            .get_or_build(self.store.as_ref(), &spec.table, &spec.headers)?;
        let Some(&row_pos) = positions.get(id) else {
            self.audit.record(
                AuditKind::Request,
                &format!("delete {} (not found)", spec.entity_type),
                None,
                json!({ "table": spec.table.as_str(), "id": id }),
            );
            return Ok(false);
        };
        if let Err(e) = self.store.delete_row(&spec.table, row_pos) {
            let err = EngineError::Store(e);
            self.audit_error(&spec.table, &err);
            return Err(err);
        }
        self.index.invalidate(self.store.store_id(), &spec.table);
        self.audit.record(
            AuditKind::Request,
            &format!("deleted {}", spec.entity_type),
            None,
            json!({ "table": spec.table.as_str(), "id": id }),
        );
        Ok(true)
    }

    /// Deletes every row whose cell under `key` equals `value`, scanning in
    /// reverse so earlier deletions do not shift the remaining positions.
    /// Used for cascade-delete of child tables.
    pub fn delete_all_by_column(
        &self,
        table: &TableName,
        headers: &[Header],
        key: &str,
        value: &Value,
    ) -> EngineResult<usize> {
        let Some(col) = headers.iter().position(|h| h.key == key) else {
            let err = EngineError::Validation(format!(
                "table {table} has no column with key {key}"
            ));
            self.audit_error(table, &err);
            return Err(err);
        };
        let grid = self.store.list_rows(table)?;
        let matches: Vec<usize> = grid
            .iter()
            .enumerate()
            .skip(HEADER_ROW)
            .filter(|(_, row)| row.get(col) == Some(value))
            .map(|(i, _)| i + 1)
            .collect();
        for &row_pos in matches.iter().rev() {
            self.store.delete_row(table, row_pos)?;
        }
        if !matches.is_empty() {
            self.index.invalidate(self.store.store_id(), table);
        }
        self.audit.record(
            AuditKind::Request,
            "bulk delete by column",
            None,
            json!({ "table": table.as_str(), "key": key, "removed": matches.len() }),
        );
        Ok(matches.len())
    }

    // ── Entity graph assembly ────────────────────────────────────

    /// Loads a root record and attaches, for each declared child schema,
    /// the list of child records whose parent link matches. One level only:
    /// children of children are not assembled.
    pub fn get_entity_with_children(&self, entity_type: &str, id: &str) -> EngineResult<Value> {
        let spec = self.registry.spec(entity_type)?;
        let mut entity = self.get_record(spec, id)?;
        for child in &spec.children {
            let rows = self.list_records(&child.table, &child.headers)?;
            let matched: Vec<Value> = rows
                .into_iter()
                .filter(|r| r.get(&child.parent_link).and_then(Value::as_str) == Some(id))
                .map(Value::Object)
                .collect();
            entity.insert(child.collection_key.clone(), Value::Array(matched));
        }
        Ok(Value::Object(entity))
    }

    /// Deletes a root row, then bulk-deletes matching rows from every
    /// declared child table. Best-effort: a child-table failure is logged
    /// and the cascade continues. Not transactional — a crash partway can
    /// orphan child rows.
    pub fn delete_entity_cascade(&self, entity_type: &str, id: &str) -> EngineResult<CascadeOutcome> {
        let spec = self.registry.spec(entity_type)?;
        let root_deleted = self.delete_by_id(spec, id)?;
        let mut children_deleted = 0;
        for child in &spec.children {
            match self.delete_all_by_column(
                &child.table,
                &child.headers,
                &child.parent_link,
                &Value::String(id.to_string()),
            ) {
                Ok(n) => children_deleted += n,
                Err(e) => {
                    warn!(table = %child.table, "cascade child delete failed: {e}");
                }
            }
        }
        let message = if root_deleted {
            format!("{entity_type} deleted ({children_deleted} child rows removed)")
        } else {
            format!("{entity_type} {id} not found ({children_deleted} child rows removed)")
        };
        Ok(CascadeOutcome {
            success: true,
            message,
            root_deleted,
            children_deleted,
        })
    }

    fn audit_error(&self, table: &TableName, err: &EngineError) {
        self.audit.record(
            AuditKind::Error,
            &err.to_string(),
            None,
            json!({ "table": table.as_str() }),
        );
    }
}
