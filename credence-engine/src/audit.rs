//! The audit hook: one immutable row per mutation attempt.
//!
//! Audit writes must never block a business operation. A failed append is
//! swallowed and surfaced only on the diagnostic channel (`tracing::error`).

use credence_codec::{encode_row, header_row, Record};
use credence_registry::Header;
use credence_store::TabularStore;
use credence_types::{AuditEvent, AuditKind, TableName};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Appends audit events to a dedicated table in the same store the engine
/// mutates.
pub struct AuditLog<S: TabularStore + ?Sized> {
    store: Arc<S>,
    table: TableName,
    headers: Vec<Header>,
}

impl<S: TabularStore + ?Sized> AuditLog<S> {
    /// Creates the log and ensures its table exists.
    pub fn new(store: Arc<S>, table: TableName) -> Self {
        let headers: Vec<Header> = [
            "Id",
            "Timestamp",
            "Kind",
            "Message",
            "Correlation Id",
            "Context JSON",
        ]
        .iter()
        .map(|l| Header::from_label(l))
        .collect();
        if let Err(e) = store.ensure_table(&table, header_row(&headers)) {
            error!(table = %table, "audit table bootstrap failed: {e}");
        }
        Self {
            store,
            table,
            headers,
        }
    }

    /// Appends one event. Failures are reported to the diagnostic channel
    /// and never returned to the caller.
    pub fn record(&self, kind: AuditKind, message: &str, correlation_id: Option<&str>, context: Value) {
        let mut event = AuditEvent::new(kind, message, context);
        if let Some(cid) = correlation_id {
            event = event.with_correlation(cid);
        }
        let mut record = Record::new();
        record.insert("id".into(), Value::String(event.id.to_string()));
        record.insert("timestamp".into(), Value::String(event.timestamp.to_rfc3339()));
        record.insert("kind".into(), Value::String(event.kind.to_string()));
        record.insert("message".into(), Value::String(event.message.clone()));
        record.insert(
            "correlationId".into(),
            Value::String(event.correlation_id.clone().unwrap_or_default()),
        );
        record.insert("context".into(), event.context.clone());

        let row = encode_row(&record, &self.headers);
        if let Err(e) = self.store.append_row(&self.table, row) {
            error!(table = %self.table, "audit write failed: {e}");
        }
    }

    /// The audit table name.
    #[must_use]
    pub fn table(&self) -> &TableName {
        &self.table
    }
}
