//! Post-commit change observation and outbound notification.
//!
//! The generic patch primitive knows nothing about any particular entity's
//! business rules. It reports the diff of every committed patch to the
//! registered observers; an observer decides whether anything leaves the
//! system. Delivery is fire-and-forget with no acknowledgement and no
//! retry — a sink failure never rolls back the patch that triggered it.

use credence_codec::Record;
use credence_types::TableName;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// One field changed by a patch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    /// Derived key of the column.
    pub key: String,
    pub old: Value,
    pub new: Value,
}

/// One-way event publish boundary (webhook fan-out lives behind this,
/// outside the core).
pub trait NotificationSink: Send + Sync {
    fn publish(&self, event_type: &str, payload: Value);
}

/// Receives the diff of every committed patch.
pub trait ChangeObserver: Send + Sync {
    fn on_patched(&self, table: &TableName, record: &Record, diff: &[FieldChange]);
}

/// Publishes a notification when a watched field of a watched table changes.
///
/// The stock instance, [`StatusChangeNotifier::provider_status`], watches
/// `credentialingStatus` on the `Providers` table and publishes
/// `provider.status_changed` with the fully updated record as payload.
pub struct StatusChangeNotifier<N: NotificationSink> {
    table: TableName,
    field: String,
    event_type: String,
    sink: N,
}

impl<N: NotificationSink> StatusChangeNotifier<N> {
    #[must_use]
    pub fn new(
        table: TableName,
        field: impl Into<String>,
        event_type: impl Into<String>,
        sink: N,
    ) -> Self {
        Self {
            table,
            field: field.into(),
            event_type: event_type.into(),
            sink,
        }
    }

    /// The provider credentialing-status rule.
    #[must_use]
    pub fn provider_status(sink: N) -> Self {
        Self::new(
            TableName::new("Providers"),
            "credentialingStatus",
            "provider.status_changed",
            sink,
        )
    }
}

impl<N: NotificationSink> ChangeObserver for StatusChangeNotifier<N> {
    fn on_patched(&self, table: &TableName, record: &Record, diff: &[FieldChange]) {
        if table != &self.table {
            return;
        }
        if diff.iter().any(|c| c.key == self.field) {
            info!(table = %table, event = %self.event_type, "publishing field-change notification");
            self.sink.publish(&self.event_type, Value::Object(record.clone()));
        }
    }
}
