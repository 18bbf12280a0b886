//! The audit-event model.
//!
//! One event is appended for every mutation attempt, success or failure.
//! Events are immutable: nothing in the engine updates or deletes them.

use crate::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Severity/kind of an audit event.
///
/// The current system writes `Request` for every attempted mutation and
/// `Error` when one fails; the enum is open to extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditKind {
    Request,
    Error,
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("Request"),
            Self::Error => f.write_str("Error"),
        }
    }
}

/// An immutable append-only record of one attempted mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique identifier for this event.
    pub id: RecordId,

    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,

    /// Request or Error.
    pub kind: AuditKind,

    /// Free-text description of the mutation.
    pub message: String,

    /// Correlation id tying the event to a caller's request, if any.
    pub correlation_id: Option<String>,

    /// Structured context (entity type, record id, changed fields, ...).
    pub context: Value,
}

impl AuditEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(kind: AuditKind, message: impl Into<String>, context: Value) -> Self {
        Self {
            id: RecordId::new(),
            timestamp: Utc::now(),
            kind,
            message: message.into(),
            correlation_id: None,
            context,
        }
    }

    /// Attaches a correlation id.
    #[must_use]
    pub fn with_correlation(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}
