//! The generic data-access engine.
//!
//! Every entity in the credentialing system is driven through the handful of
//! primitives here, parameterized by registry metadata rather than bespoke
//! per-entity code:
//!
//! - [`Engine::create_record`] / [`Engine::create_child_record`] — append a
//!   new row with an engine-generated id
//! - [`Engine::patch_by_id`] — diff-based partial update, idempotent no-op
//!   when nothing changed
//! - [`Engine::delete_by_id`] / [`Engine::delete_all_by_column`] — row
//!   removal, the latter scanning in reverse for multi-row stability
//! - [`Engine::get_entity_with_children`] /
//!   [`Engine::delete_entity_cascade`] — one-level graph assembly and
//!   best-effort cascade across the declared child schemas
//!
//! Row lookup by id goes through a TTL-cached row index
//! ([`RowIndex`]); plain reads are full scans through the codec. Every
//! mutation attempt, success or failure, lands one row in the audit table
//! via [`AuditLog`], and patches feed a post-commit [`ChangeObserver`] seam
//! so notification rules stay out of the generic engine.
//!
//! There is no locking, no transaction and no retry anywhere in this layer.
//! Concurrent patches to one row race last-writer-wins; a crash mid-cascade
//! can orphan child rows. Both are accepted, documented properties.

mod audit;
mod config;
mod engine;
mod error;
mod index;
mod notify;

pub use audit::AuditLog;
pub use config::EngineConfig;
pub use engine::{CascadeOutcome, Engine, PatchOutcome};
pub use error::{EngineError, EngineResult};
pub use index::{IndexKey, RowIndex};
pub use notify::{ChangeObserver, FieldChange, NotificationSink, StatusChangeNotifier};
