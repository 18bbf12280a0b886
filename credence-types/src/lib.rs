//! Core type definitions for the Credence data-access engine.
//!
//! Defines the universal types every Credence subsystem depends on:
//! - [`RecordId`] — the identity value stored in every table's `Id` column
//! - [`StoreId`] / [`TableName`] — typed names for stores and tables
//! - [`AuditEvent`] / [`AuditKind`] — the immutable mutation log model
//! - [`OpOutcome`] — the uniform `{success, message, data}` envelope every
//!   core operation is rendered into for the request-handling layer

mod audit;
mod ids;
mod outcome;

pub use audit::{AuditEvent, AuditKind};
pub use ids::{RecordId, StoreId, TableName};
pub use outcome::OpOutcome;
