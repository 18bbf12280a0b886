//! Static entity schema registry.
//!
//! Declares, for every logical entity type, its backing table name, its
//! ordered header list and its child tables. The registry is built once at
//! process start from a fixed list and never mutated at runtime; every
//! generic engine primitive is driven by the metadata declared here instead
//! of bespoke per-entity code.
//!
//! Column semantics (boolean, JSON, identity) and the derived record keys
//! are computed here, at registry-build time, so the codec never re-derives
//! them from header text on a per-row basis.

mod header;
mod schema;
mod standard;

pub use header::{derive_key, ColumnKind, Header, IDENTITY_LABEL};
pub use schema::{ChildSpec, TableSpec};

use credence_types::TableName;
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type for registry lookups.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur resolving entity metadata.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The entity type is not declared in the registry.
    #[error("no schema registered for entity type: {0}")]
    SchemaNotFound(String),
}

/// The fixed set of entity schemas, keyed by entity type name.
#[derive(Debug, Clone)]
pub struct Registry {
    specs: BTreeMap<String, TableSpec>,
}

impl Registry {
    /// Builds a registry from an explicit list of specs.
    #[must_use]
    pub fn new(specs: Vec<TableSpec>) -> Self {
        Self {
            specs: specs
                .into_iter()
                .map(|s| (s.entity_type.clone(), s))
                .collect(),
        }
    }

    /// The credentialing schema set: Provider, Facility,
    /// CredentialingRequest, Monitor, Webhook and their children.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard::standard_specs())
    }

    /// Resolves the spec for an entity type.
    pub fn spec(&self, entity_type: &str) -> RegistryResult<&TableSpec> {
        self.specs
            .get(entity_type)
            .ok_or_else(|| RegistryError::SchemaNotFound(entity_type.to_string()))
    }

    /// All declared top-level specs, in entity-type order.
    pub fn specs(&self) -> impl Iterator<Item = &TableSpec> {
        self.specs.values()
    }

    /// All tables the registry knows about, children included. Used to
    /// bootstrap a store's tables with their header rows.
    #[must_use]
    pub fn all_tables(&self) -> Vec<(TableName, Vec<Header>)> {
        let mut tables = Vec::new();
        for spec in self.specs.values() {
            tables.push((spec.table.clone(), spec.headers.clone()));
            for child in &spec.children {
                tables.push((child.table.clone(), child.headers.clone()));
            }
        }
        tables
    }
}
