//! Table and child-relation specs.

use crate::Header;
use credence_types::TableName;
use serde::{Deserialize, Serialize};

/// Metadata for one top-level entity type: its backing table, ordered
/// headers, and the child tables deleted along with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Logical entity type name, e.g. `Provider`.
    pub entity_type: String,
    /// Backing table name, e.g. `Providers`.
    pub table: TableName,
    /// Column order; defines the row shape.
    pub headers: Vec<Header>,
    /// Declared children, cascaded on delete.
    pub children: Vec<ChildSpec>,
}

impl TableSpec {
    /// Looks up a header by derived key.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.key == key)
    }

    /// 0-based column index of a derived key.
    #[must_use]
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.key == key)
    }

    /// The stored header labels, in column order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.headers.iter().map(|h| h.label.clone()).collect()
    }
}

/// Metadata for one child table of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSpec {
    /// Logical child entity type name, e.g. `License`.
    pub entity_type: String,
    /// Field name the assembler attaches the child list under,
    /// e.g. `licenses`.
    pub collection_key: String,
    /// Backing table name.
    pub table: TableName,
    /// Column order of the child table.
    pub headers: Vec<Header>,
    /// Derived key of the column holding the owning parent's id.
    pub parent_link: String,
    /// Derived keys that must be present on create.
    pub required: Vec<String>,
}

impl ChildSpec {
    /// Looks up a header by derived key.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.key == key)
    }

    /// A childless table spec for this table, so child rows flow through
    /// the same generic patch/delete primitives as roots. Child updates are
    /// partial-patch: unspecified fields keep their stored values.
    #[must_use]
    pub fn to_table_spec(&self) -> TableSpec {
        TableSpec {
            entity_type: self.entity_type.clone(),
            table: self.table.clone(),
            headers: self.headers.clone(),
            children: Vec::new(),
        }
    }

    /// 0-based column index of a derived key.
    #[must_use]
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.key == key)
    }
}
