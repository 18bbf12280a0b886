//! Engine configuration.

use credence_types::TableName;
use std::time::Duration;

/// Tunables for one engine instance, injected at construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long a built row index stays valid. Out-of-band writes during
    /// this window are invisible to id lookups; that staleness is the
    /// accepted consistency gap, bounded only by this TTL.
    pub index_ttl: Duration,

    /// Table the audit hook appends to.
    pub audit_table: TableName,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_ttl: Duration::from_secs(3600),
            audit_table: TableName::new("AuditLog"),
        }
    }
}

impl EngineConfig {
    /// Overrides the index TTL.
    #[must_use]
    pub fn with_index_ttl(mut self, ttl: Duration) -> Self {
        self.index_ttl = ttl;
        self
    }
}
