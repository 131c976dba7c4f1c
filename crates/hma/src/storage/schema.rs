//! Table layout: attribute names, indexes and their projections.
//!
//! These names are the wire contract with the table. Pure data, no I/O.

// ============================================================================
// Attribute names
// ============================================================================

pub const PK: &str = "PK";
pub const SK: &str = "SK";
pub const GSI1_PK: &str = "GSI1-PK";
pub const GSI1_SK: &str = "GSI1-SK";
pub const GSI2_PK: &str = "GSI2-PK";
pub const UPDATED_AT: &str = "UpdatedAt";

pub const CONTENT_HASH: &str = "ContentHash";
pub const SIGNAL_HASH: &str = "SignalHash";
pub const SIGNAL_SOURCE: &str = "SignalSource";
pub const SIGNAL_ID: &str = "SignalId";
pub const HASH_TYPE: &str = "HashType";
pub const QUALITY: &str = "Quality";

/// Non-key attributes copied into both global secondary indexes.
pub const INDEX_PROJECTED_ATTRIBUTES: &[&str] = &[
    CONTENT_HASH,
    SIGNAL_HASH,
    SIGNAL_SOURCE,
    SIGNAL_ID,
    HASH_TYPE,
    UPDATED_AT,
    QUALITY,
];

// ============================================================================
// Indexes
// ============================================================================

/// Which key ordering a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    /// The base table (`PK`, `SK`).
    Table,
    /// Signal and exact-hash lookups (`GSI1-PK`, `GSI1-SK`).
    Gsi1,
    /// Time-ordered buckets (`GSI2-PK`, `UpdatedAt`).
    Gsi2,
}

/// Which attributes an index carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    All,
    /// Table keys, index keys and the listed attributes.
    Include(&'static [&'static str]),
}

impl Index {
    /// Global secondary indexes defined on the table.
    pub const GLOBAL_SECONDARY: [Index; 2] = [Index::Gsi1, Index::Gsi2];

    /// Index name to pass to the store, `None` for the base table.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Index::Table => None,
            Index::Gsi1 => Some("GSI-1"),
            Index::Gsi2 => Some("GSI-2"),
        }
    }

    /// Partition key attribute of this index.
    pub fn partition_key(&self) -> &'static str {
        match self {
            Index::Table => PK,
            Index::Gsi1 => GSI1_PK,
            Index::Gsi2 => GSI2_PK,
        }
    }

    /// Sort key attribute of this index.
    pub fn sort_key(&self) -> &'static str {
        match self {
            Index::Table => SK,
            Index::Gsi1 => GSI1_SK,
            Index::Gsi2 => UPDATED_AT,
        }
    }

    pub fn projection(&self) -> Projection {
        match self {
            Index::Table => Projection::All,
            Index::Gsi1 | Index::Gsi2 => Projection::Include(INDEX_PROJECTED_ATTRIBUTES),
        }
    }

    /// Returns true if an item read through this index keeps `attribute`.
    pub fn projects(&self, attribute: &str) -> bool {
        if attribute == PK
            || attribute == SK
            || attribute == self.partition_key()
            || attribute == self.sort_key()
        {
            return true;
        }
        match self.projection() {
            Projection::All => true,
            Projection::Include(attributes) => attributes.contains(&attribute),
        }
    }
}
