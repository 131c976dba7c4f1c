//! The key-value store contract the access patterns are written against.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use hma_core::storage::StoreError;

use super::schema::Index;

/// A stored item: attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Condition on the sort key of the queried index.
///
/// Bounds are inclusive and compared lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortCondition {
    Equals(String),
    BeginsWith(String),
    Between(String, String),
    GreaterOrEqual(String),
    LessOrEqual(String),
}

impl SortCondition {
    /// Returns true if `value` satisfies the condition.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            SortCondition::Equals(expected) => value == expected,
            SortCondition::BeginsWith(prefix) => value.starts_with(prefix.as_str()),
            SortCondition::Between(low, high) => value >= low.as_str() && value <= high.as_str(),
            SortCondition::GreaterOrEqual(low) => value >= low.as_str(),
            SortCondition::LessOrEqual(high) => value <= high.as_str(),
        }
    }
}

/// A key-condition query against the table or one of its indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub index: Index,
    /// Value the index partition key must equal.
    pub partition: String,
    pub sort: Option<SortCondition>,
    /// Ascending sort key order when true.
    pub scan_forward: bool,
    /// Maximum number of items to return.
    pub limit: Option<usize>,
}

impl Query {
    /// Query the base table partition `pk`.
    pub fn table(pk: impl Into<String>) -> Self {
        Self::index(Index::Table, pk)
    }

    /// Query partition `partition` of `index`.
    pub fn index(index: Index, partition: impl Into<String>) -> Self {
        Self {
            index,
            partition: partition.into(),
            sort: None,
            scan_forward: true,
            limit: None,
        }
    }

    /// Restrict the sort key.
    pub fn with_sort(mut self, sort: SortCondition) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Return items in descending sort key order.
    pub fn newest_first(mut self) -> Self {
        self.scan_forward = false;
        self
    }

    /// Return at most `limit` items.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Key-value table with conditional writes and index queries.
///
/// Implementations surface their failures as [`StoreError`] and never retry.
#[async_trait]
pub trait Store: Send + Sync {
    /// Writes an item, replacing any item with the same `PK`/`SK`.
    async fn put_item(&self, item: Item) -> StoreResult<()>;

    /// Reads the item at `(pk, sk)`.
    async fn get_item(&self, pk: &str, sk: &str) -> StoreResult<Option<Item>>;

    /// Returns every item matching `query`, ordered by the index sort key.
    async fn query(&self, query: Query) -> StoreResult<Vec<Item>>;
}
