//! In-memory store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use hma_core::storage::StoreError;
use tokio::sync::RwLock;

use crate::storage::schema::{Index, PK, SK};
use crate::storage::store::{Item, Query, Store, StoreResult};

/// In-memory store for testing.
///
/// Items live in a `BTreeMap` keyed by `(PK, SK)` wrapped in `Arc<RwLock<_>>`
/// for thread-safe access. Queries behave like the real table: indexes are
/// sparse, results are ordered by the index sort key and index reads only
/// return projected attributes. Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    items: Arc<RwLock<BTreeMap<(String, String), Item>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items in the table.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns true if the table holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

/// Get a string attribute, the only key type the table uses.
fn key_value<'a>(item: &'a Item, attribute: &str) -> Option<&'a str> {
    item.get(attribute)
        .and_then(|v| v.as_s().ok())
        .map(String::as_str)
}

/// Keep only the attributes `index` projects.
fn project(index: Index, item: &Item) -> Item {
    item.iter()
        .filter(|(name, _)| index.projects(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[async_trait]
impl Store for InMemoryStore {
    async fn put_item(&self, item: Item) -> StoreResult<()> {
        let (Some(pk), Some(sk)) = (key_value(&item, PK), key_value(&item, SK)) else {
            return Err(StoreError::Request(
                "Item is missing a string PK or SK attribute".to_string(),
            ));
        };
        let key = (pk.to_string(), sk.to_string());

        let mut items = self.items.write().await;
        items.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, pk: &str, sk: &str) -> StoreResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&(pk.to_string(), sk.to_string())).cloned())
    }

    async fn query(&self, query: Query) -> StoreResult<Vec<Item>> {
        let partition_key = query.index.partition_key();
        let sort_key = query.index.sort_key();
        let items = self.items.read().await;

        // Table order breaks ties between equal index sort keys.
        let mut matches: Vec<(&str, &Item)> = items
            .values()
            .filter(|item| key_value(item, partition_key) == Some(query.partition.as_str()))
            .filter_map(|item| key_value(item, sort_key).map(|sort| (sort, item)))
            .filter(|(sort, _)| query.sort.as_ref().is_none_or(|cond| cond.matches(sort)))
            .collect();
        matches.sort_by(|a, b| a.0.cmp(b.0));

        if !query.scan_forward {
            matches.reverse();
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(matches
            .into_iter()
            .take(limit)
            .map(|(_, item)| project(query.index, item))
            .collect())
    }
}
