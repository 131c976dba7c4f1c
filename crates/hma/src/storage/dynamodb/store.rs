//! DynamoDB store implementation.
//!
//! Implements the [`Store`] trait on top of `aws-sdk-dynamodb`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::storage::schema::{PK, SK};
use crate::storage::store::{Item, Query, SortCondition, Store, StoreResult};

use super::error::{map_get_item_error, map_put_item_error, map_query_error};

/// DynamoDB-based store.
///
/// Cheap to clone; the SDK client is shared and thread-safe.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store from configuration.
    ///
    /// Uses the AWS SDK default credential chain, the configured region and,
    /// when set, a custom endpoint such as DynamoDB Local.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        info!(
            table = %config.table_name,
            target = %config.target_display(),
            "Connected to DynamoDB"
        );

        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Creates a new store from environment configuration.
    pub async fn from_env() -> Self {
        Self::from_config(&Config::from_env()).await
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Get the underlying SDK client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// A key condition expression with its name and value placeholders.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct KeyCondition {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Build the key condition for `query`.
///
/// Attribute names go through `#pk`/`#sk` placeholders because names such as
/// `GSI1-PK` are not valid in expressions.
pub(crate) fn key_condition(query: &Query) -> KeyCondition {
    let mut names = HashMap::from([(
        "#pk".to_string(),
        query.index.partition_key().to_string(),
    )]);
    let mut values = HashMap::from([(
        ":pk".to_string(),
        AttributeValue::S(query.partition.clone()),
    )]);

    let sort_expression = query.sort.as_ref().map(|sort| {
        names.insert("#sk".to_string(), query.index.sort_key().to_string());
        match sort {
            SortCondition::Equals(value) => {
                values.insert(":sk".to_string(), AttributeValue::S(value.clone()));
                "#sk = :sk"
            }
            SortCondition::BeginsWith(prefix) => {
                values.insert(":sk".to_string(), AttributeValue::S(prefix.clone()));
                "begins_with(#sk, :sk)"
            }
            SortCondition::Between(low, high) => {
                values.insert(":sk_low".to_string(), AttributeValue::S(low.clone()));
                values.insert(":sk_high".to_string(), AttributeValue::S(high.clone()));
                "#sk BETWEEN :sk_low AND :sk_high"
            }
            SortCondition::GreaterOrEqual(low) => {
                values.insert(":sk".to_string(), AttributeValue::S(low.clone()));
                "#sk >= :sk"
            }
            SortCondition::LessOrEqual(high) => {
                values.insert(":sk".to_string(), AttributeValue::S(high.clone()));
                "#sk <= :sk"
            }
        }
    });

    let expression = match sort_expression {
        Some(sort) => format!("#pk = :pk AND {sort}"),
        None => "#pk = :pk".to_string(),
    };

    KeyCondition {
        expression,
        names,
        values,
    }
}

#[async_trait]
impl Store for DynamoDbStore {
    async fn put_item(&self, item: Item) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name))?;

        debug!(table = %self.table_name, "Put item");
        Ok(())
    }

    async fn get_item(&self, pk: &str, sk: &str) -> StoreResult<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PK, AttributeValue::S(pk.to_string()))
            .key(SK, AttributeValue::S(sk.to_string()))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &self.table_name))?;

        debug!(
            table = %self.table_name,
            pk = %pk,
            sk = %sk,
            found = result.item.is_some(),
            "Get item"
        );
        Ok(result.item)
    }

    async fn query(&self, query: Query) -> StoreResult<Vec<Item>> {
        if query.limit == Some(0) {
            return Ok(Vec::new());
        }

        let condition = key_condition(&query);
        let mut items: Vec<Item> = Vec::new();
        let mut exclusive_start_key = None;
        let mut pages = 0usize;

        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.table_name)
                .set_index_name(query.index.name().map(str::to_string))
                .key_condition_expression(&condition.expression)
                .set_expression_attribute_names(Some(condition.names.clone()))
                .set_expression_attribute_values(Some(condition.values.clone()))
                .scan_index_forward(query.scan_forward)
                .set_exclusive_start_key(exclusive_start_key.take());

            if let Some(limit) = query.limit {
                let remaining = limit.saturating_sub(items.len());
                request = request.limit(i32::try_from(remaining).unwrap_or(i32::MAX));
            }

            let output = request
                .send()
                .await
                .map_err(|e| map_query_error(e, &self.table_name))?;
            pages += 1;

            items.extend(output.items.unwrap_or_default());
            exclusive_start_key = output.last_evaluated_key;

            let limit_reached = query.limit.is_some_and(|limit| items.len() >= limit);
            if exclusive_start_key.is_none() || limit_reached {
                break;
            }
        }

        if let Some(limit) = query.limit {
            items.truncate(limit);
        }

        debug!(
            table = %self.table_name,
            index = query.index.name().unwrap_or("table"),
            partition = %query.partition,
            pages,
            count = items.len(),
            "Query"
        );
        Ok(items)
    }
}
