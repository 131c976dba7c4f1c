//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the [`Store`]
//! trait using `aws-sdk-dynamodb`.
//!
//! [`Store`]: crate::storage::Store

mod error;
mod store;

pub use store::DynamoDbStore;
