//! Single-table storage for PDQ hash and match records.
//!
//! Records are written to one table whose composite keys are built by
//! [`keys`] and whose attributes are produced by [`conversions`]. Reads go
//! through [`PdqRepository`], which routes every access pattern to the base
//! table or one of the two global secondary indexes described in [`schema`].
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB store using `aws-sdk-dynamodb`
//! - `inmemory` (default): In-memory store emulating the table, for tests
//!
//! # Examples
//!
//! Build without the DynamoDB store:
//! ```bash
//! cargo build -p hma --no-default-features --features inmemory
//! ```

pub mod conversions;
pub mod keys;
pub mod schema;

mod repository;
mod store;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

pub use repository::PdqRepository;
pub use schema::Index;
pub use store::{Item, Query, SortCondition, Store, StoreResult};

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;
