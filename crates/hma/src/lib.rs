//! Data access layer for PDQ hashes and signal matches.
//!
//! Hash and match records share a single DynamoDB table. The base table
//! serves lookups by content, `GSI-1` serves lookups by signal (and by exact
//! hash) and `GSI-2` serves time-ordered scans.
//!
//! ```rust,ignore
//! use hma::storage::{DynamoDbStore, PdqRepository};
//! use hma_core::storage::MatchRepository;
//!
//! let repo = PdqRepository::new(DynamoDbStore::from_env().await);
//! let matches = repo.get_matches_by_signal("5555555555555555", "test_source").await?;
//! ```

pub mod config;
pub mod storage;

pub use config::Config;
