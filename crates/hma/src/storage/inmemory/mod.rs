//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the [`Store`] trait
//! that keeps every item in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. It
//! mirrors the table's key schema, index sparseness and projections, which
//! makes it suitable for tests and local development where persistence is
//! not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use hma::storage::{InMemoryStore, PdqRepository};
//!
//! let repo = PdqRepository::new(InMemoryStore::new());
//! // Use repo for testing...
//! ```
//!
//! [`Store`]: crate::storage::Store

mod store;

pub use store::InMemoryStore;
