//! Core types for the HMA PDQ store.
//!
//! This crate holds the pure domain model (hash and match records), the
//! error taxonomy and the async repository contracts. It knows nothing about
//! DynamoDB; the `hma` crate provides the storage backends.

pub mod pdq;
pub mod storage;
