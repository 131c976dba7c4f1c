//! PDQ hash and match records.

mod types;

pub use types::{HashRecord, HashType, MatchRecord, StoredRecord};
