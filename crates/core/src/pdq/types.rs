use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::DecodeError;

/// Hash algorithm a [`HashRecord`] was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    /// PDQ perceptual hash (256 bits, 64 hex characters).
    Pdq,
}

impl HashType {
    /// Returns the wire representation stored in the `HashType` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashType::Pdq => "pdq",
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdq" => Ok(HashType::Pdq),
            other => Err(DecodeError::InvalidField {
                field: "HashType",
                reason: format!("unknown hash type: {other}"),
            }),
        }
    }
}

/// The PDQ hash computed for a piece of content.
///
/// There is at most one record per content id and hash type; writing a new
/// one replaces the previous hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashRecord {
    pub content_id: String,
    /// Hex-encoded PDQ hash.
    pub content_hash: String,
    pub updated_at: DateTime<Utc>,
    /// PDQ quality score (0-100).
    pub quality: i32,
}

impl HashRecord {
    /// Creates a new hash record.
    pub fn new(
        content_id: impl Into<String>,
        content_hash: impl Into<String>,
        updated_at: DateTime<Utc>,
        quality: i32,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            content_hash: content_hash.into(),
            updated_at,
            quality,
        }
    }

    /// The hash algorithm of this record.
    pub fn hash_type(&self) -> HashType {
        HashType::Pdq
    }
}

/// A match between a piece of content and a reference signal.
///
/// Identity is `(content_id, signal_source, signal_id)`: matching the same
/// pair again overwrites the earlier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub content_id: String,
    pub content_hash: String,
    pub matched_at: DateTime<Utc>,
    pub signal_id: String,
    /// Namespace the signal comes from (e.g. a hash bank name).
    pub signal_source: String,
    pub signal_hash: String,
}

impl MatchRecord {
    /// Creates a new match record.
    pub fn new(
        content_id: impl Into<String>,
        content_hash: impl Into<String>,
        matched_at: DateTime<Utc>,
        signal_id: impl Into<String>,
        signal_source: impl Into<String>,
        signal_hash: impl Into<String>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            content_hash: content_hash.into(),
            matched_at,
            signal_id: signal_id.into(),
            signal_source: signal_source.into(),
            signal_hash: signal_hash.into(),
        }
    }

    /// The hash algorithm of the matched hashes.
    pub fn hash_type(&self) -> HashType {
        HashType::Pdq
    }
}

/// Any record that can live in a content partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "recordType", rename_all = "camelCase")]
pub enum StoredRecord {
    Hash(HashRecord),
    Match(MatchRecord),
}

impl StoredRecord {
    /// Returns the content id the record belongs to.
    pub fn content_id(&self) -> &str {
        match self {
            StoredRecord::Hash(record) => &record.content_id,
            StoredRecord::Match(record) => &record.content_id,
        }
    }

    /// Returns the time the record was last written by the pipeline.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            StoredRecord::Hash(record) => record.updated_at,
            StoredRecord::Match(record) => record.matched_at,
        }
    }

    /// Returns the hash record if this is one.
    pub fn as_hash(&self) -> Option<&HashRecord> {
        match self {
            StoredRecord::Hash(record) => Some(record),
            StoredRecord::Match(_) => None,
        }
    }

    /// Returns the match record if this is one.
    pub fn as_match(&self) -> Option<&MatchRecord> {
        match self {
            StoredRecord::Match(record) => Some(record),
            StoredRecord::Hash(_) => None,
        }
    }
}

impl From<HashRecord> for StoredRecord {
    fn from(record: HashRecord) -> Self {
        StoredRecord::Hash(record)
    }
}

impl From<MatchRecord> for StoredRecord {
    fn from(record: MatchRecord) -> Self {
        StoredRecord::Match(record)
    }
}
