//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use hma_core::pdq::{HashRecord, HashType, MatchRecord, StoredRecord};
use hma_core::storage::{DecodeError, EncodeError};

use super::keys;
use super::schema::{
    CONTENT_HASH, GSI1_PK, GSI1_SK, GSI2_PK, HASH_TYPE, PK, QUALITY, SIGNAL_HASH, SIGNAL_ID,
    SIGNAL_SOURCE, SK, UPDATED_AT,
};
use super::store::Item;

// ============================================================================
// Hash record conversions
// ============================================================================

/// Convert a HashRecord to DynamoDB item.
///
/// Fails if `updated_at` cannot be written as a sortable key.
pub fn hash_to_item(record: &HashRecord) -> Result<Item, EncodeError> {
    let mut item = Item::new();
    let hash_type = record.hash_type();

    // Keys
    item.insert(PK.to_string(), s(keys::content_pk(&record.content_id)));
    item.insert(SK.to_string(), s(keys::hash_sk(hash_type)));
    item.insert(
        GSI1_PK.to_string(),
        s(keys::hash_gsi1_pk(hash_type, &record.content_hash)),
    );
    item.insert(
        GSI1_SK.to_string(),
        s(keys::hash_gsi1_sk(&record.content_id)),
    );
    item.insert(GSI2_PK.to_string(), s(keys::hash_gsi2_pk()));
    item.insert(
        UPDATED_AT.to_string(),
        s(keys::timestamp_key(UPDATED_AT, record.updated_at)?),
    );

    // Data
    item.insert(CONTENT_HASH.to_string(), s(record.content_hash.clone()));
    item.insert(HASH_TYPE.to_string(), s(hash_type.as_str().to_string()));
    item.insert(
        QUALITY.to_string(),
        AttributeValue::N(record.quality.to_string()),
    );

    Ok(item)
}

/// Convert a DynamoDB item to HashRecord.
pub fn item_to_hash(item: &Item) -> Result<HashRecord, DecodeError> {
    let hash_type: HashType = get_string(item, HASH_TYPE)?.parse()?;
    let sk = get_string(item, SK)?;
    if sk != keys::hash_sk(hash_type) {
        return Err(DecodeError::InvalidField {
            field: SK,
            reason: format!("not a {hash_type} hash sort key: {sk}"),
        });
    }

    Ok(HashRecord {
        content_id: get_content_id(item)?,
        content_hash: get_string(item, CONTENT_HASH)?,
        updated_at: get_datetime(item, UPDATED_AT)?,
        quality: get_i32(item, QUALITY)?,
    })
}

// ============================================================================
// Match record conversions
// ============================================================================

/// Convert a MatchRecord to DynamoDB item.
///
/// Fails if `matched_at` cannot be written as a sortable key.
pub fn match_to_item(record: &MatchRecord) -> Result<Item, EncodeError> {
    let mut item = Item::new();

    // Keys
    item.insert(PK.to_string(), s(keys::content_pk(&record.content_id)));
    item.insert(
        SK.to_string(),
        s(keys::match_sk(&record.signal_source, &record.signal_id)),
    );
    let signal_key = keys::signal_gsi1_pk(&record.signal_id, &record.signal_source);
    item.insert(GSI1_PK.to_string(), s(signal_key));
    item.insert(
        GSI1_SK.to_string(),
        s(keys::match_gsi1_sk(&record.content_id)),
    );
    item.insert(GSI2_PK.to_string(), s(keys::match_gsi2_pk()));
    item.insert(
        UPDATED_AT.to_string(),
        s(keys::timestamp_key(UPDATED_AT, record.matched_at)?),
    );

    // Data
    item.insert(CONTENT_HASH.to_string(), s(record.content_hash.clone()));
    item.insert(SIGNAL_ID.to_string(), s(record.signal_id.clone()));
    item.insert(SIGNAL_SOURCE.to_string(), s(record.signal_source.clone()));
    item.insert(SIGNAL_HASH.to_string(), s(record.signal_hash.clone()));
    item.insert(
        HASH_TYPE.to_string(),
        s(record.hash_type().as_str().to_string()),
    );

    Ok(item)
}

/// Convert a DynamoDB item to MatchRecord.
///
/// The signal identity comes from the sort key. `SignalSource` and
/// `SignalId`, when present, must agree with it.
pub fn item_to_match(item: &Item) -> Result<MatchRecord, DecodeError> {
    let sk = get_string(item, SK)?;
    let Some((signal_source, signal_id)) = keys::parse_match_sk(&sk) else {
        return Err(DecodeError::InvalidField {
            field: SK,
            reason: format!("not a match sort key: {sk}"),
        });
    };
    check_consistent(item, SIGNAL_SOURCE, &signal_source)?;
    check_consistent(item, SIGNAL_ID, &signal_id)?;
    get_string(item, HASH_TYPE)?.parse::<HashType>()?;

    Ok(MatchRecord {
        content_id: get_content_id(item)?,
        content_hash: get_string(item, CONTENT_HASH)?,
        matched_at: get_datetime(item, UPDATED_AT)?,
        signal_id,
        signal_source,
        signal_hash: get_string(item, SIGNAL_HASH)?,
    })
}

// ============================================================================
// Tagged decoding
// ============================================================================

/// Convert any item of a content partition, dispatching on its sort key.
pub fn item_to_record(item: &Item) -> Result<StoredRecord, DecodeError> {
    let sk = get_string(item, SK)?;
    if sk.starts_with(keys::match_sk_prefix()) {
        item_to_match(item).map(StoredRecord::Match)
    } else if sk.starts_with(keys::hash_sk_prefix()) {
        item_to_hash(item).map(StoredRecord::Hash)
    } else {
        Err(DecodeError::UnknownRecordType(sk))
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn s(value: String) -> AttributeValue {
    AttributeValue::S(value)
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &'static str) -> Result<String, DecodeError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or(DecodeError::MissingField(key))
}

/// Get an optional string attribute.
fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required integer attribute stored as a number.
fn get_i32(item: &Item, key: &'static str) -> Result<i32, DecodeError> {
    let n = item
        .get(key)
        .ok_or(DecodeError::MissingField(key))?
        .as_n()
        .map_err(|_| DecodeError::InvalidField {
            field: key,
            reason: "expected a number".to_string(),
        })?;
    n.parse().map_err(|_| DecodeError::InvalidField {
        field: key,
        reason: format!("not an integer: {n}"),
    })
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(item: &Item, key: &'static str) -> Result<DateTime<Utc>, DecodeError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DecodeError::InvalidField {
            field: key,
            reason: format!("invalid datetime {s}: {e}"),
        })
}

/// Get the content id encoded in the partition key.
fn get_content_id(item: &Item) -> Result<String, DecodeError> {
    let pk = get_string(item, PK)?;
    keys::parse_content_pk(&pk).ok_or_else(|| DecodeError::InvalidField {
        field: PK,
        reason: format!("not a content partition key: {pk}"),
    })
}

/// Fail if an optional attribute disagrees with the value taken from the keys.
fn check_consistent(item: &Item, key: &'static str, expected: &str) -> Result<(), DecodeError> {
    match get_optional_string(item, key) {
        Some(actual) if actual != expected => Err(DecodeError::InvalidField {
            field: key,
            reason: format!("{actual} does not match sort key value {expected}"),
        }),
        _ => Ok(()),
    }
}
