//! DynamoDB key generation functions.
//!
//! Pure functions for generating partition and sort keys following the single-table design.
//! All functions are sync and have no side effects.
//!
//! Every caller-supplied component is escaped before it is joined, so an
//! identifier containing `#` can never be confused with the delimiter:
//! `\` becomes `\\` and `#` becomes `\#`.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use hma_core::pdq::HashType;
use hma_core::storage::EncodeError;

// ============================================================================
// Key prefixes
// ============================================================================

pub const CONTENT_PREFIX: &str = "c#";
pub const SIGNAL_PREFIX: &str = "s#";
pub const TYPE_PREFIX: &str = "type#";
pub const HASH_VALUE_PREFIX: &str = "h#";

/// Record type discriminators used in index keys.
pub const PDQ_HASH_RECORD_TYPE: &str = "pdq_hash";
pub const PDQ_MATCH_RECORD_TYPE: &str = "pdq_match";

const DELIMITER: char = '#';
const ESCAPE: char = '\\';

// ============================================================================
// Escaping
// ============================================================================

/// Escape a key component so it contains no bare delimiter.
pub fn escape_component(component: &str) -> String {
    let mut escaped = String::with_capacity(component.len());
    for c in component.chars() {
        if c == DELIMITER || c == ESCAPE {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Split an escaped key on bare delimiters and unescape each part.
///
/// Returns `None` for a dangling or unknown escape sequence.
fn split_components(key: &str) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = key.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next()? {
                escaped @ (ESCAPE | DELIMITER) => current.push(escaped),
                _ => return None,
            },
            DELIMITER => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);

    Some(parts)
}

/// Reverse [`escape_component`].
///
/// Returns `None` if the input holds a bare delimiter or a bad escape.
pub fn unescape_component(component: &str) -> Option<String> {
    let mut parts = split_components(component)?;
    if parts.len() != 1 {
        return None;
    }
    parts.pop()
}

// ============================================================================
// Content keys
// ============================================================================

/// Generate the partition key shared by every record of a piece of content.
///
/// Pattern: `c#<content_id>`
pub fn content_pk(content_id: &str) -> String {
    format!("{CONTENT_PREFIX}{}", escape_component(content_id))
}

/// Recover the content id from a content partition key.
pub fn parse_content_pk(pk: &str) -> Option<String> {
    unescape_component(pk.strip_prefix(CONTENT_PREFIX)?)
}

// ============================================================================
// Hash record keys
// ============================================================================

/// Generate the sort key of a hash record.
///
/// Pattern: `type#<hash_type>`
pub fn hash_sk(hash_type: HashType) -> String {
    format!("{TYPE_PREFIX}{}", hash_type.as_str())
}

/// Recover the hash type name from a hash record sort key.
pub fn parse_hash_sk(sk: &str) -> Option<&str> {
    sk.strip_prefix(TYPE_PREFIX)
}

/// Generate GSI1 partition key for a hash record (exact hash lookup).
///
/// Pattern: `h#<hash_type>#<content_hash>`
pub fn hash_gsi1_pk(hash_type: HashType, content_hash: &str) -> String {
    format!(
        "{HASH_VALUE_PREFIX}{}#{}",
        hash_type.as_str(),
        escape_component(content_hash)
    )
}

/// Generate GSI1 sort key for a hash record.
///
/// Pattern: `type#pdq_hash#c#<content_id>`
pub fn hash_gsi1_sk(content_id: &str) -> String {
    format!(
        "{TYPE_PREFIX}{PDQ_HASH_RECORD_TYPE}#{}",
        content_pk(content_id)
    )
}

/// Generate GSI2 partition key bucketing every hash record.
///
/// Pattern: `type#pdq_hash`
pub fn hash_gsi2_pk() -> String {
    format!("{TYPE_PREFIX}{PDQ_HASH_RECORD_TYPE}")
}

/// Generate the sort key prefix for hash rows in a content partition.
///
/// Pattern: `type#`
pub fn hash_sk_prefix() -> &'static str {
    TYPE_PREFIX
}

// ============================================================================
// Match record keys
// ============================================================================

/// Generate the sort key of a match record.
///
/// Pattern: `s#<signal_source>#<signal_id>`
pub fn match_sk(signal_source: &str, signal_id: &str) -> String {
    format!(
        "{SIGNAL_PREFIX}{}#{}",
        escape_component(signal_source),
        escape_component(signal_id)
    )
}

/// Recover `(signal_source, signal_id)` from a match record sort key.
pub fn parse_match_sk(sk: &str) -> Option<(String, String)> {
    let mut parts = split_components(sk.strip_prefix(SIGNAL_PREFIX)?)?;
    if parts.len() != 2 {
        return None;
    }
    let signal_id = parts.pop()?;
    let signal_source = parts.pop()?;
    Some((signal_source, signal_id))
}

/// Generate GSI1 partition key for a match record (signal lookup).
///
/// Pattern: `s#<signal_source>#<signal_id>`, the same value as the match sort key.
pub fn signal_gsi1_pk(signal_id: &str, signal_source: &str) -> String {
    match_sk(signal_source, signal_id)
}

/// Generate GSI1 sort key for a match record.
///
/// Pattern: `type#pdq_match#c#<content_id>`
pub fn match_gsi1_sk(content_id: &str) -> String {
    format!(
        "{TYPE_PREFIX}{PDQ_MATCH_RECORD_TYPE}#{}",
        content_pk(content_id)
    )
}

/// Generate GSI2 partition key bucketing every match record.
///
/// Pattern: `type#pdq_match`
pub fn match_gsi2_pk() -> String {
    format!("{TYPE_PREFIX}{PDQ_MATCH_RECORD_TYPE}")
}

/// Generate the sort key prefix for match rows in a content partition.
///
/// Pattern: `s#`
pub fn match_sk_prefix() -> &'static str {
    SIGNAL_PREFIX
}

// ============================================================================
// Time keys
// ============================================================================

/// Earliest and latest keys [`timestamp_key`] can produce.
pub const MIN_TIMESTAMP_KEY: &str = "0000-01-01T00:00:00.000000000Z";
pub const MAX_TIMESTAMP_KEY: &str = "9999-12-31T23:59:59.999999999Z";

/// Encode a timestamp as the GSI2 sort key (`UpdatedAt`).
///
/// RFC 3339 in UTC with a fixed nine-digit fraction, so lexicographic order
/// matches chronological order and no precision is lost. Only four-digit
/// years keep that property, so anything outside 0000..=9999 is rejected.
pub fn timestamp_key(field: &'static str, at: DateTime<Utc>) -> Result<String, EncodeError> {
    if !(0..=9999).contains(&at.year()) {
        return Err(EncodeError::TimestampOutOfRange {
            field,
            value: at.to_rfc3339(),
        });
    }
    Ok(at.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

/// Encode a query bound, clamping it to the encodable years.
///
/// No stored key lies outside that span, so clamping never changes which
/// items a bound selects.
pub fn timestamp_bound(at: DateTime<Utc>) -> String {
    match at.year() {
        year if year < 0 => MIN_TIMESTAMP_KEY.to_string(),
        year if year > 9999 => MAX_TIMESTAMP_KEY.to_string(),
        _ => at.to_rfc3339_opts(SecondsFormat::Nanos, true),
    }
}
