use async_trait::async_trait;

use crate::pdq::{HashRecord, MatchRecord};

use super::{Result, TimeRange};

/// Repository for PDQ hash records.
#[async_trait]
pub trait HashRepository: Send + Sync {
    /// Writes a hash record, replacing any previous hash for the same content.
    async fn put_hash(&self, record: &HashRecord) -> Result<()>;

    /// Gets the hash record for a content id.
    async fn get_hash_by_content_id(&self, content_id: &str) -> Result<Option<HashRecord>>;

    /// Gets the hash record for a content id, failing with `NotFound` when absent.
    async fn require_hash_by_content_id(&self, content_id: &str) -> Result<HashRecord>;

    /// Gets every hash record whose hash is exactly `content_hash`.
    async fn get_hashes_by_content_hash(&self, content_hash: &str) -> Result<Vec<HashRecord>>;

    /// Gets hash records updated within a time range, oldest first.
    async fn get_hashes_by_time_range(&self, range: TimeRange) -> Result<Vec<HashRecord>>;
}

/// Repository for signal match records.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Writes a match record, replacing any previous match for the same
    /// content and signal.
    async fn put_match(&self, record: &MatchRecord) -> Result<()>;

    /// Gets all matches for a content id.
    async fn get_matches_by_content_id(&self, content_id: &str) -> Result<Vec<MatchRecord>>;

    /// Gets all matches against a signal.
    async fn get_matches_by_signal(
        &self,
        signal_id: &str,
        signal_source: &str,
    ) -> Result<Vec<MatchRecord>>;

    /// Gets matches made within a time range, oldest first.
    async fn get_matches_by_time_range(&self, range: TimeRange) -> Result<Vec<MatchRecord>>;

    /// Gets up to `limit` of the most recent matches, newest first.
    async fn get_recent_matches(&self, limit: usize) -> Result<Vec<MatchRecord>>;
}
