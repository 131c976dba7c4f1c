//! PDQ repository implementation.
//!
//! Implements the repository traits from `hma_core::storage` on top of any
//! [`Store`]. Each access pattern is a single store call against the index
//! that serves it:
//!
//! | Pattern | Index | Partition | Sort condition |
//! |---|---|---|---|
//! | hash by content | table | `c#<content_id>` | `= type#pdq` (get item) |
//! | matches by content | table | `c#<content_id>` | `begins_with s#` |
//! | matches by signal | GSI-1 | `s#<source>#<id>` | none |
//! | hashes by hash value | GSI-1 | `h#pdq#<hash>` | none |
//! | matches by time | GSI-2 | `type#pdq_match` | `UpdatedAt` range |
//! | hashes by time | GSI-2 | `type#pdq_hash` | `UpdatedAt` range |
//!
//! A single item that fails to decode fails the whole call.

use async_trait::async_trait;
use hma_core::pdq::{HashRecord, HashType, MatchRecord, StoredRecord};
use hma_core::storage::{
    DecodeError, HashRepository, MatchRepository, RepositoryError, Result, TimeRange,
};
use tracing::{debug, warn};

use super::conversions::{hash_to_item, item_to_hash, item_to_match, item_to_record, match_to_item};
use super::keys;
use super::schema::Index;
use super::store::{Item, Query, SortCondition, Store};

/// Repository for PDQ hash and match records over a single table.
#[derive(Debug, Clone)]
pub struct PdqRepository<S> {
    store: S,
}

impl<S: Store> PdqRepository<S> {
    /// Creates a new repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gets every record stored for a content id: its hash and its matches.
    pub async fn get_records_by_content_id(&self, content_id: &str) -> Result<Vec<StoredRecord>> {
        let items = self
            .store
            .query(Query::table(keys::content_pk(content_id)))
            .await?;

        debug!(
            content_id = %content_id,
            count = items.len(),
            "Queried content partition"
        );
        decode_all(&items, item_to_record)
    }

    async fn query_by_time(&self, bucket: String, range: TimeRange) -> Result<Vec<Item>> {
        let mut query = Query::index(Index::Gsi2, bucket);
        if let Some(condition) = time_condition(&range) {
            query = query.with_sort(condition);
        }
        Ok(self.store.query(query).await?)
    }
}

/// Translate a time range into a condition on the `UpdatedAt` sort key.
fn time_condition(range: &TimeRange) -> Option<SortCondition> {
    let start = range.start().map(keys::timestamp_bound);
    let end = range.end().map(keys::timestamp_bound);

    match (start, end) {
        (Some(start), Some(end)) => Some(SortCondition::Between(start, end)),
        (Some(start), None) => Some(SortCondition::GreaterOrEqual(start)),
        (None, Some(end)) => Some(SortCondition::LessOrEqual(end)),
        (None, None) => None,
    }
}

/// Decode every item, failing on the first malformed one.
fn decode_all<T>(
    items: &[Item],
    decode: fn(&Item) -> std::result::Result<T, DecodeError>,
) -> Result<Vec<T>> {
    items
        .iter()
        .map(|item| {
            decode(item).map_err(|e| {
                warn!(error = %e, "Failed to decode stored item");
                RepositoryError::from(e)
            })
        })
        .collect()
}

// ============================================================================
// HashRepository implementation
// ============================================================================

#[async_trait]
impl<S: Store> HashRepository for PdqRepository<S> {
    async fn put_hash(&self, record: &HashRecord) -> Result<()> {
        self.store.put_item(hash_to_item(record)?).await?;

        debug!(content_id = %record.content_id, "Stored hash record");
        Ok(())
    }

    async fn get_hash_by_content_id(&self, content_id: &str) -> Result<Option<HashRecord>> {
        let pk = keys::content_pk(content_id);
        let sk = keys::hash_sk(HashType::Pdq);
        let item = self.store.get_item(&pk, &sk).await?;

        match item {
            Some(item) => Ok(Some(item_to_hash(&item)?)),
            None => Ok(None),
        }
    }

    async fn require_hash_by_content_id(&self, content_id: &str) -> Result<HashRecord> {
        self.get_hash_by_content_id(content_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "HashRecord",
                id: content_id.to_string(),
            })
    }

    async fn get_hashes_by_content_hash(&self, content_hash: &str) -> Result<Vec<HashRecord>> {
        let query = Query::index(Index::Gsi1, keys::hash_gsi1_pk(HashType::Pdq, content_hash));
        let items = self.store.query(query).await?;

        debug!(count = items.len(), "Queried hashes by content hash");
        decode_all(&items, item_to_hash)
    }

    async fn get_hashes_by_time_range(&self, range: TimeRange) -> Result<Vec<HashRecord>> {
        let items = self.query_by_time(keys::hash_gsi2_pk(), range).await?;

        debug!(count = items.len(), "Queried hashes by time range");
        decode_all(&items, item_to_hash)
    }
}

// ============================================================================
// MatchRepository implementation
// ============================================================================

#[async_trait]
impl<S: Store> MatchRepository for PdqRepository<S> {
    async fn put_match(&self, record: &MatchRecord) -> Result<()> {
        self.store.put_item(match_to_item(record)?).await?;

        debug!(
            content_id = %record.content_id,
            signal_source = %record.signal_source,
            signal_id = %record.signal_id,
            "Stored match record"
        );
        Ok(())
    }

    async fn get_matches_by_content_id(&self, content_id: &str) -> Result<Vec<MatchRecord>> {
        let prefix = keys::match_sk_prefix().to_string();
        let query = Query::table(keys::content_pk(content_id))
            .with_sort(SortCondition::BeginsWith(prefix));
        let items = self.store.query(query).await?;

        debug!(
            content_id = %content_id,
            count = items.len(),
            "Queried matches by content"
        );
        decode_all(&items, item_to_match)
    }

    async fn get_matches_by_signal(
        &self,
        signal_id: &str,
        signal_source: &str,
    ) -> Result<Vec<MatchRecord>> {
        let query = Query::index(Index::Gsi1, keys::signal_gsi1_pk(signal_id, signal_source));
        let items = self.store.query(query).await?;

        debug!(
            signal_source = %signal_source,
            signal_id = %signal_id,
            count = items.len(),
            "Queried matches by signal"
        );
        decode_all(&items, item_to_match)
    }

    async fn get_matches_by_time_range(&self, range: TimeRange) -> Result<Vec<MatchRecord>> {
        let items = self.query_by_time(keys::match_gsi2_pk(), range).await?;

        debug!(count = items.len(), "Queried matches by time range");
        decode_all(&items, item_to_match)
    }

    async fn get_recent_matches(&self, limit: usize) -> Result<Vec<MatchRecord>> {
        let query = Query::index(Index::Gsi2, keys::match_gsi2_pk())
            .newest_first()
            .with_limit(limit);
        let items = self.store.query(query).await?;

        debug!(limit, count = items.len(), "Queried recent matches");
        decode_all(&items, item_to_match)
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::storage::inmemory::InMemoryStore;
    use aws_sdk_dynamodb::types::AttributeValue;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use hma_core::storage::EncodeError;

    const TEST_CONTENT_ID: &str = "image/test_photo.jpg";
    const TEST_SIGNAL_ID: &str = "5555555555555555";
    const TEST_SIGNAL_SOURCE: &str = "test_source";

    /// Per-test fixture owning a fresh store.
    struct TestContext {
        store: InMemoryStore,
        repo: PdqRepository<InMemoryStore>,
    }

    impl TestContext {
        fn new() -> Self {
            let store = InMemoryStore::new();
            Self {
                repo: PdqRepository::new(store.clone()),
                store,
            }
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn pdq_hash() -> String {
        "f0".repeat(32)
    }

    fn signal_hash() -> String {
        format!("{}f1", "f0".repeat(31))
    }

    fn example_hash_record() -> HashRecord {
        HashRecord::new(TEST_CONTENT_ID, pdq_hash(), Utc::now(), 100)
    }

    fn example_match_record() -> MatchRecord {
        MatchRecord::new(
            TEST_CONTENT_ID,
            pdq_hash(),
            Utc::now(),
            TEST_SIGNAL_ID,
            TEST_SIGNAL_SOURCE,
            signal_hash(),
        )
    }

    fn hash_at(content_id: &str, content_hash: String, updated_at: &str) -> HashRecord {
        HashRecord::new(content_id, content_hash, at(updated_at), 90)
    }

    fn match_at(content_id: &str, matched_at: DateTime<Utc>) -> MatchRecord {
        MatchRecord::new(
            content_id,
            pdq_hash(),
            matched_at,
            TEST_SIGNAL_ID,
            TEST_SIGNAL_SOURCE,
            signal_hash(),
        )
    }

    fn content_ids(records: &[MatchRecord]) -> Vec<&str> {
        records.iter().map(|r| r.content_id.as_str()).collect()
    }

    // ==================== Hash record tests ====================

    #[tokio::test]
    async fn test_write_hash_record() {
        let ctx = TestContext::new();
        let record = example_hash_record();

        ctx.repo.put_hash(&record).await.unwrap();

        let item = ctx
            .store
            .get_item("c#image/test_photo.jpg", "type#pdq")
            .await
            .unwrap()
            .unwrap();
        let content_hash = item.get("ContentHash").unwrap().as_s().unwrap();
        assert_eq!(content_hash, &record.content_hash);
    }

    #[tokio::test]
    async fn test_query_hash_record() {
        let ctx = TestContext::new();
        let record = example_hash_record();

        ctx.repo.put_hash(&record).await.unwrap();

        let queried = ctx
            .repo
            .get_hash_by_content_id(TEST_CONTENT_ID)
            .await
            .unwrap();
        assert_eq!(queried, Some(record));
    }

    #[tokio::test]
    async fn test_hash_get_nonexistent() {
        let ctx = TestContext::new();

        let result = ctx.repo.get_hash_by_content_id("missing").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_require_hash_not_found() {
        let ctx = TestContext::new();

        let result = ctx.repo.require_hash_by_content_id("missing").await;

        assert_eq!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "HashRecord",
                id: "missing".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_require_hash_found() {
        let ctx = TestContext::new();
        let record = example_hash_record();
        ctx.repo.put_hash(&record).await.unwrap();

        let found = ctx.repo.require_hash_by_content_id(TEST_CONTENT_ID).await;

        assert_eq!(found, Ok(record));
    }

    #[tokio::test]
    async fn test_hash_overwrite_replaces_previous() {
        let ctx = TestContext::new();
        let first = hash_at(TEST_CONTENT_ID, pdq_hash(), "2024-01-01T00:00:00Z");
        let second = hash_at(TEST_CONTENT_ID, "0f".repeat(32), "2024-01-02T00:00:00Z");

        ctx.repo.put_hash(&first).await.unwrap();
        ctx.repo.put_hash(&second).await.unwrap();

        assert_eq!(ctx.store.len().await, 1);
        let stored = ctx.repo.get_hash_by_content_id(TEST_CONTENT_ID).await;
        assert_eq!(stored, Ok(Some(second)));
        // The old hash must no longer be reachable through GSI-1 either.
        let by_old_hash = ctx.repo.get_hashes_by_content_hash(&pdq_hash()).await;
        assert_eq!(by_old_hash, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_get_hashes_by_content_hash() {
        let ctx = TestContext::new();
        let a = hash_at("image/a.jpg", pdq_hash(), "2024-01-01T00:00:00Z");
        let b = hash_at("image/b.jpg", pdq_hash(), "2024-01-02T00:00:00Z");
        let other = hash_at("image/c.jpg", "0f".repeat(32), "2024-01-03T00:00:00Z");
        for record in [&a, &b, &other] {
            ctx.repo.put_hash(record).await.unwrap();
        }

        let result = ctx.repo.get_hashes_by_content_hash(&pdq_hash()).await;

        assert_eq!(result, Ok(vec![a, b]));
    }

    #[tokio::test]
    async fn test_get_hashes_by_time_range() {
        let ctx = TestContext::new();
        let early = hash_at("image/a.jpg", pdq_hash(), "2024-01-01T00:00:00Z");
        let late = hash_at("image/b.jpg", pdq_hash(), "2024-02-01T00:00:00Z");
        ctx.repo.put_hash(&late).await.unwrap();
        ctx.repo.put_hash(&early).await.unwrap();
        ctx.repo.put_match(&example_match_record()).await.unwrap();

        let all = ctx.repo.get_hashes_by_time_range(TimeRange::all()).await;
        assert_eq!(all, Ok(vec![early.clone(), late.clone()]));

        let january = TimeRange::new(
            Some(at("2024-01-01T00:00:00Z")),
            Some(at("2024-01-31T23:59:59Z")),
        )
        .unwrap();
        let in_january = ctx.repo.get_hashes_by_time_range(january).await;
        assert_eq!(in_january, Ok(vec![early]));
    }

    #[tokio::test]
    async fn test_put_hash_rejects_unencodable_timestamp() {
        let ctx = TestContext::new();
        let mut record = example_hash_record();
        record.updated_at = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();

        let result = ctx.repo.put_hash(&record).await;

        assert_eq!(
            result,
            Err(RepositoryError::Encode(EncodeError::TimestampOutOfRange {
                field: "UpdatedAt",
                value: record.updated_at.to_rfc3339(),
            }))
        );
        assert!(ctx.store.is_empty().await);
    }

    // ==================== Match record tests ====================

    #[tokio::test]
    async fn test_write_match_record() {
        let ctx = TestContext::new();
        let record = example_match_record();

        ctx.repo.put_match(&record).await.unwrap();

        let item = ctx
            .store
            .get_item("c#image/test_photo.jpg", "s#test_source#5555555555555555")
            .await
            .unwrap()
            .unwrap();
        let signal_hash = item.get("SignalHash").unwrap().as_s().unwrap();
        assert_eq!(signal_hash, &record.signal_hash);
    }

    #[tokio::test]
    async fn test_query_match_record_by_content_id() {
        let ctx = TestContext::new();
        let record = example_match_record();

        ctx.repo.put_match(&record).await.unwrap();

        let result = ctx.repo.get_matches_by_content_id(TEST_CONTENT_ID).await;
        assert_eq!(result, Ok(vec![record]));
    }

    #[tokio::test]
    async fn test_matches_by_content_id_exclude_hash_row() {
        let ctx = TestContext::new();
        ctx.repo.put_hash(&example_hash_record()).await.unwrap();
        ctx.repo.put_match(&example_match_record()).await.unwrap();

        let result = ctx
            .repo
            .get_matches_by_content_id(TEST_CONTENT_ID)
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].signal_id, TEST_SIGNAL_ID);
    }

    #[tokio::test]
    async fn test_query_match_record_by_signal_id() {
        let ctx = TestContext::new();
        let record = example_match_record();

        ctx.repo.put_match(&record).await.unwrap();

        let result = ctx
            .repo
            .get_matches_by_signal(TEST_SIGNAL_ID, TEST_SIGNAL_SOURCE)
            .await
            .unwrap();
        assert_eq!(result, vec![record]);
    }

    #[tokio::test]
    async fn test_query_by_signal_with_other_source_is_empty() {
        let ctx = TestContext::new();
        ctx.repo.put_match(&example_match_record()).await.unwrap();

        let result = ctx
            .repo
            .get_matches_by_signal(TEST_SIGNAL_ID, "other_source")
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_query_by_signal_returns_every_content() {
        let ctx = TestContext::new();
        let a = match_at("image/a.jpg", at("2024-01-02T00:00:00Z"));
        let b = match_at("image/b.jpg", at("2024-01-01T00:00:00Z"));
        ctx.repo.put_match(&a).await.unwrap();
        ctx.repo.put_match(&b).await.unwrap();

        let result = ctx
            .repo
            .get_matches_by_signal(TEST_SIGNAL_ID, TEST_SIGNAL_SOURCE)
            .await
            .unwrap();

        // GSI-1 sorts by record type then content id.
        assert_eq!(content_ids(&result), vec!["image/a.jpg", "image/b.jpg"]);
    }

    #[tokio::test]
    async fn test_query_match_record_by_time() {
        let ctx = TestContext::new();
        let record = example_match_record();

        ctx.repo.put_match(&record).await.unwrap();

        let result = ctx.repo.get_matches_by_time_range(TimeRange::all()).await;
        assert_eq!(result, Ok(vec![record]));
    }

    #[tokio::test]
    async fn test_time_range_orders_and_bounds() {
        let ctx = TestContext::new();
        let base = at("2024-06-15T12:00:00Z");
        let earlier = match_at("image/earlier.jpg", base - Duration::hours(1));
        let middle = match_at("image/middle.jpg", base);
        let later = match_at("image/later.jpg", base + Duration::milliseconds(1));
        for record in [&later, &earlier, &middle] {
            ctx.repo.put_match(record).await.unwrap();
        }

        let all = ctx
            .repo
            .get_matches_by_time_range(TimeRange::all())
            .await
            .unwrap();
        assert_eq!(
            content_ids(&all),
            vec!["image/earlier.jpg", "image/middle.jpg", "image/later.jpg"]
        );

        let since = ctx
            .repo
            .get_matches_by_time_range(TimeRange::since(base))
            .await
            .unwrap();
        assert_eq!(
            content_ids(&since),
            vec!["image/middle.jpg", "image/later.jpg"]
        );

        let until = ctx
            .repo
            .get_matches_by_time_range(TimeRange::until(base))
            .await
            .unwrap();
        assert_eq!(
            content_ids(&until),
            vec!["image/earlier.jpg", "image/middle.jpg"]
        );

        let exact = TimeRange::new(Some(base), Some(base)).unwrap();
        let exact = ctx.repo.get_matches_by_time_range(exact).await.unwrap();
        assert_eq!(exact, vec![middle]);
    }

    #[tokio::test]
    async fn test_time_range_bounds_beyond_encodable_years() {
        let ctx = TestContext::new();
        let record = match_at(TEST_CONTENT_ID, at("2024-06-15T12:00:00Z"));
        ctx.repo.put_match(&record).await.unwrap();
        let ancient = Utc.with_ymd_and_hms(-100, 1, 1, 0, 0, 0).unwrap();
        let far_future = Utc.with_ymd_and_hms(12000, 1, 1, 0, 0, 0).unwrap();

        let wide = TimeRange::new(Some(ancient), Some(far_future)).unwrap();
        let within = ctx.repo.get_matches_by_time_range(wide).await;
        assert_eq!(within, Ok(vec![record]));

        let after = TimeRange::since(far_future);
        let beyond = ctx.repo.get_matches_by_time_range(after).await;
        assert_eq!(beyond, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_get_recent_matches() {
        let ctx = TestContext::new();
        let base = at("2024-06-15T12:00:00Z");
        let content = ["image/a.jpg", "image/b.jpg", "image/c.jpg"];
        for (i, content_id) in content.iter().enumerate() {
            let record = match_at(content_id, base + Duration::minutes(i as i64));
            ctx.repo.put_match(&record).await.unwrap();
        }

        let recent = ctx.repo.get_recent_matches(2).await.unwrap();

        assert_eq!(content_ids(&recent), vec!["image/c.jpg", "image/b.jpg"]);
        assert_eq!(ctx.repo.get_recent_matches(0).await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_rematch_overwrites() {
        let ctx = TestContext::new();
        let first = match_at(TEST_CONTENT_ID, at("2024-01-01T00:00:00Z"));
        let mut second = match_at(TEST_CONTENT_ID, at("2024-01-05T00:00:00Z"));
        second.signal_hash = "0f".repeat(32);

        ctx.repo.put_match(&first).await.unwrap();
        ctx.repo.put_match(&second).await.unwrap();

        assert_eq!(ctx.store.len().await, 1);
        let by_time = ctx.repo.get_matches_by_time_range(TimeRange::all()).await;
        assert_eq!(by_time, Ok(vec![second]));
    }

    #[tokio::test]
    async fn test_signal_ids_with_delimiters_do_not_collide() {
        let ctx = TestContext::new();
        let mut a = example_match_record();
        a.signal_source = "bank#1".to_string();
        a.signal_id = "2".to_string();
        let mut b = example_match_record();
        b.signal_source = "bank".to_string();
        b.signal_id = "1#2".to_string();

        ctx.repo.put_match(&a).await.unwrap();
        ctx.repo.put_match(&b).await.unwrap();

        assert_eq!(ctx.store.len().await, 2);
        assert_eq!(
            ctx.repo.get_matches_by_signal("2", "bank#1").await,
            Ok(vec![a])
        );
        assert_eq!(
            ctx.repo.get_matches_by_signal("1#2", "bank").await,
            Ok(vec![b])
        );
    }

    // ==================== Content partition tests ====================

    #[tokio::test]
    async fn test_get_records_by_content_id() {
        let ctx = TestContext::new();
        let hash = example_hash_record();
        let matched = example_match_record();
        ctx.repo.put_hash(&hash).await.unwrap();
        ctx.repo.put_match(&matched).await.unwrap();

        let records = ctx.repo.get_records_by_content_id(TEST_CONTENT_ID).await;

        // `s#` sorts before `type#` in the content partition.
        assert_eq!(
            records,
            Ok(vec![StoredRecord::Match(matched), StoredRecord::Hash(hash)])
        );
    }

    #[tokio::test]
    async fn test_malformed_item_fails_whole_call() {
        let ctx = TestContext::new();
        ctx.repo.put_match(&example_match_record()).await.unwrap();

        let broken = match_at("image/broken.jpg", at("2024-01-01T00:00:00Z"));
        let mut item = match_to_item(&broken).unwrap();
        let not_a_time = AttributeValue::S("not-a-time".to_string());
        item.insert("UpdatedAt".to_string(), not_a_time);
        ctx.store.put_item(item).await.unwrap();

        let err = ctx
            .repo
            .get_matches_by_signal(TEST_SIGNAL_ID, TEST_SIGNAL_SOURCE)
            .await
            .unwrap_err();

        let RepositoryError::Decode(DecodeError::InvalidField { field, .. }) = err else {
            panic!("expected a decode error, got {err:?}");
        };
        assert_eq!(field, "UpdatedAt");
    }

    // ==================== Scenario ====================

    #[tokio::test]
    async fn test_hash_and_match_scenario() {
        let ctx = TestContext::new();
        let hash = HashRecord::new(TEST_CONTENT_ID, pdq_hash(), Utc::now(), 100);
        let matched = example_match_record();

        ctx.repo.put_hash(&hash).await.unwrap();
        ctx.repo.put_match(&matched).await.unwrap();

        let stored = ctx
            .repo
            .require_hash_by_content_id(TEST_CONTENT_ID)
            .await
            .unwrap();
        assert_eq!(stored.content_hash, pdq_hash());
        assert_eq!(stored.quality, 100);
        assert_eq!(stored.updated_at, hash.updated_at);

        let by_signal = ctx
            .repo
            .get_matches_by_signal(TEST_SIGNAL_ID, TEST_SIGNAL_SOURCE)
            .await
            .unwrap();
        assert_eq!(by_signal, vec![matched.clone()]);

        let by_time = ctx
            .repo
            .get_matches_by_time_range(TimeRange::all())
            .await
            .unwrap();
        assert!(by_time.contains(&matched));
    }

    #[test]
    fn test_time_condition() {
        let start = at("2024-01-01T00:00:00Z");
        let end = at("2024-01-02T00:00:00Z");
        let start_key = "2024-01-01T00:00:00.000000000Z".to_string();
        let end_key = "2024-01-02T00:00:00.000000000Z".to_string();

        assert_eq!(time_condition(&TimeRange::all()), None);
        assert_eq!(
            time_condition(&TimeRange::since(start)),
            Some(SortCondition::GreaterOrEqual(start_key.clone()))
        );
        assert_eq!(
            time_condition(&TimeRange::until(end)),
            Some(SortCondition::LessOrEqual(end_key.clone()))
        );
        assert_eq!(
            time_condition(&TimeRange::new(Some(start), Some(end)).unwrap()),
            Some(SortCondition::Between(start_key, end_key))
        );
    }

    #[test]
    fn test_time_condition_clamps_out_of_range_bounds() {
        let far_future = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();

        let max = keys::MAX_TIMESTAMP_KEY.to_string();

        let condition = time_condition(&TimeRange::until(far_future));

        assert_eq!(condition, Some(SortCondition::LessOrEqual(max)));
    }
}
