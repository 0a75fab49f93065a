use super::types::{HistoryQuery, MessageRecord, UserChannelPair};
use crate::error::StorageError;
use std::future::Future;
use std::pin::Pin;

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Persistence primitives the retention policy and recall tasks rely on.
///
/// Deletes are idempotent: removing an id that is already gone is not an error.
pub trait HistoryStore: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Persist one record. A duplicate `message_id` overwrites the old row.
    fn record<'a>(&'a self, record: &'a MessageRecord) -> StoreFuture<'a, ()>;

    /// Newest-first records, ordered by `timestamp DESC, message_id DESC`.
    fn query<'a>(&'a self, query: &'a HistoryQuery) -> StoreFuture<'a, Vec<MessageRecord>>;

    fn delete_by_ids<'a>(&'a self, ids: &'a [String]) -> StoreFuture<'a, u64>;

    /// Remove every record with `timestamp < cutoff_ms`.
    fn delete_older_than(&self, cutoff_ms: i64) -> StoreFuture<'_, u64>;

    /// Teardown only.
    fn delete_all(&self) -> StoreFuture<'_, u64>;

    /// Every `(user, channel)` pair with at least one record.
    fn distinct_pairs(&self) -> StoreFuture<'_, Vec<UserChannelPair>>;

    fn count(&self) -> StoreFuture<'_, u64>;
}
