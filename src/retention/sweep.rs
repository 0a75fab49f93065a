use super::policy::RetentionPolicy;
use crate::error::StorageError;
use crate::history::{HistoryQuery, HistoryStore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub age_deleted: u64,
    pub count_deleted: u64,
}

impl SweepReport {
    pub fn total(self) -> u64 {
        self.age_deleted + self.count_deleted
    }
}

/// Delete every record older than the age cap.
pub async fn age_sweep(
    store: &dyn HistoryStore,
    policy: &RetentionPolicy,
    now_ms: i64,
) -> Result<u64, StorageError> {
    let Some(cutoff) = policy.age_cutoff(now_ms) else {
        return Ok(0);
    };
    store.delete_older_than(cutoff).await
}

/// Trim every `(user, channel)` pair down to the count cap.
pub async fn count_sweep(
    store: &dyn HistoryStore,
    policy: &RetentionPolicy,
) -> Result<u64, StorageError> {
    let Some(keep) = policy.count_cap() else {
        return Ok(0);
    };

    let mut deleted = 0;
    for pair in store.distinct_pairs().await? {
        deleted += trim_pair(store, &pair.user_id, &pair.channel_id, keep).await?;
    }
    Ok(deleted)
}

/// Keep the `keep` newest records of one pair and delete the rest.
pub async fn trim_pair(
    store: &dyn HistoryStore,
    user_id: &str,
    channel_id: &str,
    keep: usize,
) -> Result<u64, StorageError> {
    let query = HistoryQuery::channel(channel_id).with_user(user_id);
    let records = store.query(&query).await?;
    if records.len() <= keep {
        return Ok(0);
    }

    let stale: Vec<String> = records
        .into_iter()
        .skip(keep)
        .map(|record| record.message_id)
        .collect();
    store.delete_by_ids(&stale).await
}

/// Run the age and count sweeps concurrently.
///
/// Never fails: a sweep that errors is logged and contributes zero, and the
/// next scheduled run tries again.
pub async fn run_sweep(
    store: &dyn HistoryStore,
    policy: &RetentionPolicy,
    now_ms: i64,
) -> SweepReport {
    let (age, count) = tokio::join!(
        age_sweep(store, policy, now_ms),
        count_sweep(store, policy)
    );

    let report = SweepReport {
        age_deleted: age.unwrap_or_else(|error| {
            tracing::warn!(store = store.name(), error = %error, "age sweep failed");
            0
        }),
        count_deleted: count.unwrap_or_else(|error| {
            tracing::warn!(store = store.name(), error = %error, "count sweep failed");
            0
        }),
    };

    if report.total() > 0 {
        tracing::info!(
            "message history eviction complete: age_deleted={} count_deleted={} total={}",
            report.age_deleted,
            report.count_deleted,
            report.total(),
        );
    }

    report
}
