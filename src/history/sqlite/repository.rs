use crate::error::StorageError;
use crate::history::types::{HistoryQuery, MessageRecord, UserChannelPair};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

/// Keeps `IN (...)` lists well below SQLite's bind-parameter limit.
const DELETE_CHUNK: usize = 500;

pub(super) async fn insert(pool: &SqlitePool, record: &MessageRecord) -> Result<(), StorageError> {
    sqlx::query(
        "INSERT OR REPLACE INTO message_history (message_id, user_id, channel_id, timestamp)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&record.message_id)
    .bind(&record.user_id)
    .bind(&record.channel_id)
    .bind(record.timestamp)
    .execute(pool)
    .await?;
    Ok(())
}

pub(super) async fn select(
    pool: &SqlitePool,
    query: &HistoryQuery,
) -> Result<Vec<MessageRecord>, StorageError> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit = query
        .effective_limit()
        .map_or(-1, |limit| i64::try_from(limit).unwrap_or(i64::MAX));

    let rows = match &query.user_id {
        Some(user_id) => {
            sqlx::query(
                "SELECT message_id, user_id, channel_id, timestamp
                 FROM message_history
                 WHERE channel_id = ? AND user_id = ?
                 ORDER BY timestamp DESC, message_id DESC
                 LIMIT ?",
            )
            .bind(&query.channel_id)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                "SELECT message_id, user_id, channel_id, timestamp
                 FROM message_history
                 WHERE channel_id = ?
                 ORDER BY timestamp DESC, message_id DESC
                 LIMIT ?",
            )
            .bind(&query.channel_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(row_to_record).collect()
}

pub(super) async fn delete_ids(pool: &SqlitePool, ids: &[String]) -> Result<u64, StorageError> {
    let mut deleted = 0;
    for chunk in ids.chunks(DELETE_CHUNK) {
        let mut builder =
            QueryBuilder::<Sqlite>::new("DELETE FROM message_history WHERE message_id IN (");
        let mut separated = builder.separated(", ");
        for id in chunk {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        let result = builder.build().execute(pool).await?;
        deleted += result.rows_affected();
    }
    Ok(deleted)
}

pub(super) async fn delete_before(pool: &SqlitePool, cutoff_ms: i64) -> Result<u64, StorageError> {
    let result = sqlx::query("DELETE FROM message_history WHERE timestamp < ?")
        .bind(cutoff_ms)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub(super) async fn delete_all(pool: &SqlitePool) -> Result<u64, StorageError> {
    let result = sqlx::query("DELETE FROM message_history")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub(super) async fn distinct_pairs(pool: &SqlitePool) -> Result<Vec<UserChannelPair>, StorageError> {
    let rows = sqlx::query(
        "SELECT user_id, channel_id
         FROM message_history
         GROUP BY user_id, channel_id
         ORDER BY channel_id, user_id",
    )
    .fetch_all(pool)
    .await?;

    let mut pairs = Vec::with_capacity(rows.len());
    for row in rows {
        pairs.push(UserChannelPair {
            user_id: row.try_get("user_id")?,
            channel_id: row.try_get("channel_id")?,
        });
    }
    Ok(pairs)
}

pub(super) async fn count(pool: &SqlitePool) -> Result<u64, StorageError> {
    let row = sqlx::query("SELECT COUNT(*) FROM message_history")
        .fetch_one(pool)
        .await?;
    let count: i64 = row.try_get(0)?;
    Ok(u64::try_from(count).unwrap_or(0))
}

fn row_to_record(row: &SqliteRow) -> Result<MessageRecord, StorageError> {
    Ok(MessageRecord {
        message_id: row.try_get("message_id")?,
        user_id: row.try_get("user_id")?,
        channel_id: row.try_get("channel_id")?,
        timestamp: row.try_get("timestamp")?,
    })
}
