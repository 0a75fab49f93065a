use crate::error::StorageError;
use sqlx::SqlitePool;

pub(super) async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS message_history (
            message_id TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL,
            channel_id TEXT NOT NULL,
            timestamp  INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_message_history_pair
            ON message_history(channel_id, user_id, timestamp DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_message_history_timestamp
            ON message_history(timestamp)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
