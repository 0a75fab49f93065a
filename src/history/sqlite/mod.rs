mod repository;
mod schema;

use super::traits::{HistoryStore, StoreFuture};
use super::types::{HistoryQuery, MessageRecord, UserChannelPair};
use crate::error::StorageError;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::{Path, PathBuf};

/// SQLite-backed message history.
///
/// One row per observed message; indexed for newest-first lookups per
/// `(channel, user)` and for timestamp range deletes.
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Open (or create) the database at `<workspace_dir>/history/messages.db`.
    pub async fn open(workspace_dir: &Path) -> Result<Self, StorageError> {
        let db_path = Self::db_path(workspace_dir);
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await?;

        schema::init_schema(&pool).await?;
        tracing::debug!(path = %db_path.display(), "message history store opened");
        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// The pool is pinned to a single connection that never expires, otherwise
    /// each new connection would see its own empty database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        schema::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn db_path(workspace_dir: &Path) -> PathBuf {
        workspace_dir.join("history").join("messages.db")
    }

    /// Close the pool; later calls fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn record<'a>(&'a self, record: &'a MessageRecord) -> StoreFuture<'a, ()> {
        Box::pin(repository::insert(&self.pool, record))
    }

    fn query<'a>(&'a self, query: &'a HistoryQuery) -> StoreFuture<'a, Vec<MessageRecord>> {
        Box::pin(repository::select(&self.pool, query))
    }

    fn delete_by_ids<'a>(&'a self, ids: &'a [String]) -> StoreFuture<'a, u64> {
        Box::pin(repository::delete_ids(&self.pool, ids))
    }

    fn delete_older_than(&self, cutoff_ms: i64) -> StoreFuture<'_, u64> {
        Box::pin(repository::delete_before(&self.pool, cutoff_ms))
    }

    fn delete_all(&self) -> StoreFuture<'_, u64> {
        Box::pin(repository::delete_all(&self.pool))
    }

    fn distinct_pairs(&self) -> StoreFuture<'_, Vec<UserChannelPair>> {
        Box::pin(repository::distinct_pairs(&self.pool))
    }

    fn count(&self) -> StoreFuture<'_, u64> {
        Box::pin(repository::count(&self.pool))
    }
}
