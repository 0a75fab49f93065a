use crate::channels::Channel;
use crate::history::HistoryStore;
use futures_util::future::join_all;
use serde::Serialize;
use std::ops::AddAssign;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecallOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

impl RecallOutcome {
    pub fn attempted(self) -> usize {
        self.succeeded + self.failed
    }
}

impl AddAssign for RecallOutcome {
    fn add_assign(&mut self, other: Self) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

/// Deletes messages on the platform and drops their history rows.
pub struct RecallExecutor {
    channel: Arc<dyn Channel>,
    store: Option<Arc<dyn HistoryStore>>,
}

impl RecallExecutor {
    pub fn new(channel: Arc<dyn Channel>, store: Option<Arc<dyn HistoryStore>>) -> Self {
        Self { channel, store }
    }

    /// Attempt every id; one failure never stops the others.
    ///
    /// `succeeded + failed` always equals `message_ids.len()`.
    pub async fn recall(&self, channel_id: &str, message_ids: &[String]) -> RecallOutcome {
        let results = join_all(
            message_ids
                .iter()
                .map(|message_id| self.recall_one(channel_id, message_id)),
        )
        .await;

        let succeeded = results.iter().filter(|deleted| **deleted).count();
        RecallOutcome {
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    async fn recall_one(&self, channel_id: &str, message_id: &str) -> bool {
        if let Err(error) = self.channel.delete_message(channel_id, message_id).await {
            tracing::warn!(
                channel = self.channel.name(),
                channel_id,
                message_id,
                error = %error,
                "remote delete failed"
            );
            return false;
        }

        // Outcome is decided by the remote delete alone.
        if let Some(store) = &self.store {
            let ids = [message_id.to_string()];
            if let Err(error) = store.delete_by_ids(&ids).await {
                tracing::warn!(
                    store = store.name(),
                    message_id,
                    error = %error,
                    "failed to drop recalled message from history"
                );
            }
        }

        true
    }
}
