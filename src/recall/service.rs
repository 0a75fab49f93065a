use super::executor::{RecallExecutor, RecallOutcome};
use super::registry::TaskRegistry;
use super::task::RecallTask;
use crate::channels::Channel;
use crate::error::RecallError;
use crate::history::{HistoryQuery, HistoryStore};
use serde::Serialize;
use std::slice;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;

/// What to recall in one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecallRequest {
    pub channel_id: String,
    pub user_id: Option<String>,
    /// How many of the newest stored messages to recall (at least 1).
    pub number: usize,
    /// Explicitly quoted messages; when present the store is not consulted.
    pub quoted: Vec<String>,
}

impl RecallRequest {
    pub fn latest(channel_id: impl Into<String>, number: usize) -> Self {
        Self {
            channel_id: channel_id.into(),
            user_id: None,
            number,
            quoted: Vec::new(),
        }
    }

    pub fn quoted(channel_id: impl Into<String>, message_ids: Vec<String>) -> Self {
        Self {
            quoted: message_ids,
            ..Self::latest(channel_id, 1)
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecallReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
}

impl RecallReport {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Chat reply for the finished task; `None` when every attempt succeeded.
    pub fn summary(&self) -> Option<String> {
        (self.failed > 0).then(|| {
            format!(
                "done: {} succeeded, {} failed",
                self.succeeded, self.failed
            )
        })
    }
}

/// Runs paced, cancellable batch recalls and tracks them per channel.
pub struct RecallService {
    executor: RecallExecutor,
    store: Option<Arc<dyn HistoryStore>>,
    registry: Arc<TaskRegistry>,
    pacing: Duration,
}

impl RecallService {
    pub fn new(
        channel: Arc<dyn Channel>,
        store: Option<Arc<dyn HistoryStore>>,
        pacing: Duration,
    ) -> Self {
        Self {
            executor: RecallExecutor::new(channel, store.clone()),
            store,
            registry: Arc::new(TaskRegistry::new()),
            pacing,
        }
    }

    pub fn registry(&self) -> &Arc<TaskRegistry> {
        &self.registry
    }

    /// Resolve candidates, then delete them one at a time.
    ///
    /// The task is visible in the registry from just before the first delete
    /// until this future completes or is dropped.
    pub async fn recall(&self, request: &RecallRequest) -> Result<RecallReport, RecallError> {
        let candidates = self.candidates(request).await?;
        if candidates.is_empty() {
            return Err(RecallError::NoCandidates);
        }

        let guard = self.registry.register(
            &request.channel_id,
            Arc::new(RecallTask::new(candidates.len())),
        );
        let task = guard.task();
        tracing::info!(
            channel_id = %request.channel_id,
            total = candidates.len(),
            "recall task started"
        );

        let mut outcome = RecallOutcome::default();
        let mut cancelled = false;
        for (index, message_id) in candidates.iter().enumerate() {
            if index > 0 {
                time::sleep(self.pacing).await;
            }
            if task.is_cancelled() {
                cancelled = true;
                break;
            }

            let step = self
                .executor
                .recall(&request.channel_id, slice::from_ref(message_id))
                .await;
            task.record(step);
            outcome += step;
        }
        drop(guard);

        let report = RecallReport {
            total: candidates.len(),
            succeeded: outcome.succeeded,
            failed: outcome.failed,
            cancelled,
        };
        tracing::info!(
            channel_id = %request.channel_id,
            succeeded = report.succeeded,
            failed = report.failed,
            cancelled = report.cancelled,
            "recall task finished"
        );
        Ok(report)
    }

    /// Cancel every task in the channel; returns how many were signalled.
    pub fn stop(&self, channel_id: &str) -> usize {
        let stopped = self.registry.stop(channel_id);
        if stopped > 0 {
            tracing::info!(channel_id, stopped, "recall tasks stopped");
        }
        stopped
    }

    async fn candidates(&self, request: &RecallRequest) -> Result<Vec<String>, RecallError> {
        if !request.quoted.is_empty() {
            return Ok(request.quoted.clone());
        }

        let Some(store) = &self.store else {
            return Err(RecallError::NoSource);
        };

        let query = HistoryQuery {
            channel_id: request.channel_id.clone(),
            user_id: request.user_id.clone(),
            limit: Some(request.number.max(1)),
        };
        let records = store.query(&query).await.map_err(|error| {
            tracing::warn!(
                channel_id = %request.channel_id,
                error = %error,
                "recall candidate lookup failed"
            );
            RecallError::Storage(error)
        })?;

        Ok(records.into_iter().map(|record| record.message_id).collect())
    }
}
