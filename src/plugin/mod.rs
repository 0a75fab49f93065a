//! Host-facing lifecycle object tying the history store, the eviction loop
//! and the recall service together.
//!
//! The host forwards message events to [`HistoryPlugin::observe`], chat input
//! to [`HistoryPlugin::handle_command`], and calls `on_ready`/`dispose` at the
//! matching lifecycle points. Command handling for one invocation may run for
//! as long as the recall takes; hosts dispatch each message on its own task so
//! that `/recall stop` can arrive while a recall is running.


use crate::channels::{Channel, MessageEvent};
use crate::commands::{
    CommandContext, RecallCommand, USAGE, parse_command, render_recall, render_status,
    render_stop,
};
use crate::config::{Config, RetentionConfig};
use crate::error::StorageError;
use crate::history::{HistoryStore, MessageRecord, SqliteHistoryStore};
use crate::recall::{RecallRequest, RecallService};
use crate::retention::{
    RecordGate, RetentionPolicy, SweepHandle, SweepReport, run_sweep, spawn_eviction_loop,
    trim_pair,
};
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};

pub struct HistoryPlugin {
    retention: RetentionConfig,
    policy: RetentionPolicy,
    gate: RecordGate,
    store: Option<Arc<dyn HistoryStore>>,
    recall: RecallService,
    sweeper: Mutex<Option<SweepHandle>>,
}

impl HistoryPlugin {
    /// Open the on-disk store under the workspace when retention is enabled.
    pub async fn open(config: &Config, channel: Arc<dyn Channel>) -> Result<Self, StorageError> {
        let store: Option<Arc<dyn HistoryStore>> = if config.retention.is_enabled() {
            Some(Arc::new(
                SqliteHistoryStore::open(&config.workspace_dir).await?,
            ))
        } else {
            tracing::info!("message history disabled: no retention caps configured");
            None
        };
        Ok(Self::new(config, channel, store))
    }

    /// Build over an existing store. The store is ignored when retention is
    /// disabled.
    pub fn new(
        config: &Config,
        channel: Arc<dyn Channel>,
        store: Option<Arc<dyn HistoryStore>>,
    ) -> Self {
        let store = store.filter(|_| config.retention.is_enabled());
        Self {
            retention: config.retention.clone(),
            policy: RetentionPolicy::from(&config.retention),
            gate: RecordGate::from(&config.retention),
            recall: RecallService::new(channel, store.clone(), config.recall.pacing_delay()),
            store,
            sweeper: Mutex::new(None),
        }
    }

    pub fn listens_for_events(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&Arc<dyn HistoryStore>> {
        self.store.as_ref()
    }

    pub fn recall_service(&self) -> &RecallService {
        &self.recall
    }

    /// Start the eviction loop. Returns whether a loop is running afterwards.
    pub fn on_ready(&self) -> bool {
        let mut sweeper = self.sweeper.lock().unwrap_or_else(PoisonError::into_inner);
        if sweeper.is_some() {
            return true;
        }
        let Some(store) = &self.store else {
            return false;
        };

        *sweeper = spawn_eviction_loop(Arc::clone(store), self.policy);
        if sweeper.is_some() {
            tracing::info!(
                max_per_user = self.policy.max_per_user,
                max_age_hours = self.policy.max_age_hours,
                cleanup_interval_hours = self.policy.cleanup_interval_hours,
                "message history eviction started"
            );
        }
        sweeper.is_some()
    }

    /// Record an observed message, timestamped now.
    pub async fn observe(&self, event: &MessageEvent) -> bool {
        self.observe_at(event, Utc::now().timestamp_millis()).await
    }

    /// Record an observed message with an explicit timestamp. Storage errors
    /// are logged and reported as `false`.
    pub async fn observe_at(&self, event: &MessageEvent, timestamp: i64) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        if !self.gate.allows(event) {
            return false;
        }

        let record = MessageRecord::new(
            event.message_id.clone(),
            event.user_id.clone(),
            event.channel_id.clone(),
            timestamp,
        );
        if let Err(error) = store.record(&record).await {
            tracing::warn!(
                message_id = %event.message_id,
                channel = %event.channel_id,
                error = %error,
                "failed to record message"
            );
            return false;
        }

        if self.retention.trim_on_insert
            && let Some(keep) = self.policy.count_cap()
            && let Err(error) =
                trim_pair(store.as_ref(), &event.user_id, &event.channel_id, keep).await
        {
            tracing::warn!(channel = %event.channel_id, error = %error, "inline trim failed");
        }
        true
    }

    /// Handle one line of chat input. Returns the reply, or `None` when the
    /// input is not a recall command or needs no reply.
    pub async fn handle_command(&self, input: &str, ctx: &CommandContext) -> Option<String> {
        let command = parse_command(input)?;
        self.execute(command, ctx).await
    }

    pub async fn execute(&self, command: RecallCommand, ctx: &CommandContext) -> Option<String> {
        match command {
            RecallCommand::Recall { user, number } => {
                let request = if ctx.quoted.is_empty() {
                    let request = RecallRequest::latest(&ctx.channel_id, number);
                    match user {
                        Some(user) => request.with_user(user),
                        None => request,
                    }
                } else {
                    RecallRequest::quoted(&ctx.channel_id, ctx.quoted.clone())
                };
                let result = self.recall.recall(&request).await;
                if let Err(error) = &result {
                    tracing::debug!(channel = %ctx.channel_id, error = %error, "recall not run");
                }
                render_recall(&result)
            }
            RecallCommand::Stop => Some(render_stop(self.recall.stop(&ctx.channel_id))),
            RecallCommand::Status => {
                let tasks: Vec<_> = self
                    .recall
                    .registry()
                    .snapshot()
                    .into_iter()
                    .filter(|task| task.channel_id == ctx.channel_id)
                    .collect();
                Some(render_status(&tasks))
            }
            RecallCommand::Invalid => Some(USAGE.to_string()),
        }
    }

    /// Run one sweep immediately, outside the schedule.
    pub async fn sweep_now(&self) -> Option<SweepReport> {
        let store = self.store.as_ref()?;
        if !self.policy.is_enabled() {
            return None;
        }
        Some(run_sweep(store.as_ref(), &self.policy, Utc::now().timestamp_millis()).await)
    }

    /// Stop the eviction loop, cancel every recall task and, if configured,
    /// purge the store.
    pub async fn dispose(&self) {
        let sweeper = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = sweeper {
            handle.shutdown().await;
        }

        let cancelled = self.recall.registry().cancel_all();
        if cancelled > 0 {
            tracing::info!(cancelled, "recall tasks cancelled on dispose");
        }

        if self.retention.purge_on_dispose
            && let Some(store) = &self.store
        {
            match store.delete_all().await {
                Ok(purged) => tracing::info!(purged, "message history purged"),
                Err(error) => tracing::warn!(error = %error, "failed to purge message history"),
            }
        }
    }
}
