#![allow(dead_code)]

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use iris_recall::config::Config;
use iris_recall::history::{HistoryStore, MessageRecord, SqliteHistoryStore};
use iris_recall::{Channel, HistoryPlugin};

/// Channel double that records deletions and can reject chosen ids.
#[derive(Default)]
pub struct RecordingChannel {
    deleted: Mutex<Vec<(String, String)>>,
    rejected: HashSet<String>,
    calls: AtomicUsize,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rejecting(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            rejected: ids.iter().map(|id| (*id).to_string()).collect(),
            ..Self::default()
        })
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, id)| id.clone())
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    fn delete_message<'a>(
        &'a self,
        channel_id: &'a str,
        message_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.rejected.contains(message_id) {
                anyhow::bail!("missing permissions");
            }
            self.deleted
                .lock()
                .unwrap()
                .push((channel_id.to_string(), message_id.to_string()));
            Ok(())
        })
    }
}

pub fn test_config(pacing_ms: u64) -> Config {
    let mut config = Config::default();
    config.recall.pacing_delay_ms = pacing_ms;
    config
}

pub async fn memory_store() -> Arc<dyn HistoryStore> {
    Arc::new(SqliteHistoryStore::in_memory().await.unwrap())
}

pub async fn plugin_with(
    config: &Config,
    channel: Arc<RecordingChannel>,
) -> (HistoryPlugin, Arc<dyn HistoryStore>) {
    let store = memory_store().await;
    let plugin = HistoryPlugin::new(config, channel, Some(Arc::clone(&store)));
    (plugin, store)
}

/// Seed `count` records for one pair, newest last, ids `"{prefix}-{i:03}"`.
pub async fn seed(store: &dyn HistoryStore, prefix: &str, user: &str, channel: &str, count: i64) {
    let base = chrono::Utc::now().timestamp_millis() - count;
    for i in 0..count {
        store
            .record(&MessageRecord::new(
                format!("{prefix}-{i:03}"),
                user,
                channel,
                base + i,
            ))
            .await
            .unwrap();
    }
}

/// Poll `check` until it holds or a second passes.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
