use super::task::RecallTask;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub channel_id: String,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
}

/// Active recall tasks, grouped by channel.
///
/// A channel key exists only while it has at least one task. The map is never
/// locked across an `.await`.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    channels: Mutex<HashMap<String, Vec<Arc<RecallTask>>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Arc<RecallTask>>>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `task` to the channel's set. The task leaves the set when the
    /// returned guard drops.
    pub fn register(self: &Arc<Self>, channel_id: &str, task: Arc<RecallTask>) -> TaskGuard {
        self.lock()
            .entry(channel_id.to_string())
            .or_default()
            .push(Arc::clone(&task));

        TaskGuard {
            registry: Arc::clone(self),
            channel_id: channel_id.to_string(),
            task,
        }
    }

    /// Remove one task. Returns `false` when it was already gone, e.g. after
    /// `stop` cleared the channel; the key is never re-created.
    pub fn remove(&self, channel_id: &str, task: &Arc<RecallTask>) -> bool {
        let mut channels = self.lock();
        let Some(tasks) = channels.get_mut(channel_id) else {
            return false;
        };

        let before = tasks.len();
        tasks.retain(|candidate| !Arc::ptr_eq(candidate, task));
        let removed = tasks.len() != before;

        if tasks.is_empty() {
            channels.remove(channel_id);
        }
        removed
    }

    /// Signal every task in the channel and drop the channel entry.
    ///
    /// Tasks observe the signal at their next checkpoint, so they may still
    /// be running briefly after this returns.
    pub fn stop(&self, channel_id: &str) -> usize {
        let Some(tasks) = self.lock().remove(channel_id) else {
            return 0;
        };
        for task in &tasks {
            task.cancel();
        }
        tasks.len()
    }

    /// Signal every task in every channel and clear the registry.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<Arc<RecallTask>> = self
            .lock()
            .drain()
            .flat_map(|(_, tasks)| tasks)
            .collect();
        for task in &drained {
            task.cancel();
        }
        drained.len()
    }

    pub fn active_in(&self, channel_id: &str) -> usize {
        self.lock().get(channel_id).map_or(0, Vec::len)
    }

    pub fn contains_channel(&self, channel_id: &str) -> bool {
        self.lock().contains_key(channel_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Progress of every visible task, ordered by channel then start time.
    pub fn snapshot(&self) -> Vec<TaskSnapshot> {
        let mut snapshots: Vec<TaskSnapshot> = self
            .lock()
            .iter()
            .flat_map(|(channel_id, tasks)| {
                tasks.iter().map(move |task| TaskSnapshot {
                    channel_id: channel_id.clone(),
                    total: task.total(),
                    succeeded: task.succeeded(),
                    failed: task.failed(),
                    cancelled: task.is_cancelled(),
                    started_at: task.started_at(),
                })
            })
            .collect();
        snapshots.sort_by(|a, b| {
            a.channel_id
                .cmp(&b.channel_id)
                .then(a.started_at.cmp(&b.started_at))
        });
        snapshots
    }
}

/// Registry membership of one running task.
pub struct TaskGuard {
    registry: Arc<TaskRegistry>,
    channel_id: String,
    task: Arc<RecallTask>,
}

impl TaskGuard {
    pub fn task(&self) -> &RecallTask {
        &self.task
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.registry.remove(&self.channel_id, &self.task);
    }
}
