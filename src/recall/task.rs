use super::executor::RecallOutcome;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// One in-flight batch recall.
///
/// The cancel flag may be raised by anyone holding the task; the counters are
/// written only by the loop that owns it.
#[derive(Debug)]
pub struct RecallTask {
    cancelled: AtomicBool,
    total: usize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    started_at: DateTime<Utc>,
}

impl RecallTask {
    pub fn new(total: usize) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            total,
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            started_at: Utc::now(),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(super) fn record(&self, outcome: RecallOutcome) {
        self.succeeded.fetch_add(outcome.succeeded, Ordering::Relaxed);
        self.failed.fetch_add(outcome.failed, Ordering::Relaxed);
    }
}
