use super::policy::RetentionPolicy;
use super::sweep::run_sweep;
use crate::history::HistoryStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Owner of a running eviction loop. Dropping it without `shutdown` leaves the
/// loop running until the runtime exits.
pub struct SweepHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl SweepHandle {
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Stop the loop. A sweep already in progress runs to completion first.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(error) = self.join.await
            && error.is_panic()
        {
            tracing::warn!(error = %error, "eviction loop panicked");
        }
    }
}

/// Start the periodic sweep for `policy`.
///
/// Returns `None` when the policy stores nothing or has no cleanup interval.
/// The first sweep runs immediately.
pub fn spawn_eviction_loop(
    store: Arc<dyn HistoryStore>,
    policy: RetentionPolicy,
) -> Option<SweepHandle> {
    if !policy.is_enabled() {
        return None;
    }
    let period = policy.cleanup_period()?;
    Some(spawn_eviction_loop_every(store, policy, period))
}

/// Same as [`spawn_eviction_loop`] with an explicit period.
pub fn spawn_eviction_loop_every(
    store: Arc<dyn HistoryStore>,
    policy: RetentionPolicy,
    period: Duration,
) -> SweepHandle {
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let join = tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = interval.tick() => {}
            }

            run_sweep(store.as_ref(), &policy, Utc::now().timestamp_millis()).await;
        }

        tracing::debug!("eviction loop stopped");
    });

    SweepHandle { cancel, join }
}
