use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::refresh::Refresher;

/// Default delay between poll passes.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Timer-driven refresh loop for the active project.
///
/// The poll task is an owned handle on this struct rather than a
/// process-wide global, so independent sessions each get their own
/// timer. The loop is pass-then-sleep: a pass's fetches must resolve
/// before the next delay is armed, so a slow backend stretches the
/// period instead of stacking concurrent passes.
pub(crate) struct Poller {
    refresher: Refresher,
    interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Poller {
    pub(crate) fn with_interval(refresher: Refresher, interval: Duration) -> Self {
        Self {
            refresher,
            interval,
            task: Mutex::new(None),
        }
    }

    /// Spawn the poll loop, replacing (never duplicating) any
    /// existing timer. The first pass runs immediately so the view
    /// populates without waiting a full interval.
    pub(crate) async fn start(&self) {
        let mut slot = self.task.lock().await;
        if let Some(old) = slot.take() {
            old.abort();
        }

        let refresher = self.refresher.clone();
        let interval = self.interval;
        *slot = Some(tokio::spawn(async move {
            loop {
                refresher.poll_pass().await;
                tokio::time::sleep(interval).await;
            }
        }));
    }

    /// Abort the poll loop. Safe to call when none is running.
    pub(crate) async fn stop(&self) {
        if let Some(task) = self.task.lock().await.take() {
            task.abort();
        }
    }
}
