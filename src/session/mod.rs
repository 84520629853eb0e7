mod actions;
mod poller;
pub(crate) mod refresh;
mod state;

pub use poller::POLL_INTERVAL;
pub use state::SessionState;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::warn;

use crate::client::VcsApi;
use poller::Poller;
use refresh::Refresher;
use state::SharedState;

/// Owns the active-project pointer and everything derived from it.
///
/// At most one project is active at a time. Activation clears the
/// previous project's view before any network call, so a stale poll
/// response from the old project can never leak into the new one;
/// the poller's per-fetch re-verification covers responses already in
/// flight.
pub struct Session {
    api: Arc<dyn VcsApi>,
    state: SharedState,
    refresher: Refresher,
    poller: Poller,
}

impl Session {
    pub fn new(api: Arc<dyn VcsApi>) -> Self {
        Self::with_poll_interval(api, POLL_INTERVAL)
    }

    /// Like [`Session::new`] with a custom delay between poll passes.
    pub fn with_poll_interval(api: Arc<dyn VcsApi>, interval: Duration) -> Self {
        let state: SharedState = Arc::new(RwLock::new(SessionState::default()));
        let refresher = Refresher::new(api.clone(), state.clone());
        let poller = Poller::with_interval(refresher.clone(), interval);
        Self {
            api,
            state,
            refresher,
            poller,
        }
    }

    /// Activate `path`: atomically point the session at it and clear
    /// the previous project's view, stop the old poller, ask the
    /// backend to initialize the project, then start polling. The
    /// first poll pass populates status, files and log immediately.
    ///
    /// Initialization is idempotent and best-effort: a transient
    /// failure is logged and activation proceeds, since the session
    /// already has everything it needs to start polling.
    pub async fn select_project(&self, path: &str) {
        {
            let mut state = self.state.write().await;
            state.active_project = Some(path.to_string());
            state.clear_project_view();
        }
        self.poller.stop().await;

        if let Err(err) = self.api.ensure_initialized(path).await {
            warn!("Failed to ensure init for {}: {}", path, err);
        }

        self.poller.start().await;
    }

    /// Drop the active project and stop polling. The dependent view
    /// fields are left as-is; the next activation re-clears them.
    pub async fn deselect_project(&self) {
        self.state.write().await.active_project = None;
        self.poller.stop().await;
    }

    /// Select a file for the diff view and immediately re-scope the
    /// commit log to it. Does not change which project is active.
    pub async fn select_file(&self, path: &str) {
        self.state.write().await.selected_file = Some(path.to_string());
        self.refresher.fetch_log().await;
    }

    /// Add a file to the staged set for the next scoped commit.
    pub async fn stage_file(&self, path: &str) {
        let mut state = self.state.write().await;
        if !state.staged_files.iter().any(|f| f == path) {
            state.staged_files.push(path.to_string());
        }
    }

    /// Remove a file from the staged set. No-op if it was not staged.
    pub async fn unstage_file(&self, path: &str) {
        self.state.write().await.staged_files.retain(|f| f != path);
    }

    pub async fn active_project(&self) -> Option<String> {
        self.state.read().await.active_project.clone()
    }

    pub async fn has_active_project(&self) -> bool {
        self.state.read().await.has_active_project()
    }

    /// A point-in-time copy of the full session view.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }
}
