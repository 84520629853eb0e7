use std::sync::Arc;

use tracing::warn;

use super::state::SharedState;
use crate::client::{ClientError, VcsApi};

/// Read-path fetches shared by the poller and the action dispatcher.
///
/// Every fetch is a best-effort refresh: it no-ops when no project is
/// active, re-verifies that its target project is still the active
/// one before applying the response (a stale response from a
/// just-switched-away project must never leak into the new view), and
/// routes failures through [`swallow_refresh_error`].
#[derive(Clone)]
pub(crate) struct Refresher {
    api: Arc<dyn VcsApi>,
    state: SharedState,
}

impl Refresher {
    pub(crate) fn new(api: Arc<dyn VcsApi>, state: SharedState) -> Self {
        Self { api, state }
    }

    async fn target(&self) -> Option<String> {
        self.state.read().await.active_project.clone()
    }

    /// One poll pass: status, files and log refreshed concurrently.
    /// The fetches are independent; one failing never blocks the
    /// other two.
    pub(crate) async fn poll_pass(&self) {
        futures::join!(self.fetch_status(), self.fetch_files(), self.fetch_log());
    }

    pub(crate) async fn fetch_status(&self) {
        swallow_refresh_error("status", self.try_fetch_status().await);
    }

    pub(crate) async fn fetch_files(&self) {
        swallow_refresh_error("files", self.try_fetch_files().await);
    }

    pub(crate) async fn fetch_log(&self) {
        swallow_refresh_error("log", self.try_fetch_log().await);
    }

    async fn try_fetch_status(&self) -> Result<(), ClientError> {
        let Some(target) = self.target().await else {
            return Ok(());
        };
        let changed = self.api.get_status(&target, &[]).await?;
        let mut state = self.state.write().await;
        if state.active_project.as_deref() == Some(target.as_str()) {
            state.changed_files = changed;
        }
        Ok(())
    }

    async fn try_fetch_files(&self) -> Result<(), ClientError> {
        let Some(target) = self.target().await else {
            return Ok(());
        };
        let files = self.api.get_files(&target).await?;
        let mut state = self.state.write().await;
        if state.active_project.as_deref() == Some(target.as_str()) {
            state.all_files = files;
        }
        Ok(())
    }

    /// Log fetch, scoped to the selected file when one is set.
    async fn try_fetch_log(&self) -> Result<(), ClientError> {
        let (target, filter) = {
            let state = self.state.read().await;
            let Some(project) = state.active_project.clone() else {
                return Ok(());
            };
            let filter: Vec<String> = state.selected_file.iter().cloned().collect();
            (project, filter)
        };
        let commits = self.api.get_log(&target, &filter).await?;
        let mut state = self.state.write().await;
        if state.active_project.as_deref() == Some(target.as_str()) {
            state.commits = commits;
        }
        Ok(())
    }
}

/// The swallow-vs-propagate policy for read paths: log the failure
/// and keep the prior view. Returns whether the refresh succeeded.
pub(crate) fn swallow_refresh_error(view: &str, result: Result<(), ClientError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!("Failed to refresh {}: {}", view, err);
            false
        }
    }
}
