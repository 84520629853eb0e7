use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::{ClientError, VcsApi};
use crate::session::refresh::swallow_refresh_error;

/// In-memory mirror of the backend's tracked project set.
///
/// The backend is authoritative: mutations never insert locally, they
/// re-fetch the whole list afterwards (the backend normalizes and
/// validates paths on add). A failed mutation propagates to the
/// caller and leaves the mirror untouched; a failed re-fetch keeps
/// the prior list like any other read.
pub struct ProjectRegistry {
    api: Arc<dyn VcsApi>,
    projects: RwLock<Vec<String>>,
}

impl ProjectRegistry {
    pub fn new(api: Arc<dyn VcsApi>) -> Self {
        Self {
            api,
            projects: RwLock::new(Vec::new()),
        }
    }

    /// Current mirrored list.
    pub async fn projects(&self) -> Vec<String> {
        self.projects.read().await.clone()
    }

    /// Re-fetch the list from the backend. Returns whether the fetch
    /// succeeded; on failure the prior list is kept.
    pub async fn refresh(&self) -> bool {
        swallow_refresh_error("projects", self.try_refresh().await)
    }

    async fn try_refresh(&self) -> Result<(), ClientError> {
        let list = self.api.list_projects().await?;
        *self.projects.write().await = list;
        Ok(())
    }

    /// Register a project, then re-sync the mirror.
    pub async fn add(&self, path: &str) -> Result<(), ClientError> {
        self.api.add_project(path).await?;
        self.refresh().await;
        Ok(())
    }

    /// Unregister a project, then re-sync the mirror.
    pub async fn remove(&self, path: &str) -> Result<(), ClientError> {
        self.api.remove_project(path).await?;
        self.refresh().await;
        Ok(())
    }
}
