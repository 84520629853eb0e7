use super::Session;
use crate::client::{ClientError, CommitOutcome};

/// Mutating actions. Each one is a no-op while no project is active,
/// propagates the mutation's error to the caller unchanged, and on
/// success re-synchronizes the dependent views (status first, then
/// log, so the "what changed" and "what history looks like now"
/// answers are consistent). The follow-up refreshes themselves are
/// read-path: their failures are logged, never thrown.
impl Session {
    /// Hard-reset the active project to `commit_id`, discarding later
    /// commits and uncommitted changes.
    pub async fn reset_to_commit(&self, commit_id: &str) -> Result<(), ClientError> {
        let Some(project) = self.active_project().await else {
            return Ok(());
        };
        self.api.reset(&project, commit_id).await?;
        self.refresher.fetch_status().await;
        self.refresher.fetch_log().await;
        Ok(())
    }

    /// Create a new commit undoing `commit_id`.
    pub async fn revert_commit(&self, commit_id: &str) -> Result<(), ClientError> {
        let Some(project) = self.active_project().await else {
            return Ok(());
        };
        self.api.revert(&project, commit_id).await?;
        self.refresher.fetch_status().await;
        self.refresher.fetch_log().await;
        Ok(())
    }

    /// Materialize `file_name` as it was at `commit_id` next to the
    /// current copy, returning the restored file's path. Restore does
    /// not rewrite history, so only the status view is refreshed;
    /// the log is intentionally left alone.
    pub async fn restore_file(
        &self,
        commit_id: &str,
        file_name: &str,
    ) -> Result<Option<String>, ClientError> {
        let Some(project) = self.active_project().await else {
            return Ok(None);
        };
        let outcome = self.api.restore(&project, commit_id, file_name).await?;
        self.refresher.fetch_status().await;
        Ok(Some(outcome.restored_path))
    }

    /// Commit the staged files (all tracked documents when none are
    /// staged) with `message`. The backend reports `success: false`
    /// when there was nothing to commit.
    pub async fn commit_changes(
        &self,
        message: &str,
    ) -> Result<Option<CommitOutcome>, ClientError> {
        let Some(project) = self.active_project().await else {
            return Ok(None);
        };
        let staged = self.state.read().await.staged_files.clone();
        let outcome = self.api.commit(&project, message, &staged).await?;
        self.refresher.fetch_status().await;
        self.refresher.fetch_log().await;
        Ok(Some(outcome))
    }

    /// Fetch the rendered diff for one file of the active project.
    /// The diff is returned to the caller, never stored in session
    /// state.
    pub async fn fetch_diff(&self, file_name: &str) -> Result<Option<String>, ClientError> {
        let Some(project) = self.active_project().await else {
            return Ok(None);
        };
        Ok(Some(self.api.get_diff(&project, file_name).await?))
    }
}
