//! In-memory [`VcsApi`] implementation shared by the integration
//! tests: records every call, serves deterministic per-project
//! responses, and can be scripted to fail individual operations or
//! hold a status fetch in flight across a project switch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use docvc_core::{ChangedFile, ClientError, Commit, CommitOutcome, RestoreOutcome, VcsApi};

/// One recorded backend call, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProjects,
    AddProject(String),
    RemoveProject(String),
    EnsureInitialized(String),
    GetStatus(String),
    GetFiles(String),
    GetLog(String, Vec<String>),
    GetDiff(String, String),
    Commit(String, String, Vec<String>),
    Reset(String, String),
    Revert(String, String),
    Restore(String, String, String),
}

#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    /// What `list_projects` answers.
    pub project_list: Mutex<Vec<String>>,
    pub fail_list: AtomicBool,
    pub fail_add: AtomicBool,
    pub fail_remove: AtomicBool,
    pub fail_init: AtomicBool,
    pub fail_status: AtomicBool,
    pub fail_reset: AtomicBool,
    /// When set, `get_status` for this project parks until
    /// [`RecordingApi::release_status`] is called.
    held_status: Mutex<Option<String>>,
    release: Notify,
}

fn scripted_error() -> ClientError {
    ClientError::Server {
        status: 500,
        message: "scripted failure".to_string(),
    }
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls recorded at or after index `mark`.
    pub fn calls_from(&self, mark: usize) -> Vec<Call> {
        self.calls.lock().unwrap()[mark..].to_vec()
    }

    pub fn status_calls_for(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::GetStatus(p) if p == path))
            .count()
    }

    /// Park the next `get_status` for `path` until released.
    pub fn hold_status_for(&self, path: &str) {
        *self.held_status.lock().unwrap() = Some(path.to_string());
    }

    pub fn release_status(&self) {
        self.release.notify_one();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn held(&self, path: &str) -> bool {
        self.held_status.lock().unwrap().as_deref() == Some(path)
    }
}

#[async_trait]
impl VcsApi for RecordingApi {
    async fn list_projects(&self) -> Result<Vec<String>, ClientError> {
        self.record(Call::ListProjects);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(scripted_error());
        }
        Ok(self.project_list.lock().unwrap().clone())
    }

    async fn add_project(&self, path: &str) -> Result<(), ClientError> {
        self.record(Call::AddProject(path.to_string()));
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(scripted_error());
        }
        Ok(())
    }

    async fn remove_project(&self, path: &str) -> Result<(), ClientError> {
        self.record(Call::RemoveProject(path.to_string()));
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(scripted_error());
        }
        Ok(())
    }

    async fn ensure_initialized(&self, path: &str) -> Result<(), ClientError> {
        self.record(Call::EnsureInitialized(path.to_string()));
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(scripted_error());
        }
        Ok(())
    }

    async fn get_status(&self, path: &str, _files: &[String]) -> Result<Vec<ChangedFile>, ClientError> {
        self.record(Call::GetStatus(path.to_string()));
        if self.held(path) {
            self.release.notified().await;
        }
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(scripted_error());
        }
        Ok(vec![ChangedFile {
            path: format!("{}/changed.docx", path),
            status: "M".to_string(),
        }])
    }

    async fn get_files(&self, path: &str) -> Result<Vec<String>, ClientError> {
        self.record(Call::GetFiles(path.to_string()));
        Ok(vec![
            format!("{}/a.docx", path),
            format!("{}/b.docx", path),
        ])
    }

    async fn get_log(&self, path: &str, files: &[String]) -> Result<Vec<Commit>, ClientError> {
        self.record(Call::GetLog(path.to_string(), files.to_vec()));
        Ok(vec![Commit {
            id: "c1".to_string(),
            message: format!("history of {}", path),
            author: "tester".to_string(),
            date: "2026-08-01".to_string(),
        }])
    }

    async fn get_diff(&self, path: &str, file_name: &str) -> Result<String, ClientError> {
        self.record(Call::GetDiff(path.to_string(), file_name.to_string()));
        Ok(format!("--- a/{}\n+++ b/{}", file_name, file_name))
    }

    async fn commit(
        &self,
        path: &str,
        message: &str,
        files: &[String],
    ) -> Result<CommitOutcome, ClientError> {
        self.record(Call::Commit(
            path.to_string(),
            message.to_string(),
            files.to_vec(),
        ));
        Ok(CommitOutcome {
            success: true,
            message: None,
        })
    }

    async fn reset(&self, path: &str, commit_id: &str) -> Result<(), ClientError> {
        self.record(Call::Reset(path.to_string(), commit_id.to_string()));
        if self.fail_reset.load(Ordering::SeqCst) {
            return Err(scripted_error());
        }
        Ok(())
    }

    async fn revert(&self, path: &str, commit_id: &str) -> Result<(), ClientError> {
        self.record(Call::Revert(path.to_string(), commit_id.to_string()));
        Ok(())
    }

    async fn restore(
        &self,
        path: &str,
        commit_id: &str,
        file_name: &str,
    ) -> Result<RestoreOutcome, ClientError> {
        self.record(Call::Restore(
            path.to_string(),
            commit_id.to_string(),
            file_name.to_string(),
        ));
        Ok(RestoreOutcome {
            success: true,
            restored_path: format!(
                "{}.{}.restored.docx",
                file_name.trim_end_matches(".docx"),
                commit_id
            ),
        })
    }
}
