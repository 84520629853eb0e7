use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::client::{ChangedFile, Commit};

/// Everything the UI renders for the active project.
///
/// The view fields (`changed_files`, `all_files`, `selected_file`,
/// `staged_files`, `commits`) are meaningful only while
/// `active_project` is set, and are cleared together whenever the
/// active project changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub active_project: Option<String>,
    pub selected_file: Option<String>,
    pub changed_files: Vec<ChangedFile>,
    pub all_files: Vec<String>,
    /// Files picked for the next scoped commit. Never filters the log.
    pub staged_files: Vec<String>,
    pub commits: Vec<Commit>,
}

impl SessionState {
    /// Drop every project-dependent field. Callers hold the write
    /// lock, so the clear is atomic with the pointer update.
    pub(crate) fn clear_project_view(&mut self) {
        self.selected_file = None;
        self.changed_files.clear();
        self.all_files.clear();
        self.staged_files.clear();
        self.commits.clear();
    }

    pub fn has_active_project(&self) -> bool {
        self.active_project.is_some()
    }
}

pub(crate) type SharedState = Arc<RwLock<SessionState>>;
