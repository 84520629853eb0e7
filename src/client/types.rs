use serde::{Deserialize, Serialize};

/// A file the backend reports as changed since the last commit.
///
/// `status` is the two-column `git status --short` code and is passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub path: String,
    pub status: String,
}

/// One entry of a project's commit log, most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub author: String,
    pub date: String,
}

/// Result of a commit request. The backend answers `success: false`
/// with an explanatory message when there were no changes to record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a restore request, carrying the path of the
/// materialized copy (e.g. `report.ab12cd3.restored.docx`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreOutcome {
    pub success: bool,
    pub restored_path: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddProjectBody<'a> {
    pub path: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommitBody<'a> {
    pub message: &'a str,
    pub files: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct CommitIdBody<'a> {
    pub commit_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RestoreBody<'a> {
    pub commit_id: &'a str,
    pub file_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DiffResponse {
    pub diff: String,
}
