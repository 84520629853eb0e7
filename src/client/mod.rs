mod types;

pub use types::{ChangedFile, Commit, CommitOutcome, RestoreOutcome};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use types::{AddProjectBody, CommitBody, CommitIdBody, DiffResponse, RestoreBody};

/// Backend base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// The request never reached the server or the response never
    /// arrived (connect, timeout, decode-on-the-wire failures).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Remote VCS operation surface.
///
/// The session controller and registry depend on this trait rather
/// than the concrete HTTP client, so tests can drive the state
/// machine with an in-memory implementation. No retries at this
/// layer; callers decide retry policy.
#[async_trait]
pub trait VcsApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<String>, ClientError>;
    async fn add_project(&self, path: &str) -> Result<(), ClientError>;
    async fn remove_project(&self, path: &str) -> Result<(), ClientError>;
    async fn ensure_initialized(&self, path: &str) -> Result<(), ClientError>;
    async fn get_status(&self, path: &str, files: &[String]) -> Result<Vec<ChangedFile>, ClientError>;
    async fn get_files(&self, path: &str) -> Result<Vec<String>, ClientError>;
    async fn get_log(&self, path: &str, files: &[String]) -> Result<Vec<Commit>, ClientError>;
    async fn get_diff(&self, path: &str, file_name: &str) -> Result<String, ClientError>;
    async fn commit(
        &self,
        path: &str,
        message: &str,
        files: &[String],
    ) -> Result<CommitOutcome, ClientError>;
    async fn reset(&self, path: &str, commit_id: &str) -> Result<(), ClientError>;
    async fn revert(&self, path: &str, commit_id: &str) -> Result<(), ClientError>;
    async fn restore(
        &self,
        path: &str,
        commit_id: &str,
        file_name: &str,
    ) -> Result<RestoreOutcome, ClientError>;
}

/// `reqwest`-backed implementation of [`VcsApi`].
pub struct VcsClient {
    base: Url,
    http: reqwest::Client,
}

impl VcsClient {
    /// Build a client for the backend at `base_url` (e.g.
    /// `http://localhost:8000/api`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("docvc")
            .build()?;

        Ok(Self { base, http })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    async fn ok(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ClientError::Server {
            status: status.as_u16(),
            message: error_detail(&body),
        })
    }
}

/// Extract a human-readable message from an error response body.
///
/// The backend wraps failures as `{"detail": "..."}`; anything else
/// is returned as-is.
fn error_detail(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(detail)) = map.get("detail") {
            return detail.clone();
        }
    }
    body.to_string()
}

/// Query pairs for a project-scoped request, with the optional file
/// filter flattened to repeated `files=a&files=b` scalars; the
/// backend rejects bracketed array notation.
fn scoped_query(project_path: &str, files: &[String]) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("project_path", project_path.to_string())];
    for file in files {
        pairs.push(("files", file.clone()));
    }
    pairs
}

#[async_trait]
impl VcsApi for VcsClient {
    async fn list_projects(&self) -> Result<Vec<String>, ClientError> {
        let resp = self.http.get(self.endpoint(&["projects"])).send().await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    async fn add_project(&self, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.endpoint(&["projects"]))
            .json(&AddProjectBody { path })
            .send()
            .await?;
        Self::ok(resp).await?;
        Ok(())
    }

    async fn remove_project(&self, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.endpoint(&["projects"]))
            .query(&[("path", path)])
            .send()
            .await?;
        Self::ok(resp).await?;
        Ok(())
    }

    async fn ensure_initialized(&self, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.endpoint(&["init"]))
            .query(&[("project_path", path)])
            .send()
            .await?;
        Self::ok(resp).await?;
        Ok(())
    }

    async fn get_status(&self, path: &str, files: &[String]) -> Result<Vec<ChangedFile>, ClientError> {
        let resp = self
            .http
            .get(self.endpoint(&["status"]))
            .query(&scoped_query(path, files))
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    async fn get_files(&self, path: &str) -> Result<Vec<String>, ClientError> {
        let resp = self
            .http
            .get(self.endpoint(&["files"]))
            .query(&[("project_path", path)])
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    async fn get_log(&self, path: &str, files: &[String]) -> Result<Vec<Commit>, ClientError> {
        let resp = self
            .http
            .get(self.endpoint(&["log"]))
            .query(&scoped_query(path, files))
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    async fn get_diff(&self, path: &str, file_name: &str) -> Result<String, ClientError> {
        let resp = self
            .http
            .get(self.endpoint(&["diff", file_name]))
            .query(&[("project_path", path)])
            .send()
            .await?;
        let body: DiffResponse = Self::ok(resp).await?.json().await?;
        Ok(body.diff)
    }

    async fn commit(
        &self,
        path: &str,
        message: &str,
        files: &[String],
    ) -> Result<CommitOutcome, ClientError> {
        let resp = self
            .http
            .post(self.endpoint(&["commit"]))
            .query(&[("project_path", path)])
            .json(&CommitBody { message, files })
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }

    async fn reset(&self, path: &str, commit_id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.endpoint(&["reset"]))
            .query(&[("project_path", path)])
            .json(&CommitIdBody { commit_id })
            .send()
            .await?;
        Self::ok(resp).await?;
        Ok(())
    }

    async fn revert(&self, path: &str, commit_id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.endpoint(&["revert"]))
            .query(&[("project_path", path)])
            .json(&CommitIdBody { commit_id })
            .send()
            .await?;
        Self::ok(resp).await?;
        Ok(())
    }

    async fn restore(
        &self,
        path: &str,
        commit_id: &str,
        file_name: &str,
    ) -> Result<RestoreOutcome, ClientError> {
        let resp = self
            .http
            .post(self.endpoint(&["restore"]))
            .query(&[("project_path", path)])
            .json(&RestoreBody {
                commit_id,
                file_name,
            })
            .send()
            .await?;
        Ok(Self::ok(resp).await?.json().await?)
    }
}
