//! HTTP sync client for the remote dataset file.
//!
//! Publishing is the classic contents-API sequence: read the current file's
//! sha, base64-encode the snapshot, then PUT with the sha as an optimistic
//! concurrency precondition. There are no retries and no conflict
//! resolution; a concurrent write between the read and the PUT surfaces as
//! an ordinary failure and the caller re-runs the whole publish.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::error::SyncError;
use crate::config::RemoteConfig;
use crate::models::Snapshot;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
const USER_AGENT: &str = concat!("thanainfo/", env!("CARGO_PKG_VERSION"));

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// True if the remote file did not exist and was created
    pub created: bool,
}

/// Remote file metadata returned by the contents endpoint.
#[derive(Debug, Deserialize)]
struct ContentsMetadata {
    sha: String,
}

/// Body of the contents PUT request. `sha` is omitted on the create path.
#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
    branch: &'a str,
}

/// Error body returned by the remote API.
#[derive(Debug, Deserialize, Default)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Client for publishing and loading the dataset file.
#[derive(Debug, Clone)]
pub struct RemoteSyncClient {
    http: reqwest::Client,
    api_base: String,
    raw_base: String,
}

impl Default for RemoteSyncClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSyncClient {
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_API_BASE, DEFAULT_RAW_BASE)
    }

    /// Creates a client against explicit endpoints. Tests point both at a
    /// local mock server.
    pub fn with_base_urls(api_base: impl Into<String>, raw_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            raw_base: raw_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Publishes a snapshot to the configured remote file.
    ///
    /// Whole-document replacement: whatever is in the remote file is
    /// overwritten. Returns `ConfigurationIncomplete` without any network
    /// I/O when token/owner/repo are missing.
    pub async fn publish(
        &self,
        config: &RemoteConfig,
        snapshot: &Snapshot,
    ) -> Result<PublishOutcome, SyncError> {
        let (token, owner, repo) = match (&config.token, &config.owner, &config.repo) {
            (Some(t), Some(o), Some(r)) if !t.is_empty() && !o.is_empty() && !r.is_empty() => {
                (t.as_str(), o.as_str(), r.as_str())
            }
            _ => return Err(SyncError::ConfigurationIncomplete),
        };

        let url = self.contents_url(owner, repo, &config.path);

        // Current sha, if the file already exists. 404 means create.
        let sha = self.fetch_remote_sha(&url, token, &config.branch).await?;
        let created = sha.is_none();
        tracing::debug!(
            created,
            path = %config.path,
            branch = %config.branch,
            "publishing dataset snapshot"
        );

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SyncError::SyncFailed(e.to_string()))?;
        let body = PutContentsRequest {
            message: format!("Admin update: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
            content: BASE64.encode(json.as_bytes()),
            sha,
            branch: &config.branch,
        };

        let response = self
            .http
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", token))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::SyncFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error: ApiErrorBody = response.json().await.unwrap_or_default();
            let detail = if error.message.is_empty() {
                format!("remote returned status {}", status)
            } else {
                format!("{} (status {})", error.message, status)
            };
            return Err(SyncError::SyncFailed(detail));
        }

        tracing::info!(created, "dataset snapshot published");
        Ok(PublishOutcome { created })
    }

    /// Fetches the raw dataset file from the public read endpoint and
    /// validates it. The URL is cache-busted so intermediate caches are
    /// bypassed.
    pub async fn load(&self, config: &RemoteConfig) -> Result<Snapshot, SyncError> {
        let (owner, repo) = match (&config.owner, &config.repo) {
            (Some(o), Some(r)) if !o.is_empty() && !r.is_empty() => (o.as_str(), r.as_str()),
            _ => return Err(SyncError::ConfigurationIncomplete),
        };

        let url = format!(
            "{}/{}/{}/{}/{}?t={}",
            self.raw_base,
            owner,
            repo,
            config.branch,
            encode_path(&config.path),
            chrono::Utc::now().timestamp_millis()
        );

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| SyncError::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::FetchFailed(format!(
                "remote returned status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SyncError::FetchFailed(e.to_string()))?;

        // Snapshot requires both collections; anything else is rejected so
        // the caller can fall back to the next tier.
        let snapshot: Snapshot =
            serde_json::from_str(&body).map_err(|e| SyncError::ParseFailed(e.to_string()))?;

        tracing::debug!(
            categories = snapshot.categories.len(),
            items = snapshot.items.len(),
            "loaded remote dataset"
        );
        Ok(snapshot)
    }

    /// Looks up the current content sha of the remote file.
    ///
    /// `Ok(None)` means the file does not exist yet and the write should
    /// take the create path.
    async fn fetch_remote_sha(
        &self,
        url: &str,
        token: &str,
        branch: &str,
    ) -> Result<Option<String>, SyncError> {
        let response = self
            .http
            .get(url)
            .query(&[("ref", branch)])
            .header(reqwest::header::AUTHORIZATION, format!("token {}", token))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| SyncError::SyncFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let metadata: ContentsMetadata = response
                .json()
                .await
                .map_err(|e| SyncError::SyncFailed(e.to_string()))?;
            Ok(Some(metadata.sha))
        } else if status == reqwest::StatusCode::NOT_FOUND {
            // Not an error: the file does not exist yet.
            Ok(None)
        } else {
            Err(SyncError::SyncFailed(format!(
                "metadata lookup returned status {}",
                status
            )))
        }
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base,
            owner,
            repo,
            encode_path(path)
        )
    }
}

/// Percent-encodes a repository file path, preserving `/` separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
