//! Sync error types.

/// Errors that can occur while publishing or loading the remote dataset.
///
/// Messages never contain the access token; anything surfaced here is safe
/// to print to the user.
#[derive(Debug)]
pub enum SyncError {
    /// Sync attempted without token/owner/repo configured
    ConfigurationIncomplete,
    /// Network or API-level failure during publish
    SyncFailed(String),
    /// Network failure or non-success status on the read path
    FetchFailed(String),
    /// Remote content is not valid JSON or is missing required collections
    ParseFailed(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::ConfigurationIncomplete => write!(
                f,
                "Remote sync is not configured. Add remote.token, remote.owner and remote.repo to config."
            ),
            SyncError::SyncFailed(e) => write!(f, "Sync failed: {}", e),
            SyncError::FetchFailed(e) => write!(f, "Fetch failed: {}", e),
            SyncError::ParseFailed(e) => write!(f, "Invalid dataset: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}
