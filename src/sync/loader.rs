//! Three-tier dataset resolution: remote replica, then the local store,
//! then the built-in defaults. Something usable always comes back.

use crate::config::RemoteConfig;
use crate::db::{CategoryRepository, ItemRepository};
use crate::defaults;
use crate::models::{Category, InfoItem};

use super::client::RemoteSyncClient;

/// Which tier a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    Remote,
    Local,
    Defaults,
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::Remote => write!(f, "remote"),
            DatasetSource::Local => write!(f, "local store"),
            DatasetSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Resolves the current dataset, preferring the remote replica.
///
/// Remote failures of any kind (not configured, network, bad content) fall
/// back to the local store; an empty local store falls back to the built-in
/// default dataset.
pub async fn resolve_dataset(
    client: &RemoteSyncClient,
    config: &RemoteConfig,
    categories: &CategoryRepository,
    items: &ItemRepository,
) -> Result<(Vec<Category>, Vec<InfoItem>, DatasetSource), sqlx::Error> {
    match client.load(config).await {
        Ok(snapshot) => {
            return Ok((snapshot.categories, snapshot.items, DatasetSource::Remote));
        }
        Err(e) => {
            tracing::warn!("remote dataset unavailable, trying local store: {}", e);
        }
    }

    let local_categories = categories.list().await?;
    let local_items = items.list().await?;
    if !local_categories.is_empty() || !local_items.is_empty() {
        return Ok((local_categories, local_items, DatasetSource::Local));
    }

    tracing::warn!("local store is empty, using built-in defaults");
    let (default_categories, default_items) = defaults::default_dataset();
    Ok((default_categories, default_items, DatasetSource::Defaults))
}
