//! Sync CLI commands: publish to and restore from the remote replica,
//! plus local snapshot backups.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::auth::AdminSession;
use crate::config::Config;
use crate::db::{replace_dataset, CategoryRepository, ItemRepository};
use crate::models::Snapshot;
use crate::sync::{resolve_dataset, DatasetSource, RemoteSyncClient, SyncError};

/// Sync the dataset with the remote repository
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: SyncSubcommand,
}

#[derive(Subcommand)]
enum SyncSubcommand {
    /// Publish the current dataset to the remote file
    Push,

    /// Load the dataset (remote, else local, else defaults) and replace the local store
    Pull,

    /// Show sync configuration and remote dataset state
    Status,

    /// Write a snapshot backup to a local JSON file
    Export {
        /// Destination file
        file: PathBuf,
    },

    /// Restore the local store from a snapshot backup file
    Import {
        /// Source file
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl SyncCommand {
    pub async fn run(
        &self,
        pool: &SqlitePool,
        categories: &CategoryRepository,
        items: &ItemRepository,
        config: &Config,
        session: &AdminSession,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let client = RemoteSyncClient::new();

        match &self.command {
            SyncSubcommand::Push => {
                session.require()?;

                let snapshot =
                    Snapshot::build(categories.list().await?, items.list().await?);

                println!(
                    "Publishing snapshot ({} categories, {} entries)...",
                    snapshot.categories.len(),
                    snapshot.items.len()
                );

                let outcome = client.publish(&config.remote, &snapshot).await?;
                if outcome.created {
                    println!("Done. Remote file created.");
                } else {
                    println!("Done. Remote file updated.");
                }
                Ok(())
            }

            SyncSubcommand::Pull => {
                session.require()?;

                println!("Loading dataset...");
                let (loaded_categories, loaded_items, source) =
                    resolve_dataset(&client, &config.remote, categories, items).await?;

                replace_dataset(pool, &loaded_categories, &loaded_items).await?;

                println!(
                    "Local store replaced from {} ({} categories, {} entries).",
                    source,
                    loaded_categories.len(),
                    loaded_items.len()
                );
                if source != DatasetSource::Remote {
                    println!("Note: the remote dataset was not available.");
                }
                Ok(())
            }

            SyncSubcommand::Status => {
                println!("Remote Sync Configuration");
                println!("=========================");
                println!();

                let remote = &config.remote;
                if !remote.is_complete() {
                    println!("Status: Not configured");
                    println!();
                    println!("To enable sync, add to your config file:");
                    println!();
                    println!("  remote:");
                    println!("    token: \"<personal access token>\"");
                    println!("    owner: \"<github user or org>\"");
                    println!("    repo: \"<repository>\"");
                    println!("    path: \"data.json\"");
                    println!("    branch: \"main\"");
                    println!();
                    println!("Or set environment variables:");
                    println!("  THANAINFO_GITHUB_TOKEN / _OWNER / _REPO / _PATH / _BRANCH");
                    return Ok(());
                }

                println!("Repository: {}/{}", display(&remote.owner), display(&remote.repo));
                println!("File:       {} (branch {})", remote.path, remote.branch);
                println!("Token:      {}", mask(remote.token.as_deref().unwrap_or("")));
                println!();

                print!("Remote dataset: ");
                match client.load(remote).await {
                    Ok(snapshot) => println!(
                        "reachable ({} categories, {} entries, generated {})",
                        snapshot.categories.len(),
                        snapshot.items.len(),
                        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC")
                    ),
                    Err(SyncError::FetchFailed(e)) => println!("unreachable ({})", e),
                    Err(e) => println!("error: {}", e),
                }
                Ok(())
            }

            SyncSubcommand::Export { file } => {
                let snapshot =
                    Snapshot::build(categories.list().await?, items.list().await?);
                let json = serde_json::to_string_pretty(&snapshot)?;
                std::fs::write(file, json)?;
                println!(
                    "Wrote backup with {} categories and {} entries to {}",
                    snapshot.categories.len(),
                    snapshot.items.len(),
                    file.display()
                );
                Ok(())
            }

            SyncSubcommand::Import { file, force } => {
                session.require()?;

                let contents = std::fs::read_to_string(file)?;
                // Same validation as the remote read path: both collections
                // must be present or the file is rejected.
                let snapshot: Snapshot = serde_json::from_str(&contents)
                    .map_err(|e| SyncError::ParseFailed(e.to_string()))?;

                if !force {
                    use std::io::Write;
                    print!(
                        "Replace the local store with {} categories and {} entries from {}? [y/N] ",
                        snapshot.categories.len(),
                        snapshot.items.len(),
                        file.display()
                    );
                    std::io::stdout().flush()?;
                    let mut input = String::new();
                    std::io::stdin().read_line(&mut input)?;
                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Import cancelled.");
                        return Ok(());
                    }
                }

                replace_dataset(pool, &snapshot.categories, &snapshot.items).await?;
                println!("Local store restored from {}.", file.display());
                Ok(())
            }
        }
    }
}

fn display(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Shows at most the first 4 characters of a secret. Anything short
/// enough that the prefix would be the whole secret is fully hidden.
fn mask(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}...", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::models::{Category, InfoItem};

    #[test]
    fn test_mask_never_reveals_whole_token() {
        assert_eq!(mask("ghp_supersecret"), "ghp_...");
        // A short secret would fit entirely inside the visible prefix,
        // so nothing of it is shown.
        assert_eq!(mask("abcd"), "****");
        assert_eq!(mask("ab"), "****");
        assert_eq!(mask(""), "****");
    }

    #[tokio::test]
    async fn test_export_import_round_trip_restores_both_collections() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pool = init_db(Some(temp_dir.path().join("test.db"))).await.unwrap();
        let cats = CategoryRepository::new(pool.clone());
        let items = ItemRepository::new(pool.clone());

        let cat = Category::new("Hospitals");
        cats.create(&cat).await.unwrap();
        items
            .create(&InfoItem::new("Health Complex", cat.id).with_address("Aminpur Bazar"))
            .await
            .unwrap();

        // Export the current dataset to a backup file.
        let backup = temp_dir.path().join("backup.json");
        let snapshot = Snapshot::build(cats.list().await.unwrap(), items.list().await.unwrap());
        std::fs::write(&backup, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

        // Wipe the store, then restore from the backup.
        replace_dataset(&pool, &[], &[]).await.unwrap();
        assert!(cats.list().await.unwrap().is_empty());

        let restored: Snapshot =
            serde_json::from_str(&std::fs::read_to_string(&backup).unwrap()).unwrap();
        replace_dataset(&pool, &restored.categories, &restored.items)
            .await
            .unwrap();

        let listed_cats = cats.list().await.unwrap();
        assert_eq!(listed_cats.len(), 1);
        assert_eq!(listed_cats[0].id, cat.id);
        let listed_items = items.list().await.unwrap();
        assert_eq!(listed_items.len(), 1);
        assert_eq!(listed_items[0].title, "Health Complex");
        assert_eq!(listed_items[0].category_id, cat.id);
    }
}
