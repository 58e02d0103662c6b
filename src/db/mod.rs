mod category_repo;
mod item_repo;

pub use category_repo::CategoryRepository;
pub use item_repo::ItemRepository;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::{Category, InfoItem};

/// Initialize the database connection pool and run migrations
pub async fn init_db(db_path: Option<PathBuf>) -> Result<SqlitePool, sqlx::Error> {
    let path = db_path.expect("database_path must be provided");

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create database directory");
    }

    let db_url = format!("sqlite:{}?mode=rwc", path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Replaces both collections in a single transaction. Used when a snapshot
/// is restored from the remote replica or a backup file: either the whole
/// dataset is swapped in or the existing store is left untouched.
pub async fn replace_dataset(
    pool: &SqlitePool,
    categories: &[Category],
    items: &[InfoItem],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM items").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM categories").execute(&mut *tx).await?;

    for category in categories {
        CategoryRepository::insert(&mut *tx, category).await?;
    }
    for item in items {
        ItemRepository::insert(&mut *tx, item).await?;
    }

    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_db_creates_tables() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let pool = init_db(Some(db_path)).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name NOT LIKE '_sqlx_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let table_names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert!(table_names.contains(&"categories"));
        assert!(table_names.contains(&"items"));
    }

    #[tokio::test]
    async fn test_replace_dataset_swaps_both_collections() {
        let temp_dir = tempdir().unwrap();
        let pool = init_db(Some(temp_dir.path().join("test.db"))).await.unwrap();
        let cats = CategoryRepository::new(pool.clone());
        let items = ItemRepository::new(pool.clone());

        cats.create(&Category::new("Old Category")).await.unwrap();
        items
            .create(&InfoItem::new("Old Entry", uuid::Uuid::new_v4()))
            .await
            .unwrap();

        let new_cat = Category::new("Hospitals");
        let replacement_items = vec![
            InfoItem::new("Health Complex", new_cat.id),
            InfoItem::new("Bus Stand", new_cat.id),
        ];
        replace_dataset(&pool, &[new_cat.clone()], &replacement_items)
            .await
            .unwrap();

        let listed_cats = cats.list().await.unwrap();
        assert_eq!(listed_cats.len(), 1);
        assert_eq!(listed_cats[0].name, "Hospitals");
        assert_eq!(items.list_by_category(new_cat.id).await.unwrap().len(), 2);
        assert!(items.get_by_title("Old Entry").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_dataset_rolls_back_on_failure() {
        let temp_dir = tempdir().unwrap();
        let pool = init_db(Some(temp_dir.path().join("test.db"))).await.unwrap();
        let cats = CategoryRepository::new(pool.clone());
        let items = ItemRepository::new(pool.clone());

        let old_cat = Category::new("Old Category");
        cats.create(&old_cat).await.unwrap();
        items
            .create(&InfoItem::new("Old Entry", old_cat.id))
            .await
            .unwrap();

        // A duplicate item id hits the primary key constraint partway
        // through the insert loop.
        let dup = InfoItem::new("Duplicate", old_cat.id);
        let result =
            replace_dataset(&pool, &[Category::new("New Category")], &[dup.clone(), dup]).await;
        assert!(result.is_err());

        // The store must still hold the old pair, not new categories
        // next to old items.
        let listed_cats = cats.list().await.unwrap();
        assert_eq!(listed_cats.len(), 1);
        assert_eq!(listed_cats[0].name, "Old Category");
        let listed_items = items.list().await.unwrap();
        assert_eq!(listed_items.len(), 1);
        assert_eq!(listed_items[0].title, "Old Entry");
    }
}
