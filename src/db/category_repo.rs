use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Category, Color, Icon};

pub struct CategoryRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    description: String,
    icon: String,
    color: String,
    image: Option<String>,
    created_at: String,
    updated_at: String,
}

impl CategoryRow {
    fn into_category(self) -> Result<Category, sqlx::Error> {
        Ok(Category {
            id: parse_uuid(&self.id)?,
            name: self.name,
            description: self.description,
            // Symbolic names map onto a closed enum; anything stored by a
            // newer or older version degrades to Unknown, never an error.
            icon: Icon::parse(&self.icon),
            color: Color::parse(&self.color),
            image: self.image,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

pub(super) fn parse_uuid(s: &str) -> Result<Uuid, sqlx::Error> {
    Uuid::parse_str(s).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

pub(super) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, category: &Category) -> Result<Category, sqlx::Error> {
        Self::insert(&self.pool, category).await?;
        Ok(category.clone())
    }

    pub(super) async fn insert<'e, E>(executor: E, category: &Category) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, icon, color, image, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(category.id.to_string())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.icon.to_string())
        .bind(category.color.to_string())
        .bind(&category.image)
        .bind(category.created_at.to_rfc3339())
        .bind(category.updated_at.to_rfc3339())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>, sqlx::Error> {
        let row: Option<CategoryRow> = sqlx::query_as("SELECT * FROM categories WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(CategoryRow::into_category).transpose()
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT * FROM categories WHERE name = ? COLLATE NOCASE")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        row.map(CategoryRow::into_category).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Category>, sqlx::Error> {
        let rows: Vec<CategoryRow> = sqlx::query_as("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CategoryRow::into_category).collect()
    }

    pub async fn update(&self, category: &Category) -> Result<Category, sqlx::Error> {
        let mut updated = category.clone();
        updated.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE categories
            SET name = ?, description = ?, icon = ?, color = ?, image = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&updated.name)
        .bind(&updated.description)
        .bind(updated.icon.to_string())
        .bind(updated.color.to_string())
        .bind(&updated.image)
        .bind(updated.updated_at.to_rfc3339())
        .bind(updated.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Deletes a category. Items referencing it are left untouched; they
    /// become orphans and display as uncategorized.
    pub async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use tempfile::tempdir;

    async fn test_repo() -> (tempfile::TempDir, CategoryRepository) {
        let temp_dir = tempdir().unwrap();
        let pool = init_db(Some(temp_dir.path().join("test.db"))).await.unwrap();
        (temp_dir, CategoryRepository::new(pool))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_dir, repo) = test_repo().await;

        let cat = Category::new("Hospitals")
            .with_description("Hospitals and clinics")
            .with_icon(Icon::Hospital)
            .with_color(Color::Green);
        repo.create(&cat).await.unwrap();

        let fetched = repo.get_by_id(cat.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Hospitals");
        assert_eq!(fetched.icon, Icon::Hospital);
        assert_eq!(fetched.color, Color::Green);

        let by_name = repo.get_by_name("hospitals").await.unwrap().unwrap();
        assert_eq!(by_name.id, cat.id);
    }

    #[tokio::test]
    async fn test_update() {
        let (_dir, repo) = test_repo().await;

        let cat = Category::new("Schols");
        repo.create(&cat).await.unwrap();

        let mut cat = repo.get_by_id(cat.id).await.unwrap().unwrap();
        cat.name = "Schools".to_string();
        cat.icon = Icon::School;
        let updated = repo.update(&cat).await.unwrap();
        assert!(updated.updated_at >= updated.created_at);

        let fetched = repo.get_by_id(cat.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Schools");
        assert_eq!(fetched.icon, Icon::School);
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let (_dir, repo) = test_repo().await;

        let cat = Category::new("Transport");
        repo.create(&cat).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete(cat.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.get_by_id(cat.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_icon_in_store_degrades() {
        let (_dir, repo) = test_repo().await;

        let cat = Category::new("Misc");
        repo.create(&cat).await.unwrap();

        // Simulate a row written by a newer version with an icon this
        // build does not know about.
        sqlx::query("UPDATE categories SET icon = 'hologram' WHERE id = ?")
            .bind(cat.id.to_string())
            .execute(&repo.pool)
            .await
            .unwrap();

        let fetched = repo.get_by_id(cat.id).await.unwrap().unwrap();
        assert_eq!(fetched.icon, Icon::Unknown);
    }
}
