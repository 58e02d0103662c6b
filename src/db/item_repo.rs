use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::category_repo::{parse_timestamp, parse_uuid};
use crate::models::InfoItem;

pub struct ItemRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    category_id: String,
    title: String,
    address: String,
    phone: Option<String>,
    item_type: Option<String>,
    established: Option<String>,
    specialty: Option<String>,
    timing: Option<String>,
    route: Option<String>,
    details: Option<String>,
    map_link: Option<String>,
    image: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ItemRow {
    fn into_item(self) -> Result<InfoItem, sqlx::Error> {
        Ok(InfoItem {
            id: parse_uuid(&self.id)?,
            category_id: parse_uuid(&self.category_id)?,
            title: self.title,
            address: self.address,
            phone: self.phone,
            item_type: self.item_type,
            established: self.established,
            specialty: self.specialty,
            timing: self.timing,
            route: self.route,
            details: self.details,
            map_link: self.map_link,
            image: self.image,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, item: &InfoItem) -> Result<InfoItem, sqlx::Error> {
        Self::insert(&self.pool, item).await?;
        Ok(item.clone())
    }

    pub(super) async fn insert<'e, E>(executor: E, item: &InfoItem) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO items (id, category_id, title, address, phone, item_type, established,
                               specialty, timing, route, details, map_link, image, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id.to_string())
        .bind(item.category_id.to_string())
        .bind(&item.title)
        .bind(&item.address)
        .bind(&item.phone)
        .bind(&item.item_type)
        .bind(&item.established)
        .bind(&item.specialty)
        .bind(&item.timing)
        .bind(&item.route)
        .bind(&item.details)
        .bind(&item.map_link)
        .bind(&item.image)
        .bind(item.created_at.to_rfc3339())
        .bind(item.updated_at.to_rfc3339())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<InfoItem>, sqlx::Error> {
        let row: Option<ItemRow> = sqlx::query_as("SELECT * FROM items WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ItemRow::into_item).transpose()
    }

    pub async fn get_by_title(&self, title: &str) -> Result<Option<InfoItem>, sqlx::Error> {
        let row: Option<ItemRow> =
            sqlx::query_as("SELECT * FROM items WHERE title = ? COLLATE NOCASE")
                .bind(title)
                .fetch_optional(&self.pool)
                .await?;

        row.map(ItemRow::into_item).transpose()
    }

    pub async fn list(&self) -> Result<Vec<InfoItem>, sqlx::Error> {
        let rows: Vec<ItemRow> = sqlx::query_as("SELECT * FROM items ORDER BY title")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    pub async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<InfoItem>, sqlx::Error> {
        let rows: Vec<ItemRow> =
            sqlx::query_as("SELECT * FROM items WHERE category_id = ? ORDER BY title")
                .bind(category_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    /// Case-insensitive search over title and address.
    pub async fn search(&self, term: &str) -> Result<Vec<InfoItem>, sqlx::Error> {
        let pattern = format!("%{}%", term);
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT * FROM items WHERE title LIKE ? COLLATE NOCASE OR address LIKE ? COLLATE NOCASE ORDER BY title",
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    pub async fn update(&self, item: &InfoItem) -> Result<InfoItem, sqlx::Error> {
        let mut updated = item.clone();
        updated.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE items
            SET category_id = ?, title = ?, address = ?, phone = ?, item_type = ?, established = ?,
                specialty = ?, timing = ?, route = ?, details = ?, map_link = ?, image = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(updated.category_id.to_string())
        .bind(&updated.title)
        .bind(&updated.address)
        .bind(&updated.phone)
        .bind(&updated.item_type)
        .bind(&updated.established)
        .bind(&updated.specialty)
        .bind(&updated.timing)
        .bind(&updated.route)
        .bind(&updated.details)
        .bind(&updated.map_link)
        .bind(&updated.image)
        .bind(updated.updated_at.to_rfc3339())
        .bind(updated.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Item counts grouped by category id, orphans included.
    pub async fn count_by_category(&self) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT category_id, COUNT(*) FROM items GROUP BY category_id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(id, count)| Ok((parse_uuid(&id)?, count)))
            .collect()
    }

}
