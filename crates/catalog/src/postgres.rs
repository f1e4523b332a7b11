//! PostgreSQL-backed catalog store.

use async_trait::async_trait;
use common::{GeoPoint, MenuItemId, Money, RestaurantId, UserId};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::approval::ApprovalState;
use crate::images::ImagePath;
use crate::menu_item::MenuItem;
use crate::restaurant::Restaurant;
use crate::store::CatalogStore;
use crate::{CatalogError, Result};

/// PostgreSQL-backed catalog store implementation.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Creates a new PostgreSQL catalog store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the catalog tables if they do not exist.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::raw_sql(include_str!("../../../migrations/0001_create_catalog.sql"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_restaurant(row: PgRow) -> Result<Restaurant> {
        let approval: String = row.try_get("approval")?;
        let approval: ApprovalState = approval
            .parse()
            .map_err(|e: String| CatalogError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Restaurant {
            id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("id")?),
            owner_id: UserId::from_uuid(row.try_get::<Uuid, _>("owner_id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            address: row.try_get("address")?,
            cuisine: row.try_get("cuisine")?,
            location: GeoPoint::new(row.try_get("lat")?, row.try_get("lon")?),
            delivery_fee: Money::from_cents(row.try_get("delivery_fee_cents")?),
            delivery_time_minutes: row.try_get::<i32, _>("delivery_time_minutes")? as u32,
            image: row
                .try_get::<Option<String>, _>("image")?
                .map(ImagePath::new),
            approval,
        })
    }

    fn row_to_menu_item(row: PgRow) -> Result<MenuItem> {
        Ok(MenuItem {
            id: MenuItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            restaurant_id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("restaurant_id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: Money::from_cents(row.try_get("price_cents")?),
            image: row
                .try_get::<Option<String>, _>("image")?
                .map(ImagePath::new),
            approved: row.try_get("approved")?,
        })
    }
}

const RESTAURANT_COLUMNS: &str = "id, owner_id, name, description, address, cuisine, lat, lon, \
                                  delivery_fee_cents, delivery_time_minutes, image, approval";

const MENU_ITEM_COLUMNS: &str =
    "id, restaurant_id, name, description, price_cents, image, approved";

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn insert_restaurant(&self, restaurant: Restaurant) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO restaurants
                (id, owner_id, name, description, address, cuisine, lat, lon,
                 delivery_fee_cents, delivery_time_minutes, image, approval)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(restaurant.id.as_uuid())
        .bind(restaurant.owner_id.as_uuid())
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.address)
        .bind(&restaurant.cuisine)
        .bind(restaurant.location.lat)
        .bind(restaurant.location.lon)
        .bind(restaurant.delivery_fee.cents())
        .bind(restaurant.delivery_time_minutes as i32)
        .bind(restaurant.image.as_ref().map(|i| i.as_str().to_string()))
        .bind(restaurant.approval.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        let row = sqlx::query(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_restaurant).transpose()
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE restaurants SET
                name = $2, description = $3, address = $4, cuisine = $5,
                lat = $6, lon = $7, delivery_fee_cents = $8,
                delivery_time_minutes = $9, image = $10, approval = $11
            WHERE id = $1
            "#,
        )
        .bind(restaurant.id.as_uuid())
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.address)
        .bind(&restaurant.cuisine)
        .bind(restaurant.location.lat)
        .bind(restaurant.location.lon)
        .bind(restaurant.delivery_fee.cents())
        .bind(restaurant.delivery_time_minutes as i32)
        .bind(restaurant.image.as_ref().map(|i| i.as_str().to_string()))
        .bind(restaurant.approval.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_restaurant(&self, id: RestaurantId) -> Result<()> {
        // Menu items go with it via ON DELETE CASCADE.
        sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn restaurant_for_owner(&self, owner_id: UserId) -> Result<Option<Restaurant>> {
        let row = sqlx::query(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE owner_id = $1 LIMIT 1"
        ))
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_restaurant).transpose()
    }

    async fn approved_restaurants(&self) -> Result<Vec<Restaurant>> {
        let rows = sqlx::query(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE approval = 'Approved' \
             ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_restaurant).collect()
    }

    async fn pending_restaurants(&self) -> Result<Vec<Restaurant>> {
        let rows = sqlx::query(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants \
             WHERE approval IN ('Submitted', 'NeedsReview') ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_restaurant).collect()
    }

    async fn insert_menu_item(&self, item: MenuItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO menu_items
                (id, restaurant_id, name, description, price_cents, image, approved)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.restaurant_id.as_uuid())
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price.cents())
        .bind(item.image.as_ref().map(|i| i.as_str().to_string()))
        .bind(item.approved)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>> {
        let row = sqlx::query(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_menu_item).transpose()
    }

    async fn update_menu_item(&self, item: &MenuItem) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE menu_items SET
                name = $2, description = $3, price_cents = $4, image = $5, approved = $6
            WHERE id = $1
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price.cents())
        .bind(item.image.as_ref().map(|i| i.as_str().to_string()))
        .bind(item.approved)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<()> {
        sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn menu_for_restaurant(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE restaurant_id = $1 \
             ORDER BY created_at ASC"
        ))
        .bind(restaurant_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_menu_item).collect()
    }

    async fn pending_menu_items(&self) -> Result<Vec<MenuItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE NOT approved \
             ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_menu_item).collect()
    }

    async fn count_menu_items(&self, restaurant_id: RestaurantId) -> Result<usize> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM menu_items WHERE restaurant_id = $1")
                .bind(restaurant_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(count as usize)
    }
}
