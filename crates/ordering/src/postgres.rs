//! PostgreSQL-backed order store.

use async_trait::async_trait;
use common::{MenuItemId, Money, OrderId, UserId};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::order::{CustomerInfo, Order, OrderLine};
use crate::store::OrderStore;
use crate::Result;

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the order tables if they do not exist.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::raw_sql(include_str!("../../../migrations/0002_create_orders.sql"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_order(row: PgRow, lines: Vec<OrderLine>) -> Result<Order> {
        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            user_id: row
                .try_get::<Option<Uuid>, _>("user_id")?
                .map(UserId::from_uuid),
            customer: CustomerInfo {
                name: row.try_get("customer_name")?,
                address: row.try_get("customer_address")?,
                phone: row.try_get("customer_phone")?,
            },
            subtotal: Money::from_cents(row.try_get("subtotal_cents")?),
            delivery_fee: Money::from_cents(row.try_get("delivery_fee_cents")?),
            total: Money::from_cents(row.try_get("total_cents")?),
            created_at: row.try_get("created_at")?,
            lines,
        })
    }

    fn row_to_line(row: PgRow) -> Result<OrderLine> {
        Ok(OrderLine {
            menu_item_id: MenuItemId::from_uuid(row.try_get::<Uuid, _>("menu_item_id")?),
            quantity: row.try_get::<i32, _>("quantity")? as u32,
            unit_price: Money::from_cents(row.try_get("unit_price_cents")?),
        })
    }

    async fn lines_for(&self, order_id: OrderId) -> Result<Vec<OrderLine>> {
        let rows = sqlx::query(
            "SELECT menu_item_id, quantity, unit_price_cents FROM order_lines \
             WHERE order_id = $1 ORDER BY position ASC",
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_line).collect()
    }
}

const ORDER_COLUMNS: &str = "id, user_id, customer_name, customer_address, customer_phone, \
                             subtotal_cents, delivery_fee_cents, total_cents, created_at";

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: &Order) -> Result<()> {
        // Header and lines in one transaction; a partial order must never
        // become visible.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders
                (id, user_id, customer_name, customer_address, customer_phone,
                 subtotal_cents, delivery_fee_cents, total_cents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.map(|u| u.as_uuid()))
        .bind(&order.customer.name)
        .bind(&order.customer.address)
        .bind(&order.customer.phone)
        .bind(order.subtotal.cents())
        .bind(order.delivery_fee.cents())
        .bind(order.total.cents())
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for (position, line) in order.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_lines
                    (order_id, position, menu_item_id, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order.id.as_uuid())
            .bind(position as i32)
            .bind(line.menu_item_id.as_uuid())
            .bind(line.quantity as i32)
            .bind(line.unit_price.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let lines = self.lines_for(id).await?;
                Ok(Some(Self::row_to_order(row, lines)?))
            }
            None => Ok(None),
        }
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let id = OrderId::from_uuid(row.try_get::<Uuid, _>("id")?);
            let lines = self.lines_for(id).await?;
            orders.push(Self::row_to_order(row, lines)?);
        }
        Ok(orders)
    }
}
