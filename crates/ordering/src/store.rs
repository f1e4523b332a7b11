//! Order persistence trait.

use async_trait::async_trait;
use common::{OrderId, UserId};

use crate::order::Order;
use crate::Result;

/// Trait for order persistence.
///
/// `insert` must be atomic over the order header and its lines: either the
/// whole order becomes visible or none of it does.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists an order and all of its lines.
    async fn insert(&self, order: &Order) -> Result<()>;

    /// Fetches an order with its lines.
    async fn order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Lists a user's orders, most recent first.
    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>>;
}
