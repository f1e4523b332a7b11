//! In-memory order store.

use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, UserId};
use tokio::sync::RwLock;

use crate::order::Order;
use crate::store::OrderStore;
use crate::{OrderingError, Result};

#[derive(Debug, Default)]
struct OrderState {
    orders: Vec<Order>,
    fail_on_insert: bool,
}

/// In-memory order store implementation for testing.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<OrderState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail inserts, for atomicity tests.
    pub async fn set_fail_on_insert(&self, fail: bool) {
        self.state.write().await.fail_on_insert = fail;
    }

    /// Returns the total number of persisted orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<()> {
        let mut state = self.state.write().await;

        if state.fail_on_insert {
            return Err(OrderingError::Database(sqlx::Error::PoolClosed));
        }

        state.orders.push(order.clone());
        Ok(())
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        let state = self.state.read().await;
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| o.user_id == Some(user_id))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{CustomerInfo, OrderLine};
    use common::{MenuItemId, Money};

    fn order_for(user_id: Option<UserId>) -> Order {
        Order {
            id: OrderId::new(),
            user_id,
            customer: CustomerInfo::new("Ana Pop", "12 Main Street", "0722123456"),
            subtotal: Money::from_cents(1800),
            delivery_fee: Money::from_cents(500),
            total: Money::from_cents(2300),
            created_at: chrono::Utc::now(),
            lines: vec![OrderLine {
                menu_item_id: MenuItemId::new(),
                quantity: 2,
                unit_price: Money::from_cents(900),
            }],
        }
    }

    #[tokio::test]
    async fn insert_and_fetch() {
        let store = InMemoryOrderStore::new();
        let order = order_for(None);
        let id = order.id;

        store.insert(&order).await.unwrap();

        let fetched = store.order(id).await.unwrap().unwrap();
        assert_eq!(fetched, order);
        assert!(store.order(OrderId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_history_excludes_guests_and_others() {
        let store = InMemoryOrderStore::new();
        let user = UserId::new();

        store.insert(&order_for(Some(user))).await.unwrap();
        store.insert(&order_for(Some(UserId::new()))).await.unwrap();
        store.insert(&order_for(None)).await.unwrap();

        let history = store.orders_for_user(user).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_id, Some(user));
    }

    #[tokio::test]
    async fn failed_insert_leaves_no_order() {
        let store = InMemoryOrderStore::new();
        store.set_fail_on_insert(true).await;

        let order = order_for(None);
        assert!(store.insert(&order).await.is_err());
        assert_eq!(store.order_count().await, 0);
        assert!(store.order(order.id).await.unwrap().is_none());
    }
}
