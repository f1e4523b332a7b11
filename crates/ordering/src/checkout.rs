//! Checkout: turning a session cart into a persisted order.

use common::{GeoPoint, OrderId, SessionToken, UserId};
use tracing::{info, instrument, warn};

use crate::cart::CartStore;
use crate::order::{CustomerInfo, Order};
use crate::pricing::DeliveryPolicy;
use crate::store::OrderStore;
use crate::{OrderingError, Result};

/// Service that prices and materializes orders from session carts.
pub struct CheckoutService<O, CS> {
    orders: O,
    carts: CS,
    policy: DeliveryPolicy,
}

impl<O: OrderStore, CS: CartStore> CheckoutService<O, CS> {
    /// Creates a checkout service with the default delivery policy.
    pub fn new(orders: O, carts: CS) -> Self {
        Self::with_policy(orders, carts, DeliveryPolicy::default())
    }

    /// Creates a checkout service with an explicit delivery policy.
    pub fn with_policy(orders: O, carts: CS, policy: DeliveryPolicy) -> Self {
        Self {
            orders,
            carts,
            policy,
        }
    }

    pub fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// Places an order from the session cart.
    ///
    /// Validates the cart and customer details, prices the delivery,
    /// persists the order atomically and only then clears the cart. On any
    /// failure the cart is left intact so the customer can retry.
    #[instrument(skip(self, customer), fields(session = %token))]
    pub async fn checkout(
        &self,
        token: SessionToken,
        customer: CustomerInfo,
        user_id: Option<UserId>,
        restaurant_coords: GeoPoint,
        visitor_coords: GeoPoint,
    ) -> Result<Order> {
        let cart = self.carts.load(token).await?;
        if cart.is_empty() {
            return Err(OrderingError::EmptyCart);
        }
        customer.validate()?;

        let quote = self.policy.quote(&cart, restaurant_coords, visitor_coords)?;
        let order = Order::materialize(&cart, &quote, customer, user_id);

        if let Err(e) = self.orders.insert(&order).await {
            metrics::counter!("ordering_checkouts_failed").increment(1);
            warn!(order_id = %order.id, "order insert failed, cart retained");
            return Err(e);
        }

        // The order is committed at this point; a failed cart clear must
        // not look like a failed checkout or the customer will retry and
        // order twice. The stale cart is left for the session layer.
        if let Err(e) = self.carts.clear(token).await {
            warn!(order_id = %order.id, error = %e, "cart clear failed after order commit");
        }

        metrics::counter!("ordering_orders_placed").increment(1);
        metrics::histogram!("ordering_order_total_cents").record(order.total.cents() as f64);
        info!(
            order_id = %order.id,
            total = %order.total,
            distance_km = quote.distance_km,
            "order placed"
        );
        Ok(order)
    }

    /// Fetches a placed order for confirmation display.
    pub async fn order(&self, id: OrderId) -> Result<Order> {
        self.orders
            .order(id)
            .await?
            .ok_or(OrderingError::OrderNotFound { id })
    }

    /// Lists a user's order history, most recent first.
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        self.orders.orders_for_user(user_id).await
    }
}
