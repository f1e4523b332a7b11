//! Orders: the immutable record produced by checkout.

use chrono::{DateTime, Utc};
use common::{MenuItemId, Money, OrderId, UserId};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::pricing::Quote;
use crate::{OrderingError, Result};

/// Delivery contact details supplied at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl CustomerInfo {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// Checks that every field a courier needs is present.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OrderingError::IncompleteCustomerInfo { field: "name" });
        }
        if self.address.trim().is_empty() {
            return Err(OrderingError::IncompleteCustomerInfo { field: "address" });
        }
        if self.phone.trim().is_empty() {
            return Err(OrderingError::IncompleteCustomerInfo { field: "phone" });
        }
        Ok(())
    }
}

/// One ordered item, priced as of the moment it was added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub unit_price: Money,
}

/// A placed order. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The account that placed the order; `None` for guest checkout.
    pub user_id: Option<UserId>,
    pub customer: CustomerInfo,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Materializes an order from a priced cart.
    ///
    /// Lines carry the cart's snapshot prices; nothing is re-read from the
    /// catalog.
    pub fn materialize(
        cart: &Cart,
        quote: &Quote,
        customer: CustomerInfo,
        user_id: Option<UserId>,
    ) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Self {
            id: OrderId::new(),
            user_id,
            customer,
            subtotal: quote.subtotal,
            delivery_fee: quote.delivery_fee,
            total: quote.total,
            created_at: Utc::now(),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::pricing::DeliveryPolicy;
    use common::{GeoPoint, RestaurantId};

    fn customer() -> CustomerInfo {
        CustomerInfo::new("Ana Pop", "12 Main Street", "0722123456")
    }

    #[test]
    fn customer_info_validation() {
        assert!(customer().validate().is_ok());

        let blank_name = CustomerInfo::new("  ", "12 Main Street", "0722123456");
        assert!(matches!(
            blank_name.validate(),
            Err(OrderingError::IncompleteCustomerInfo { field: "name" })
        ));

        let blank_address = CustomerInfo::new("Ana", "", "0722123456");
        assert!(matches!(
            blank_address.validate(),
            Err(OrderingError::IncompleteCustomerInfo { field: "address" })
        ));

        let blank_phone = CustomerInfo::new("Ana", "12 Main Street", " ");
        assert!(matches!(
            blank_phone.validate(),
            Err(OrderingError::IncompleteCustomerInfo { field: "phone" })
        ));
    }

    #[test]
    fn materialize_copies_cart_prices() {
        let mut cart = Cart::new();
        let item_id = MenuItemId::new();
        cart.add(CartItem {
            menu_item_id: item_id,
            restaurant_id: RestaurantId::new(),
            name: "Margherita".to_string(),
            restaurant_name: "Casa Mia".to_string(),
            unit_price: Money::from_cents(900),
            quantity: 2,
            image: None,
            delivery_fee: Money::from_cents(300),
        });

        let here = GeoPoint::new(44.4268, 26.1025);
        let quote = DeliveryPolicy::default().quote(&cart, here, here).unwrap();
        let order = Order::materialize(&cart, &quote, customer(), None);

        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].menu_item_id, item_id);
        assert_eq!(order.lines[0].quantity, 2);
        assert_eq!(order.lines[0].unit_price.cents(), 900);
        assert_eq!(order.subtotal.cents(), 1800);
        assert_eq!(order.delivery_fee, DeliveryPolicy::default().base_fee);
        assert_eq!(order.total, order.subtotal + order.delivery_fee);
        assert!(order.user_id.is_none());
    }
}
