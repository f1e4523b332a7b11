//! Session carts.
//!
//! A cart belongs to a visitor session and holds denormalized snapshots of
//! the menu items added to it. Prices and names are copied at add time so a
//! later catalog edit does not silently change what the customer agreed to
//! pay; the snapshot is what checkout materializes into an order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use catalog::{CatalogStore, ImagePath};
use common::{MenuItemId, Money, RestaurantId, SessionToken};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{OrderingError, Result};

/// A single cart line: item reference plus the snapshot taken when it was
/// added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub menu_item_id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub restaurant_name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub image: Option<ImagePath>,
    /// The restaurant's flat display fee at add time. Informational; the
    /// charged fee comes from the distance-based quote at checkout.
    pub delivery_fee: Money,
}

/// An insertion-ordered collection of cart lines.
///
/// The supported flow keeps all lines from a single restaurant; see
/// [`Cart::restaurant_of`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    /// Sum of `unit_price × quantity` over all lines.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .map(|line| line.unit_price.times(line.quantity))
            .sum()
    }

    /// The restaurant the cart is ordering from: the first line's, `None`
    /// for an empty cart.
    pub fn restaurant_of(&self) -> Option<RestaurantId> {
        self.lines.first().map(|line| line.restaurant_id)
    }

    /// Adds a snapshot line, incrementing quantity if the item is already
    /// in the cart.
    pub fn add(&mut self, item: CartItem) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.menu_item_id == item.menu_item_id)
        {
            Some(line) => line.quantity += item.quantity,
            None => self.lines.push(item),
        }
    }

    /// Removes the line for the given item. Absent lines are a no-op.
    pub fn remove(&mut self, menu_item_id: MenuItemId) {
        self.lines.retain(|line| line.menu_item_id != menu_item_id);
    }
}

/// Trait for session cart persistence, keyed by [`SessionToken`].
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Loads the cart for a session; an unknown session has an empty cart.
    async fn load(&self, token: SessionToken) -> Result<Cart>;

    /// Saves the cart for a session, replacing any previous contents.
    async fn save(&self, token: SessionToken, cart: &Cart) -> Result<()>;

    /// Drops the cart for a session.
    async fn clear(&self, token: SessionToken) -> Result<()>;
}

#[derive(Debug, Default)]
struct CartSessions {
    sessions: HashMap<SessionToken, String>,
    fail_on_clear: bool,
}

/// In-memory cart store.
///
/// Carts are kept as serialized JSON per session, the same shape a cookie
/// or external session backend would hold.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStore {
    state: Arc<RwLock<CartSessions>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of sessions currently holding a cart.
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    /// Configures the store to fail clears, for checkout failure tests.
    pub async fn set_fail_on_clear(&self, fail: bool) {
        self.state.write().await.fail_on_clear = fail;
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(&self, token: SessionToken) -> Result<Cart> {
        let state = self.state.read().await;
        match state.sessions.get(&token) {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Cart::new()),
        }
    }

    async fn save(&self, token: SessionToken, cart: &Cart) -> Result<()> {
        let json = serde_json::to_string(cart)?;
        self.state.write().await.sessions.insert(token, json);
        Ok(())
    }

    async fn clear(&self, token: SessionToken) -> Result<()> {
        let mut state = self.state.write().await;

        if state.fail_on_clear {
            return Err(OrderingError::Database(sqlx::Error::PoolClosed));
        }

        state.sessions.remove(&token);
        Ok(())
    }
}

/// Cart operations backed by the live catalog.
///
/// The catalog is consulted only at add time, to take the snapshot; all
/// other operations work on the stored cart alone.
pub struct CartService<CS, CAT> {
    carts: CS,
    catalog: CAT,
}

impl<CS: CartStore, CAT: CatalogStore> CartService<CS, CAT> {
    pub fn new(carts: CS, catalog: CAT) -> Self {
        Self { carts, catalog }
    }

    /// Adds one unit of a menu item to the session cart.
    ///
    /// Resolves the live item and its restaurant to take the snapshot;
    /// adding an item already in the cart increments its quantity.
    #[instrument(skip(self), fields(session = %token))]
    pub async fn add(&self, token: SessionToken, menu_item_id: MenuItemId) -> Result<Cart> {
        let item = self
            .catalog
            .menu_item(menu_item_id)
            .await?
            .ok_or(OrderingError::MenuItemNotFound { id: menu_item_id })?;
        let restaurant = self
            .catalog
            .restaurant(item.restaurant_id)
            .await?
            .ok_or(OrderingError::MenuItemNotFound { id: menu_item_id })?;

        let mut cart = self.carts.load(token).await?;
        cart.add(CartItem {
            menu_item_id,
            restaurant_id: restaurant.id,
            name: item.name,
            restaurant_name: restaurant.name,
            unit_price: item.price,
            quantity: 1,
            image: item.image,
            delivery_fee: restaurant.delivery_fee,
        });
        self.carts.save(token, &cart).await?;

        debug!(lines = cart.lines().len(), "item added to cart");
        Ok(cart)
    }

    /// Removes a menu item's line from the session cart. Removing an item
    /// that is not in the cart is a no-op.
    #[instrument(skip(self), fields(session = %token))]
    pub async fn remove(&self, token: SessionToken, menu_item_id: MenuItemId) -> Result<Cart> {
        let mut cart = self.carts.load(token).await?;
        cart.remove(menu_item_id);
        self.carts.save(token, &cart).await?;
        Ok(cart)
    }

    /// Returns the session's current cart; empty for an unknown session.
    pub async fn get(&self, token: SessionToken) -> Result<Cart> {
        self.carts.load(token).await
    }

    /// Empties the session's cart.
    pub async fn clear(&self, token: SessionToken) -> Result<()> {
        self.carts.clear(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{InMemoryCatalogStore, MenuItem, MenuItemDraft, Restaurant, RestaurantDraft};
    use common::UserId;

    fn line(id: MenuItemId, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            menu_item_id: id,
            restaurant_id: RestaurantId::new(),
            name: "Item".to_string(),
            restaurant_name: "Casa Mia".to_string(),
            unit_price: Money::from_cents(cents),
            quantity,
            image: None,
            delivery_fee: Money::from_cents(300),
        }
    }

    #[test]
    fn add_increments_existing_line() {
        let mut cart = Cart::new();
        let id = MenuItemId::new();

        cart.add(line(id, 900, 1));
        cart.add(line(id, 900, 1));
        cart.add(line(MenuItemId::new(), 500, 2));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.subtotal().cents(), 2 * 900 + 2 * 500);
    }

    #[test]
    fn remove_absent_line_is_noop() {
        let mut cart = Cart::new();
        cart.add(line(MenuItemId::new(), 900, 1));

        cart.remove(MenuItemId::new());
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn restaurant_of_first_line() {
        let mut cart = Cart::new();
        assert!(cart.restaurant_of().is_none());

        let first = line(MenuItemId::new(), 900, 1);
        let rid = first.restaurant_id;
        cart.add(first);
        cart.add(line(MenuItemId::new(), 500, 1));

        assert_eq!(cart.restaurant_of(), Some(rid));
    }

    #[test]
    fn cart_serializes_roundtrip() {
        let mut cart = Cart::new();
        cart.add(line(MenuItemId::new(), 900, 3));

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    async fn seeded_catalog() -> (InMemoryCatalogStore, MenuItemId) {
        let store = InMemoryCatalogStore::new();
        let restaurant = Restaurant::create(
            UserId::new(),
            RestaurantDraft {
                name: "Casa Mia".to_string(),
                delivery_fee: Money::from_cents(300),
                ..Default::default()
            },
        )
        .unwrap();
        let item = MenuItem::create(
            restaurant.id,
            MenuItemDraft {
                name: "Margherita".to_string(),
                price: Money::from_cents(900),
                ..Default::default()
            },
        )
        .unwrap();
        let item_id = item.id;

        store.insert_restaurant(restaurant).await.unwrap();
        store.insert_menu_item(item).await.unwrap();
        (store, item_id)
    }

    #[tokio::test]
    async fn service_snapshots_live_catalog_data() {
        let (catalog, item_id) = seeded_catalog().await;
        let service = CartService::new(InMemoryCartStore::new(), catalog);
        let token = SessionToken::new();

        let cart = service.add(token, item_id).await.unwrap();

        assert_eq!(cart.lines().len(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.name, "Margherita");
        assert_eq!(line.restaurant_name, "Casa Mia");
        assert_eq!(line.unit_price.cents(), 900);
        assert_eq!(line.delivery_fee.cents(), 300);
        assert_eq!(line.quantity, 1);
    }

    #[tokio::test]
    async fn service_rejects_unknown_item() {
        let (catalog, _) = seeded_catalog().await;
        let service = CartService::new(InMemoryCartStore::new(), catalog);

        let result = service.add(SessionToken::new(), MenuItemId::new()).await;
        assert!(matches!(
            result,
            Err(OrderingError::MenuItemNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn snapshot_price_survives_catalog_edit() {
        let (catalog, item_id) = seeded_catalog().await;
        let service = CartService::new(InMemoryCartStore::new(), catalog.clone());
        let token = SessionToken::new();

        service.add(token, item_id).await.unwrap();

        // Owner raises the price after the item was carted.
        let mut item = catalog.menu_item(item_id).await.unwrap().unwrap();
        item.price = Money::from_cents(1500);
        catalog.update_menu_item(&item).await.unwrap();

        let cart = service.get(token).await.unwrap();
        assert_eq!(cart.lines()[0].unit_price.cents(), 900);

        // A second add of the same item only bumps quantity; it does not
        // reprice the existing line.
        let cart = service.add(token, item_id).await.unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].unit_price.cents(), 900);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let (catalog, item_id) = seeded_catalog().await;
        let store = InMemoryCartStore::new();
        let service = CartService::new(store.clone(), catalog);
        let a = SessionToken::new();
        let b = SessionToken::new();

        service.add(a, item_id).await.unwrap();

        assert!(service.get(b).await.unwrap().is_empty());
        assert_eq!(store.session_count().await, 1);

        service.clear(a).await.unwrap();
        assert!(service.get(a).await.unwrap().is_empty());
        assert_eq!(store.session_count().await, 0);
    }
}
