//! In-memory catalog store.

use std::sync::Arc;

use async_trait::async_trait;
use common::{MenuItemId, RestaurantId, UserId};
use tokio::sync::RwLock;

use crate::menu_item::MenuItem;
use crate::restaurant::Restaurant;
use crate::store::CatalogStore;
use crate::Result;

#[derive(Debug, Default)]
struct CatalogState {
    restaurants: Vec<Restaurant>,
    menu_items: Vec<MenuItem>,
}

/// In-memory catalog store implementation for testing.
///
/// Entities are kept in insertion order, so listings are deterministic.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of restaurants, in any state.
    pub async fn restaurant_count(&self) -> usize {
        self.state.read().await.restaurants.len()
    }

    /// Returns the total number of menu items, in any state.
    pub async fn menu_item_count(&self) -> usize {
        self.state.read().await.menu_items.len()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert_restaurant(&self, restaurant: Restaurant) -> Result<()> {
        self.state.write().await.restaurants.push(restaurant);
        Ok(())
    }

    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        let state = self.state.read().await;
        Ok(state.restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(slot) = state.restaurants.iter_mut().find(|r| r.id == restaurant.id) {
            *slot = restaurant.clone();
        }
        Ok(())
    }

    async fn delete_restaurant(&self, id: RestaurantId) -> Result<()> {
        let mut state = self.state.write().await;
        state.restaurants.retain(|r| r.id != id);
        // Cascade, like the foreign key in the SQL schema.
        state.menu_items.retain(|m| m.restaurant_id != id);
        Ok(())
    }

    async fn restaurant_for_owner(&self, owner_id: UserId) -> Result<Option<Restaurant>> {
        let state = self.state.read().await;
        Ok(state
            .restaurants
            .iter()
            .find(|r| r.owner_id == owner_id)
            .cloned())
    }

    async fn approved_restaurants(&self) -> Result<Vec<Restaurant>> {
        let state = self.state.read().await;
        Ok(state
            .restaurants
            .iter()
            .filter(|r| r.approval.is_approved())
            .cloned()
            .collect())
    }

    async fn pending_restaurants(&self) -> Result<Vec<Restaurant>> {
        let state = self.state.read().await;
        Ok(state
            .restaurants
            .iter()
            .filter(|r| r.approval.is_pending())
            .cloned()
            .collect())
    }

    async fn insert_menu_item(&self, item: MenuItem) -> Result<()> {
        self.state.write().await.menu_items.push(item);
        Ok(())
    }

    async fn menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>> {
        let state = self.state.read().await;
        Ok(state.menu_items.iter().find(|m| m.id == id).cloned())
    }

    async fn update_menu_item(&self, item: &MenuItem) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(slot) = state.menu_items.iter_mut().find(|m| m.id == item.id) {
            *slot = item.clone();
        }
        Ok(())
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<()> {
        let mut state = self.state.write().await;
        state.menu_items.retain(|m| m.id != id);
        Ok(())
    }

    async fn menu_for_restaurant(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>> {
        let state = self.state.read().await;
        Ok(state
            .menu_items
            .iter()
            .filter(|m| m.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn pending_menu_items(&self) -> Result<Vec<MenuItem>> {
        let state = self.state.read().await;
        Ok(state
            .menu_items
            .iter()
            .filter(|m| !m.approved)
            .cloned()
            .collect())
    }
}
