//! Catalog persistence trait.

use async_trait::async_trait;
use common::{MenuItemId, RestaurantId, UserId};

use crate::menu_item::MenuItem;
use crate::restaurant::Restaurant;
use crate::Result;

/// Persistence operations over restaurants and menu items.
///
/// Implementations must be thread-safe (`Send + Sync`). Writes are
/// single-row and last-write-wins; the catalog has no multi-row
/// transactions. Deleting a restaurant cascades to its menu items.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Inserts a new restaurant.
    async fn insert_restaurant(&self, restaurant: Restaurant) -> Result<()>;

    /// Fetches a restaurant by id.
    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>>;

    /// Replaces a restaurant row.
    async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<()>;

    /// Deletes a restaurant and all its menu items.
    async fn delete_restaurant(&self, id: RestaurantId) -> Result<()>;

    /// Fetches the restaurant owned by a user, if any (one per owner).
    async fn restaurant_for_owner(&self, owner_id: UserId) -> Result<Option<Restaurant>>;

    /// Lists publicly visible (approved) restaurants.
    async fn approved_restaurants(&self) -> Result<Vec<Restaurant>>;

    /// Lists restaurants awaiting review (submitted or edited-after-approval).
    async fn pending_restaurants(&self) -> Result<Vec<Restaurant>>;

    /// Inserts a new menu item.
    async fn insert_menu_item(&self, item: MenuItem) -> Result<()>;

    /// Fetches a menu item by id.
    async fn menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>>;

    /// Replaces a menu item row.
    async fn update_menu_item(&self, item: &MenuItem) -> Result<()>;

    /// Deletes a menu item.
    async fn delete_menu_item(&self, id: MenuItemId) -> Result<()>;

    /// Lists all menu items of a restaurant, approved or not.
    async fn menu_for_restaurant(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>>;

    /// Lists unapproved menu items across all restaurants.
    async fn pending_menu_items(&self) -> Result<Vec<MenuItem>>;

    /// Counts the menu items of a restaurant.
    async fn count_menu_items(&self, restaurant_id: RestaurantId) -> Result<usize> {
        Ok(self.menu_for_restaurant(restaurant_id).await?.len())
    }
}
