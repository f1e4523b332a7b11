//! Catalog service: the gated approval-workflow operations.
//!
//! Role and ownership checks assume the surrounding application has already
//! authenticated the caller and established an [`Actor`]; the service
//! re-checks ownership and role so a confused deputy cannot mutate someone
//! else's restaurant, and returns `Forbidden` instead of panicking on
//! precondition violations.

use common::{Actor, MenuItemId, RestaurantId};
use tracing::{info, instrument, warn};

use crate::images::ImageStore;
use crate::menu_item::{MenuItem, MenuItemDraft, MenuItemUpdate};
use crate::restaurant::{Restaurant, RestaurantDraft, RestaurantUpdate};
use crate::store::CatalogStore;
use crate::{CatalogError, Result};

/// Service for managing restaurants and menu items through the approval
/// workflow.
pub struct CatalogService<S, I> {
    store: S,
    images: I,
}

impl<S: CatalogStore, I: ImageStore> CatalogService<S, I> {
    /// Creates a new catalog service over a store and an image collaborator.
    pub fn new(store: S, images: I) -> Self {
        Self { store, images }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // Owner operations

    /// Creates a restaurant profile in the `Draft` state.
    #[instrument(skip(self, draft), fields(owner = %actor.user_id))]
    pub async fn create_restaurant(
        &self,
        actor: &Actor,
        draft: RestaurantDraft,
    ) -> Result<Restaurant> {
        if !actor.is_owner_role() {
            return Err(CatalogError::Forbidden {
                action: "create restaurant",
            });
        }

        let restaurant = Restaurant::create(actor.user_id, draft)?;
        self.store.insert_restaurant(restaurant.clone()).await?;

        info!(restaurant_id = %restaurant.id, "restaurant created");
        Ok(restaurant)
    }

    /// Applies an owner edit and sends the restaurant back for review.
    #[instrument(skip(self, update), fields(restaurant_id = %id))]
    pub async fn edit_restaurant(
        &self,
        actor: &Actor,
        id: RestaurantId,
        update: RestaurantUpdate,
    ) -> Result<Restaurant> {
        let mut restaurant = self.owned_restaurant(actor, id, "edit restaurant").await?;

        let replaced = restaurant.apply_update(update)?;
        self.store.update_restaurant(&restaurant).await?;

        if let Some(old_image) = replaced {
            self.images.remove(&old_image).await?;
        }

        info!(state = %restaurant.approval, "restaurant edited");
        Ok(restaurant)
    }

    /// Submits a restaurant for administrative review.
    ///
    /// Fails with [`CatalogError::NoMenuItems`] when the menu is empty.
    #[instrument(skip(self), fields(restaurant_id = %id))]
    pub async fn submit_restaurant(&self, actor: &Actor, id: RestaurantId) -> Result<Restaurant> {
        let mut restaurant = self.owned_restaurant(actor, id, "submit restaurant").await?;

        let item_count = self.store.count_menu_items(id).await?;
        restaurant.submit(item_count)?;
        self.store.update_restaurant(&restaurant).await?;

        metrics::counter!("catalog_restaurants_submitted").increment(1);
        info!("restaurant submitted for review");
        Ok(restaurant)
    }

    /// Fetches the restaurant owned by the acting user, if any.
    pub async fn restaurant_for_owner(&self, actor: &Actor) -> Result<Option<Restaurant>> {
        self.store.restaurant_for_owner(actor.user_id).await
    }

    /// Adds an unapproved menu item to the actor's restaurant.
    #[instrument(skip(self, draft), fields(restaurant_id = %restaurant_id))]
    pub async fn add_menu_item(
        &self,
        actor: &Actor,
        restaurant_id: RestaurantId,
        draft: MenuItemDraft,
    ) -> Result<MenuItem> {
        self.owned_restaurant(actor, restaurant_id, "add menu item")
            .await?;

        let item = MenuItem::create(restaurant_id, draft)?;
        self.store.insert_menu_item(item.clone()).await?;

        info!(menu_item_id = %item.id, "menu item created");
        Ok(item)
    }

    /// Applies an owner edit to a menu item.
    ///
    /// A price change resets the item's approval; other edits do not.
    #[instrument(skip(self, update), fields(menu_item_id = %id))]
    pub async fn edit_menu_item(
        &self,
        actor: &Actor,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem> {
        let mut item = self.menu_item_or_not_found(id).await?;
        self.owned_restaurant(actor, item.restaurant_id, "edit menu item")
            .await?;

        let replaced = item.apply_update(update)?;
        self.store.update_menu_item(&item).await?;

        if let Some(old_image) = replaced {
            self.images.remove(&old_image).await?;
        }

        Ok(item)
    }

    /// Deletes a menu item and its stored image.
    ///
    /// Allowed for the owning restaurant's user and for administrators.
    #[instrument(skip(self), fields(menu_item_id = %id))]
    pub async fn delete_menu_item(&self, actor: &Actor, id: MenuItemId) -> Result<()> {
        let item = self.menu_item_or_not_found(id).await?;

        if !actor.is_admin() {
            self.owned_restaurant(actor, item.restaurant_id, "delete menu item")
                .await?;
        }

        if let Some(image) = &item.image {
            self.images.remove(image).await?;
        }
        self.store.delete_menu_item(id).await?;

        warn!("menu item deleted");
        Ok(())
    }

    // Administrator operations

    /// Approves a pending restaurant, making it publicly visible.
    #[instrument(skip(self), fields(restaurant_id = %id))]
    pub async fn approve_restaurant(&self, actor: &Actor, id: RestaurantId) -> Result<Restaurant> {
        self.require_admin(actor, "approve restaurant")?;

        let mut restaurant = self.restaurant_or_not_found(id).await?;
        restaurant.approve()?;
        self.store.update_restaurant(&restaurant).await?;

        metrics::counter!("catalog_restaurants_approved").increment(1);
        info!("restaurant approved");
        Ok(restaurant)
    }

    /// Approves a pending menu item.
    #[instrument(skip(self), fields(menu_item_id = %id))]
    pub async fn approve_menu_item(&self, actor: &Actor, id: MenuItemId) -> Result<MenuItem> {
        self.require_admin(actor, "approve menu item")?;

        let mut item = self.menu_item_or_not_found(id).await?;
        item.approve();
        self.store.update_menu_item(&item).await?;

        metrics::counter!("catalog_menu_items_approved").increment(1);
        Ok(item)
    }

    /// Deletes a restaurant, its menu items and all their stored images.
    #[instrument(skip(self), fields(restaurant_id = %id))]
    pub async fn delete_restaurant(&self, actor: &Actor, id: RestaurantId) -> Result<()> {
        self.require_admin(actor, "delete restaurant")?;

        let restaurant = self.restaurant_or_not_found(id).await?;

        // Stored assets are removed before the rows so a failed storage
        // call leaves the catalog intact rather than orphaning references.
        for item in self.store.menu_for_restaurant(id).await? {
            if let Some(image) = &item.image {
                self.images.remove(image).await?;
            }
        }
        if let Some(image) = &restaurant.image {
            self.images.remove(image).await?;
        }

        self.store.delete_restaurant(id).await?;

        warn!("restaurant deleted");
        Ok(())
    }

    /// Lists restaurants awaiting review.
    pub async fn pending_restaurants(&self, actor: &Actor) -> Result<Vec<Restaurant>> {
        self.require_admin(actor, "list pending restaurants")?;
        self.store.pending_restaurants().await
    }

    /// Lists menu items awaiting review.
    pub async fn pending_menu_items(&self, actor: &Actor) -> Result<Vec<MenuItem>> {
        self.require_admin(actor, "list pending menu items")?;
        self.store.pending_menu_items().await
    }

    // Public catalog queries

    /// Lists approved restaurants for the public catalog.
    pub async fn visible_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.store.approved_restaurants().await
    }

    /// Lists the approved menu of an approved restaurant.
    ///
    /// Fails with `RestaurantNotFound` when the restaurant is absent or not
    /// yet approved; unapproved restaurants do not exist as far as clients
    /// are concerned.
    pub async fn visible_menu(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>> {
        let restaurant = self.restaurant_or_not_found(restaurant_id).await?;
        if !restaurant.is_visible() {
            return Err(CatalogError::RestaurantNotFound { id: restaurant_id });
        }

        let items = self.store.menu_for_restaurant(restaurant_id).await?;
        Ok(items.into_iter().filter(|m| m.approved).collect())
    }

    // Helpers

    fn require_admin(&self, actor: &Actor, action: &'static str) -> Result<()> {
        if !actor.is_admin() {
            return Err(CatalogError::Forbidden { action });
        }
        Ok(())
    }

    async fn restaurant_or_not_found(&self, id: RestaurantId) -> Result<Restaurant> {
        self.store
            .restaurant(id)
            .await?
            .ok_or(CatalogError::RestaurantNotFound { id })
    }

    async fn menu_item_or_not_found(&self, id: MenuItemId) -> Result<MenuItem> {
        self.store
            .menu_item(id)
            .await?
            .ok_or(CatalogError::MenuItemNotFound { id })
    }

    async fn owned_restaurant(
        &self,
        actor: &Actor,
        id: RestaurantId,
        action: &'static str,
    ) -> Result<Restaurant> {
        let restaurant = self.restaurant_or_not_found(id).await?;
        if !restaurant.is_owned_by(actor.user_id) {
            return Err(CatalogError::Forbidden { action });
        }
        Ok(restaurant)
    }
}
