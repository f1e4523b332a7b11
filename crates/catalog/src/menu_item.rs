//! Menu item entity.

use common::{MenuItemId, Money, RestaurantId};
use serde::{Deserialize, Serialize};

use crate::images::ImagePath;
use crate::{CatalogError, Result};

/// A dish offered by a restaurant.
///
/// Created unapproved. Visible to clients only when both the item and its
/// parent restaurant are approved. A price change resets approval; edits to
/// name, description or image do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: Option<ImagePath>,
    pub approved: bool,
}

/// Fields supplied when creating a menu item.
#[derive(Debug, Clone, Default)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: Option<ImagePath>,
}

/// Fields an owner may change on an existing menu item.
///
/// `image: None` keeps the current image.
#[derive(Debug, Clone)]
pub struct MenuItemUpdate {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: Option<ImagePath>,
}

impl MenuItem {
    /// Creates a new, unapproved menu item for a restaurant.
    pub fn create(restaurant_id: RestaurantId, draft: MenuItemDraft) -> Result<Self> {
        if draft.name.trim().is_empty() {
            return Err(CatalogError::validation("menu item name must not be empty"));
        }
        if !draft.price.is_positive() {
            return Err(CatalogError::validation("price must be greater than zero"));
        }

        Ok(Self {
            id: MenuItemId::new(),
            restaurant_id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: draft.image,
            approved: false,
        })
    }

    /// Applies an owner edit.
    ///
    /// Changing the price resets `approved`; a cheaper or dearer dish is a
    /// different offer and must be re-reviewed. Name, description and image
    /// edits leave approval untouched. Returns the replaced image path, if
    /// any, for asset cleanup.
    pub fn apply_update(&mut self, update: MenuItemUpdate) -> Result<Option<ImagePath>> {
        if update.name.trim().is_empty() {
            return Err(CatalogError::validation("menu item name must not be empty"));
        }
        if !update.price.is_positive() {
            return Err(CatalogError::validation("price must be greater than zero"));
        }

        if update.price != self.price {
            self.approved = false;
        }

        let replaced = match update.image {
            Some(new_image) => {
                let old = self.image.take();
                self.image = Some(new_image);
                old
            }
            None => None,
        };

        self.name = update.name;
        self.description = update.description;
        self.price = update.price;

        Ok(replaced)
    }

    /// Marks the item approved.
    pub fn approve(&mut self) {
        self.approved = true;
    }
}
