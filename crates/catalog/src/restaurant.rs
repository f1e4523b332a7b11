//! Restaurant entity.

use common::{GeoPoint, Money, RestaurantId, UserId};
use serde::{Deserialize, Serialize};

use crate::approval::ApprovalState;
use crate::images::ImagePath;
use crate::{CatalogError, Result};

/// A restaurant profile owned by a single user.
///
/// Publicly visible only while [`ApprovalState::Approved`]; any owner edit
/// drops it back into the review queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub cuisine: String,
    /// Location used for delivery-fee distance; the unset sentinel until
    /// the address has been geocoded.
    pub location: GeoPoint,
    /// Flat fee displayed on restaurant cards and snapshotted into carts.
    pub delivery_fee: Money,
    pub delivery_time_minutes: u32,
    pub image: Option<ImagePath>,
    pub approval: ApprovalState,
}

/// Fields supplied by the owner when creating a restaurant.
#[derive(Debug, Clone, Default)]
pub struct RestaurantDraft {
    pub name: String,
    pub description: String,
    pub address: String,
    pub cuisine: String,
    pub location: GeoPoint,
    pub delivery_fee: Money,
    pub delivery_time_minutes: u32,
    pub image: Option<ImagePath>,
}

/// Fields an owner may change on an existing restaurant.
///
/// `image: None` keeps the current image.
#[derive(Debug, Clone)]
pub struct RestaurantUpdate {
    pub name: String,
    pub description: String,
    pub address: String,
    pub cuisine: String,
    pub location: GeoPoint,
    pub delivery_fee: Money,
    pub delivery_time_minutes: u32,
    pub image: Option<ImagePath>,
}

impl Restaurant {
    /// Creates a new restaurant in the `Draft` state.
    pub fn create(owner_id: UserId, draft: RestaurantDraft) -> Result<Self> {
        if draft.name.trim().is_empty() {
            return Err(CatalogError::validation("restaurant name must not be empty"));
        }
        if draft.delivery_fee.cents() < 0 {
            return Err(CatalogError::validation("delivery fee must not be negative"));
        }

        Ok(Self {
            id: RestaurantId::new(),
            owner_id,
            name: draft.name,
            description: draft.description,
            address: draft.address,
            cuisine: draft.cuisine,
            location: draft.location,
            delivery_fee: draft.delivery_fee,
            delivery_time_minutes: draft.delivery_time_minutes,
            image: draft.image,
            approval: ApprovalState::Draft,
        })
    }

    /// Returns true if the restaurant appears in the public catalog.
    pub fn is_visible(&self) -> bool {
        self.approval.is_approved()
    }

    /// Returns true if the given user owns this restaurant.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Submits the restaurant for administrative review.
    ///
    /// Requires at least one menu item; a profile with nothing to order
    /// from is not reviewable.
    pub fn submit(&mut self, menu_item_count: usize) -> Result<()> {
        if !self.approval.can_submit() {
            return Err(CatalogError::InvalidState {
                state: self.approval,
                action: "submit",
            });
        }
        if menu_item_count == 0 {
            return Err(CatalogError::NoMenuItems);
        }

        self.approval = ApprovalState::Submitted;
        Ok(())
    }

    /// Marks the restaurant approved.
    pub fn approve(&mut self) -> Result<()> {
        if !self.approval.can_approve() {
            return Err(CatalogError::InvalidState {
                state: self.approval,
                action: "approve",
            });
        }

        self.approval = ApprovalState::Approved;
        Ok(())
    }

    /// Applies an owner edit.
    ///
    /// Returns the replaced image path, if any, so the caller can remove
    /// the stale asset from storage. Editing anything on a submitted or
    /// approved restaurant sends it back for review.
    pub fn apply_update(&mut self, update: RestaurantUpdate) -> Result<Option<ImagePath>> {
        if update.name.trim().is_empty() {
            return Err(CatalogError::validation("restaurant name must not be empty"));
        }
        if update.delivery_fee.cents() < 0 {
            return Err(CatalogError::validation("delivery fee must not be negative"));
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
        self.address = update.address;
        self.cuisine = update.cuisine;
        self.location = update.location;
        self.delivery_fee = update.delivery_fee;
        self.delivery_time_minutes = update.delivery_time_minutes;
        self.approval = self.approval.after_edit();

        Ok(replaced)
    }
}
