//! Ordering error types.

use catalog::CatalogError;
use common::{MenuItemId, OrderId};
use thiserror::Error;

/// Errors produced by cart, pricing and checkout operations.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// The cart holds no lines; there is nothing to price or order.
    #[error("Cart is empty")]
    EmptyCart,

    /// One or both coordinates carry the unset sentinel, so no distance
    /// can be computed.
    #[error("Coordinates are missing for delivery fee calculation")]
    MissingCoordinates,

    /// The customer contact details are not complete enough to deliver.
    #[error("Incomplete customer information: {field} is required")]
    IncompleteCustomerInfo { field: &'static str },

    /// The referenced menu item no longer exists in the catalog.
    #[error("Menu item not found: {id}")]
    MenuItemNotFound { id: MenuItemId },

    /// The referenced order does not exist.
    #[error("Order not found: {id}")]
    OrderNotFound { id: OrderId },

    /// Failure propagated from a catalog lookup.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
