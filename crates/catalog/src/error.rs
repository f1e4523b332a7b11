//! Catalog error types.

use common::{MenuItemId, RestaurantId};
use thiserror::Error;

use crate::approval::ApprovalState;

/// Errors that can occur during catalog operations.
///
/// All variants are recoverable at the request boundary; validation happens
/// before any write, so none of them leave persisted state half-mutated.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Referenced restaurant does not exist (or is not visible to the caller).
    #[error("Restaurant not found: {id}")]
    RestaurantNotFound { id: RestaurantId },

    /// Referenced menu item does not exist (or is not visible to the caller).
    #[error("Menu item not found: {id}")]
    MenuItemNotFound { id: MenuItemId },

    /// A restaurant cannot be submitted without at least one menu item.
    #[error("Cannot submit a restaurant with no menu items")]
    NoMenuItems,

    /// The actor lacks ownership or the required role.
    #[error("Forbidden: {action}")]
    Forbidden { action: &'static str },

    /// The entity is not in a state that allows the requested transition.
    #[error("Invalid state transition: cannot {action} from {state} state")]
    InvalidState {
        state: ApprovalState,
        action: &'static str,
    },

    /// Malformed input fields.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Image storage collaborator failure, surfaced opaquely.
    #[error("Image storage error: {0}")]
    Storage(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation {
            message: message.into(),
        }
    }
}
