//! Shared value objects for the EatUp food-ordering core.
//!
//! This crate provides the vocabulary types used across the workspace:
//! - Typed UUID identifiers for users, restaurants, menu items and orders
//! - `Money` (integer cents)
//! - `GeoPoint` (decimal-degree coordinates with an "unset" sentinel)
//! - `SessionToken` for visitor-session keyed state
//! - `Actor`/`Role`, the currency of the identity collaborator

pub mod auth;
pub mod geo;
pub mod ids;
pub mod money;

pub use auth::{Actor, Role};
pub use geo::GeoPoint;
pub use ids::{MenuItemId, OrderId, RestaurantId, SessionToken, UserId};
pub use money::Money;
