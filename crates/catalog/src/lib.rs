//! Catalog layer: restaurants, menu items and the approval workflow.
//!
//! Restaurant owners create and edit their profile and menu; nothing becomes
//! publicly visible until an administrator approves it, and edits to approved
//! entities send them back through review. This crate provides:
//! - The [`Restaurant`] and [`MenuItem`] entities with their
//!   [`ApprovalState`] state machine
//! - The [`CatalogStore`] persistence trait with in-memory and PostgreSQL
//!   implementations
//! - The [`ImageStore`] collaborator trait for uploaded assets
//! - [`CatalogService`], the gated operations exposed to the application

pub mod approval;
pub mod error;
pub mod images;
pub mod memory;
pub mod menu_item;
pub mod postgres;
pub mod restaurant;
pub mod service;
pub mod store;

pub use approval::ApprovalState;
pub use error::CatalogError;
pub use images::{ImagePath, ImageStore, InMemoryImageStore};
pub use memory::InMemoryCatalogStore;
pub use menu_item::{MenuItem, MenuItemDraft, MenuItemUpdate};
pub use postgres::PostgresCatalogStore;
pub use restaurant::{Restaurant, RestaurantDraft, RestaurantUpdate};
pub use service::CatalogService;
pub use store::CatalogStore;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;
