//! Ordering layer: session carts, delivery pricing and checkout.
//!
//! A visitor collects menu items into a session [`Cart`] of denormalized
//! snapshots, [`DeliveryPolicy`] prices the cart against the haversine
//! distance between restaurant and visitor, and [`CheckoutService`]
//! materializes the priced cart into an immutable [`Order`] persisted
//! through the [`OrderStore`] trait.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod memory;
pub mod order;
pub mod postgres;
pub mod pricing;
pub mod store;

pub use cart::{Cart, CartItem, CartService, CartStore, InMemoryCartStore};
pub use checkout::CheckoutService;
pub use error::OrderingError;
pub use geo::distance_km;
pub use geocode::{Geocoder, StaticGeocoder};
pub use memory::InMemoryOrderStore;
pub use order::{CustomerInfo, Order, OrderLine};
pub use postgres::PostgresOrderStore;
pub use pricing::{DeliveryPolicy, Quote};
pub use store::OrderStore;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrderingError>;
