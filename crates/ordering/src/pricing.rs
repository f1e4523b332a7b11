//! Delivery pricing.
//!
//! The charged delivery fee is distance-based: a base fee plus a per-kilometer
//! rate over the haversine distance between the restaurant and the visitor,
//! capped so far-flung addresses stay orderable.

use common::{GeoPoint, Money};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::geo::distance_km;
use crate::{OrderingError, Result};

/// Tunable delivery fee parameters.
///
/// Reads from environment variables (all in cents):
/// - `DELIVERY_BASE_FEE_CENTS` — flat component (default: `500`)
/// - `DELIVERY_PER_KM_CENTS` — per-kilometer rate (default: `200`)
/// - `DELIVERY_FEE_CAP_CENTS` — maximum charged fee (default: `2500`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    pub base_fee: Money,
    pub per_km_rate: Money,
    pub fee_cap: Money,
}

impl Default for DeliveryPolicy {
    /// Base 5.00, 2.00 per kilometer, capped at 25.00.
    fn default() -> Self {
        Self {
            base_fee: Money::from_cents(500),
            per_km_rate: Money::from_cents(200),
            fee_cap: Money::from_cents(2500),
        }
    }
}

impl DeliveryPolicy {
    /// Loads the policy from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_fee: env_cents("DELIVERY_BASE_FEE_CENTS").unwrap_or(defaults.base_fee),
            per_km_rate: env_cents("DELIVERY_PER_KM_CENTS").unwrap_or(defaults.per_km_rate),
            fee_cap: env_cents("DELIVERY_FEE_CAP_CENTS").unwrap_or(defaults.fee_cap),
        }
    }
}

fn env_cents(name: &str) -> Option<Money> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Money::from_cents)
}

/// A priced cart: what the customer will pay and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: Money,
    pub distance_km: f64,
    pub delivery_fee: Money,
    pub total: Money,
}

impl DeliveryPolicy {
    /// Prices a cart for delivery from `restaurant` to `visitor`.
    ///
    /// Fails with [`OrderingError::EmptyCart`] when there is nothing to
    /// price and [`OrderingError::MissingCoordinates`] when either point is
    /// the unset `(0, 0)` sentinel.
    pub fn quote(&self, cart: &Cart, restaurant: GeoPoint, visitor: GeoPoint) -> Result<Quote> {
        if cart.is_empty() {
            return Err(OrderingError::EmptyCart);
        }
        if restaurant.is_unset() || visitor.is_unset() {
            return Err(OrderingError::MissingCoordinates);
        }

        let distance = distance_km(restaurant, visitor);
        let raw_fee_cents =
            self.base_fee.cents() as f64 + distance * self.per_km_rate.cents() as f64;
        let delivery_fee = Money::from_cents(raw_fee_cents.round() as i64).min(self.fee_cap);

        let subtotal = cart.subtotal();
        Ok(Quote {
            subtotal,
            distance_km: distance,
            delivery_fee,
            total: subtotal + delivery_fee,
        })
    }
}
