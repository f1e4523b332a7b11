//! Best-effort address geocoding.
//!
//! Used to backfill a visitor's coordinates from their street address when
//! the device supplied none. Lookup failure is not an error: the caller
//! falls back to the unset sentinel and checkout reports missing
//! coordinates if pricing ends up needing them.

use std::collections::HashMap;

use async_trait::async_trait;
use common::GeoPoint;
use tracing::debug;

/// Trait for resolving a street address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves an address, `None` when the provider cannot.
    async fn locate(&self, address: &str) -> Option<GeoPoint>;
}

/// Map-backed geocoder for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    known: HashMap<String, GeoPoint>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a known address.
    pub fn with_address(mut self, address: impl Into<String>, point: GeoPoint) -> Self {
        self.known.insert(address.into(), point);
        self
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn locate(&self, address: &str) -> Option<GeoPoint> {
        let found = self.known.get(address).copied();
        if found.is_none() {
            debug!(address, "address not geocodable");
        }
        found
    }
}
