//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// A point on Earth in signed decimal degrees.
///
/// The pair `(0.0, 0.0)` is treated as "coordinates unknown" throughout the
/// system, matching the datastore convention where unset latitude and
/// longitude columns default to zero. This collides with the genuine point
/// off the West African coast; the limitation is deliberate and documented
/// rather than fixed, because the geocoding fallback depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in decimal degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The "coordinates unknown" sentinel.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Returns true if this point is the unset sentinel.
    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}
