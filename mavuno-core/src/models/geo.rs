use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ModelError;

/// A WGS84 coordinate pair. Validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point, rejecting out-of-range coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ModelError> {
        if !(-90.0..=90.0).contains(&lat) || lat.is_nan() {
            return Err(ModelError::InvalidLatitude { lat });
        }
        if !(-180.0..=180.0).contains(&lng) || lng.is_nan() {
            return Err(ModelError::InvalidLongitude { lng });
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
