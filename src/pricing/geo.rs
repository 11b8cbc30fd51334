//! Great-circle distance between pickup and drop coordinates.

use serde::{Deserialize, Serialize};

use super::PricingError;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 point supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check latitude is within [-90, 90] and longitude within [-180, 180].
    ///
    /// `field` names the coordinate in the error (e.g. "pickup_location").
    pub fn validate(&self, field: &str) -> Result<(), PricingError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PricingError::InvalidCoordinate {
                field: format!("{}.latitude", field),
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PricingError::InvalidCoordinate {
                field: format!("{}.longitude", field),
                value: self.longitude,
            });
        }
        Ok(())
    }
}

/// Haversine distance in kilometers.
///
/// Does not bounds-check its inputs; callers validate with [`Coordinate::validate`].
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
