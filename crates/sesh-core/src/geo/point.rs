//! Geographic point with coordinate validation.

use crate::error::{Result, SeshError};
use serde::{Deserialize, Serialize};

/// A WGS84 point. Longitude first to match the (lon, lat) order session
/// locations are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a validated point.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when either coordinate is non-finite or
    /// outside its valid range (latitude [-90, 90], longitude [-180, 180]).
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(SeshError::invalid_argument(
                "coordinates must be finite numbers",
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SeshError::invalid_argument(format!(
                "latitude {latitude} out of range [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SeshError::invalid_argument(format!(
                "longitude {longitude} out of range [-180, 180]"
            )));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinates() {
        let p = GeoPoint::new(-122.4194, 37.7749).unwrap();
        assert_eq!(p.longitude, -122.4194);
        assert_eq!(p.latitude, 37.7749);
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = GeoPoint::new(0.0, 91.0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let err = GeoPoint::new(-181.0, 0.0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }
}
