//! Great-circle distance and the latitude-band pre-filter.
//!
//! Radius queries run in two stages: a cheap latitude-band check first,
//! then the exact haversine distance for the survivors. The band is
//! conservative - it may admit points outside the radius but never
//! excludes one inside it.

use super::point::GeoPoint;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per degree of latitude (and of longitude at the equator).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Haversine distance between two points in meters.
pub fn haversine_distance_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// A latitude band guaranteed to contain every point within `radius_m`
/// of the center.
///
/// Only latitude is banded: longitude degrees shrink towards the poles,
/// so a fixed-width longitude band would need per-latitude scaling to
/// stay conservative. The band cut alone already discards most of a
/// spread-out candidate set before the exact check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatBandBounds {
    pub min_lat: f64,
    pub max_lat: f64,
}

impl LatBandBounds {
    /// Computes the band around `center`, clamped at the poles.
    pub fn around(center: &GeoPoint, radius_m: f64) -> Self {
        let padding_deg = radius_m / METERS_PER_DEGREE;
        Self {
            min_lat: (center.latitude - padding_deg).max(-90.0),
            max_lat: (center.latitude + padding_deg).min(90.0),
        }
    }

    /// Check if a point's latitude falls inside the band.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.min_lat && point.latitude <= self.max_lat
    }
}
