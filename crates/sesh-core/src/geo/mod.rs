//! Geospatial primitives for session discovery.
//!
//! # Module Structure
//!
//! - `point`: validated geographic point (`GeoPoint`)
//! - `distance`: haversine distance and the latitude-band pre-filter
//! - `index`: radius-query index over session locations (`SpatialIndex`)

mod distance;
mod index;
mod point;

pub use distance::{LatBandBounds, haversine_distance_m};
pub use index::SpatialIndex;
pub use point::GeoPoint;
