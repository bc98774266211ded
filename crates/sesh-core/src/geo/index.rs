//! Radius-query index over point locations.

use super::distance::{LatBandBounds, haversine_distance_m};
use super::point::GeoPoint;
use std::collections::HashMap;
use std::hash::Hash;

/// An in-memory index from keys to point locations supporting radius
/// queries.
///
/// Lookup is a linear scan with a latitude-band pre-filter followed by an
/// exact haversine check. The active-session universe this indexes stays
/// small (hundreds, not millions), so a balanced tree structure buys
/// nothing over the scan.
#[derive(Debug, Clone)]
pub struct SpatialIndex<K: Eq + Hash + Clone> {
    entries: HashMap<K, GeoPoint>,
}

impl<K: Eq + Hash + Clone> Default for SpatialIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> SpatialIndex<K> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts or moves a key. Re-inserting an existing key updates its
    /// location.
    pub fn insert(&mut self, key: K, location: GeoPoint) {
        self.entries.insert(key, location);
    }

    /// Removes a key. Returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns every key within `radius_m` of `center` together with its
    /// exact distance, sorted ascending by distance.
    pub fn within_radius(&self, center: &GeoPoint, radius_m: f64) -> Vec<(K, f64)> {
        let bounds = LatBandBounds::around(center, radius_m);
        let mut hits: Vec<(K, f64)> = self
            .entries
            .iter()
            .filter(|(_, location)| bounds.contains(location))
            .filter_map(|(key, location)| {
                let distance = haversine_distance_m(center, location);
                (distance <= radius_m).then(|| (key.clone(), distance))
            })
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits
    }
}
