use crate::core::distance::{calculate_bounding_box, haversine_miles, is_within_bounding_box};
use crate::models::ZipcodeCentroid;
use std::collections::{HashMap, HashSet};

/// In-memory zipcode distance index
///
/// Backs the candidate selector's distance function: given a radius in
/// miles and an origin zipcode, returns every known zipcode whose centroid
/// lies within the radius. Centroids are loaded once at startup from the
/// zipcodes table; the set is small enough (~42k for the US) that a linear
/// scan behind a bounding-box pre-filter is plenty.
pub struct ZipcodeIndex {
    centroids: HashMap<String, (f64, f64)>,
}

impl ZipcodeIndex {
    pub fn new(centroids: Vec<ZipcodeCentroid>) -> Self {
        let centroids = centroids
            .into_iter()
            .map(|c| (c.zipcode, (c.latitude, c.longitude)))
            .collect();

        Self { centroids }
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// All zipcodes within `radius_miles` of the origin zipcode
    ///
    /// An unknown origin yields the empty set; the selector then falls back
    /// to same-zipcode candidates only.
    pub fn zipcodes_within(&self, radius_miles: u16, origin: &str) -> HashSet<String> {
        let Some(&(lat, lon)) = self.centroids.get(origin) else {
            tracing::debug!("Zipcode {} not in index", origin);
            return HashSet::new();
        };

        let radius = radius_miles as f64;
        let bbox = calculate_bounding_box(lat, lon, radius);

        self.centroids
            .iter()
            .filter(|(_, &(clat, clon))| is_within_bounding_box(clat, clon, &bbox))
            .filter(|(_, &(clat, clon))| haversine_miles(lat, lon, clat, clon) <= radius)
            .map(|(zipcode, _)| zipcode.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centroid(zipcode: &str, lat: f64, lon: f64) -> ZipcodeCentroid {
        ZipcodeCentroid {
            zipcode: zipcode.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn manhattan_index() -> ZipcodeIndex {
        ZipcodeIndex::new(vec![
            centroid("10001", 40.7506, -73.9972),
            centroid("10002", 40.7157, -73.9861),
            centroid("10003", 40.7317, -73.9891),
            // Philadelphia, ~80 miles away
            centroid("19103", 39.9529, -75.1733),
        ])
    }

    #[test]
    fn test_includes_origin_and_neighbors() {
        let index = manhattan_index();
        let zips = index.zipcodes_within(5, "10001");

        assert!(zips.contains("10001"));
        assert!(zips.contains("10002"));
        assert!(zips.contains("10003"));
        assert!(!zips.contains("19103"));
    }

    #[test]
    fn test_large_radius_reaches_further() {
        let index = manhattan_index();
        let zips = index.zipcodes_within(50, "10001");
        assert!(!zips.contains("19103"));

        // 80 miles away falls inside a 100-mile radius, but the declared
        // radius ceiling in the product is 50, so exercise the math only
        let bbox_zips = index.zipcodes_within(100, "10001");
        assert!(bbox_zips.contains("19103"));
    }

    #[test]
    fn test_unknown_origin_yields_empty_set() {
        let index = manhattan_index();
        assert!(index.zipcodes_within(50, "00000").is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = ZipcodeIndex::new(vec![]);
        assert!(index.is_empty());
        assert!(index.zipcodes_within(5, "10001").is_empty());
    }
}
