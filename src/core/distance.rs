/// Earth's radius in miles
const EARTH_RADIUS_MI: f64 = 3958.8;

/// Miles per degree of latitude
const MILES_PER_LAT_DEGREE: f64 = 69.0;

/// Geographic bounding box around a centroid
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MI * c
}

/// Calculate a bounding box around a centroid
///
/// Much cheaper than Haversine, used to pre-filter the zipcode index before
/// the exact distance check. 1 degree latitude is roughly 69 miles; a degree
/// of longitude shrinks with the cosine of the latitude.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_miles: f64) -> BoundingBox {
    let lat_delta = radius_miles / MILES_PER_LAT_DEGREE;
    let lon_delta = radius_miles / (MILES_PER_LAT_DEGREE * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        let distance = haversine_miles(40.7128, -74.0060, 40.7128, -74.0060);
        assert!(distance < 0.01);
    }

    #[test]
    fn test_haversine_nyc_to_philadelphia() {
        // NYC to Philadelphia is roughly 80 miles
        let distance = haversine_miles(40.7128, -74.0060, 39.9526, -75.1652);
        assert!(
            (distance - 80.0).abs() < 10.0,
            "Distance should be ~80mi, got {}",
            distance
        );
    }

    #[test]
    fn test_bounding_box_contains_center() {
        let bbox = calculate_bounding_box(40.7128, -74.0060, 10.0);

        assert!(bbox.min_lat < 40.7128);
        assert!(bbox.max_lat > 40.7128);
        assert!(bbox.min_lon < -74.0060);
        assert!(bbox.max_lon > -74.0060);

        // 10 miles / 69 miles per degree, both sides
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.29).abs() < 0.02, "Lat span should be ~0.29 degrees");
    }

    #[test]
    fn test_point_within_bbox() {
        let bbox = calculate_bounding_box(40.7128, -74.0060, 10.0);

        assert!(is_within_bounding_box(40.7128, -74.0060, &bbox));
        assert!(is_within_bounding_box(40.71, -74.0, &bbox));
        assert!(!is_within_bounding_box(50.0, -80.0, &bbox));
        assert!(!is_within_bounding_box(bbox.max_lat + 0.01, -74.0, &bbox));
    }
}
