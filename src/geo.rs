//! Great-circle distance between coordinates.

use crate::sites::Coordinate;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates in meters.
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// Haversine distance between two coordinates in kilometers.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    distance_meters(a, b) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_karnak_to_luxor_temple() {
        // The two Luxor temples are roughly 2.8 km apart.
        let d = distance_km(&coord(25.7188, 32.6573), &coord(25.6995, 32.6391));
        assert!((2.0..4.0).contains(&d), "Expected ~2.8 km, got {d}");
    }

    #[test]
    fn test_giza_to_egyptian_museum() {
        let d = distance_meters(&coord(29.9773, 31.1325), &coord(30.0478, 31.2336));
        assert!(
            (10_000.0..15_000.0).contains(&d),
            "Expected ~12 km, got {d}m"
        );
    }

    #[test]
    fn test_zero_distance() {
        let point = coord(30.0444, 31.2357);
        assert_eq!(distance_meters(&point, &point), 0.0);
    }

    #[test]
    fn test_small_offset_is_metric_scale() {
        // ~0.0018 degrees of latitude is about 200 m anywhere on Earth.
        let d = distance_meters(&coord(29.9773, 31.1325), &coord(29.9791, 31.1325));
        assert!((150.0..250.0).contains(&d), "Expected ~200 m, got {d}");
    }
}
