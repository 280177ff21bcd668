const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two (lat, lng) pairs
pub fn haversine_meters(from: (f64, f64), to: (f64, f64)) -> f64 {
    let lat1_rad = from.0.to_radians();
    let lat2_rad = to.0.to_radians();
    let delta_lat = (to.0 - from.0).to_radians();
    let delta_lon = (to.1 - from.1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Arithmetic mean of the points. Good enough at city scale.
pub fn centroid(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let (lat_sum, lng_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.0, lng + p.1));

    Some((lat_sum / n, lng_sum / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert_eq!(haversine_meters((48.8584, 2.2945), (48.8584, 2.2945)), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Eiffel Tower to Louvre pyramid, roughly 3.2 km
        let distance = haversine_meters((48.8584, 2.2945), (48.8606, 2.3376));
        assert!((3_000.0..3_400.0).contains(&distance), "got {}", distance);
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&[]), None);
        assert_eq!(centroid(&[(1.0, 2.0), (3.0, 4.0)]), Some((2.0, 3.0)));
    }
}
