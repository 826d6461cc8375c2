use crate::{Stop, constants::EARTH_RADIUS_KM};

/// Haversine great-circle distance in kilometers on a sphere of radius 6371 km.
///
/// Inputs are decimal degrees and are not validated.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlng / 2.0).sin();
    // rounding can push `a` a hair past 1 for antipodal points
    let a = (s1 * s1 + phi1.cos() * phi2.cos() * s2 * s2).clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of consecutive leg distances. Zero for fewer than two stops.
pub fn compute_route_distance(stops: &[Stop]) -> f64 {
    stops.windows(2).map(|leg| leg[0].dist(&leg[1])).sum()
}

/// Same as [`compute_route_distance`] plus the leg from the last stop back to the first.
pub fn compute_closed_route_distance(stops: &[Stop]) -> f64 {
    match (stops.first(), stops.last()) {
        (Some(first), Some(last)) if stops.len() > 1 => {
            compute_route_distance(stops) + last.dist(first)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_closed_route_distance, compute_route_distance, haversine_km};
    use crate::Stop;

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_km(0.0, 0.0, 1.0, 0.0);
        let expected = 6_371.0 * 1.0_f64.to_radians();
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn dist_is_symmetric_and_zero_for_same_point() {
        let dab = haversine_km(37.7749, -122.4194, 34.0522, -118.2437);
        let dba = haversine_km(34.0522, -118.2437, 37.7749, -122.4194);
        let daa = haversine_km(37.7749, -122.4194, 37.7749, -122.4194);

        assert!((dab - dba).abs() < 1e-9);
        assert_eq!(daa, 0.0);
        assert!((dab - 559.1).abs() < 1.0);
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - 6_371.0 * std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn route_distance_is_zero_without_legs() {
        assert_eq!(compute_route_distance(&[]), 0.0);
        assert_eq!(compute_route_distance(&[Stop::new("a", 10.0, 10.0)]), 0.0);
        assert_eq!(compute_closed_route_distance(&[]), 0.0);
        assert_eq!(
            compute_closed_route_distance(&[Stop::new("a", 10.0, 10.0)]),
            0.0
        );
    }

    #[test]
    fn route_distance_sums_consecutive_legs_only() {
        let stops = vec![
            Stop::new("a", 0.0, 0.0),
            Stop::new("b", 0.0, 1.0),
            Stop::new("c", 1.0, 1.0),
        ];
        let ab = haversine_km(0.0, 0.0, 0.0, 1.0);
        let bc = haversine_km(0.0, 1.0, 1.0, 1.0);
        let ca = haversine_km(1.0, 1.0, 0.0, 0.0);

        assert!((compute_route_distance(&stops) - (ab + bc)).abs() < 1e-9);
        assert!((compute_closed_route_distance(&stops) - (ab + bc + ca)).abs() < 1e-9);
    }
}
