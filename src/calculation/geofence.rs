//! Great-circle distance and geofence checks.
//!
//! Distances use the haversine formula on a spherical Earth. The check-in and
//! office-presence areas are separate named [`GeofenceConfig`] values; this
//! module holds no radius of its own.

use serde::Serialize;
use tracing::debug;

use crate::config::GeofenceConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::Coordinate;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Returns the great-circle distance in metres between two points given in
/// degrees.
///
/// The result is never negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::haversine_distance_meters;
///
/// assert_eq!(haversine_distance_meters(-6.2088, 106.8456, -6.2088, 106.8456), 0.0);
///
/// // Jakarta to Singapore is roughly 890 km.
/// let d = haversine_distance_meters(-6.2088, 106.8456, 1.3521, 103.8198);
/// assert!(d > 850_000.0 && d < 950_000.0);
/// ```
pub fn haversine_distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// The outcome of measuring a position against a geofence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeofenceCheck {
    /// Name of the geofence checked.
    pub geofence: String,
    /// Whether the position is inside the radius.
    pub allowed: bool,
    /// Distance from the geofence centre in metres.
    pub distance_meters: f64,
    /// The geofence radius in metres.
    pub radius_meters: f64,
}

/// Measures `position` against a geofence without rejecting it.
///
/// Returns `InvalidCoordinate` when the position is out of range. A position
/// exactly on the boundary is allowed.
pub fn check_geofence(
    name: &str,
    fence: &GeofenceConfig,
    position: Coordinate,
) -> EngineResult<GeofenceCheck> {
    position.validate()?;

    let distance_meters = haversine_distance_meters(
        fence.latitude,
        fence.longitude,
        position.latitude,
        position.longitude,
    );
    let allowed = distance_meters <= fence.radius_meters;

    debug!(
        geofence = name,
        distance_meters,
        radius_meters = fence.radius_meters,
        allowed,
        "Measured position against geofence"
    );

    Ok(GeofenceCheck {
        geofence: name.to_string(),
        allowed,
        distance_meters,
        radius_meters: fence.radius_meters,
    })
}

/// Accepts `position` only if it lies within the geofence.
///
/// # Errors
///
/// - `InvalidCoordinate` if the position is out of range.
/// - `OutsideGeofence` if the distance exceeds the radius.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::verify_geofence;
/// use payroll_engine::config::GeofenceConfig;
/// use payroll_engine::models::Coordinate;
///
/// let office = GeofenceConfig::new(-6.2088, 106.8456, 100.0);
///
/// let at_desk = Coordinate::new(-6.2089, 106.8457).unwrap();
/// assert!(verify_geofence("check_in", &office, at_desk).is_ok());
///
/// let singapore = Coordinate::new(1.3521, 103.8198).unwrap();
/// assert!(verify_geofence("check_in", &office, singapore).is_err());
/// ```
pub fn verify_geofence(
    name: &str,
    fence: &GeofenceConfig,
    position: Coordinate,
) -> EngineResult<GeofenceCheck> {
    let check = check_geofence(name, fence, position)?;
    if !check.allowed {
        return Err(EngineError::OutsideGeofence {
            geofence: check.geofence,
            distance_meters: check.distance_meters,
            radius_meters: check.radius_meters,
        });
    }
    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const OFFICE_LAT: f64 = -6.2088;
    const OFFICE_LON: f64 = 106.8456;

    fn office(radius_meters: f64) -> GeofenceConfig {
        GeofenceConfig::new(OFFICE_LAT, OFFICE_LON, radius_meters)
    }

    #[test]
    fn test_identical_points_are_zero_apart() {
        assert_eq!(
            haversine_distance_meters(OFFICE_LAT, OFFICE_LON, OFFICE_LAT, OFFICE_LON),
            0.0
        );
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = haversine_distance_meters(0.0, 0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-6, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = haversine_distance_meters(OFFICE_LAT, OFFICE_LON, 1.3521, 103.8198);
        let back = haversine_distance_meters(1.3521, 103.8198, OFFICE_LAT, OFFICE_LON);
        assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn test_antipodal_points_are_half_circumference() {
        let d = haversine_distance_meters(0.0, 0.0, 0.0, 180.0);
        let expected = EARTH_RADIUS_METERS * std::f64::consts::PI;
        assert!((d - expected).abs() < 1e-3);
        assert!(d.is_finite());
    }

    #[test]
    fn test_check_in_from_singapore_is_rejected() {
        let singapore = Coordinate::new(1.3521, 103.8198).unwrap();
        match verify_geofence("check_in", &office(100.0), singapore) {
            Err(EngineError::OutsideGeofence {
                geofence,
                distance_meters,
                radius_meters,
            }) => {
                assert_eq!(geofence, "check_in");
                assert!(distance_meters > 800_000.0);
                assert_eq!(radius_meters, 100.0);
            }
            other => panic!("Expected OutsideGeofence, got {:?}", other),
        }
    }

    #[test]
    fn test_check_in_next_to_office_is_accepted() {
        // About 15 m north-east of the centre
        let nearby = Coordinate::new(-6.2087, 106.8457).unwrap();
        let check = verify_geofence("check_in", &office(100.0), nearby).unwrap();
        assert!(check.allowed);
        assert!(check.distance_meters < 100.0);
    }

    #[test]
    fn test_position_exactly_on_the_radius_is_accepted() {
        let position = Coordinate::new(-6.2079, 106.8462).unwrap();
        let distance = haversine_distance_meters(
            OFFICE_LAT,
            OFFICE_LON,
            position.latitude,
            position.longitude,
        );

        let on_boundary = verify_geofence("check_in", &office(distance), position).unwrap();
        assert!(on_boundary.allowed);
        assert_eq!(on_boundary.distance_meters, on_boundary.radius_meters);

        let just_inside = office(distance * (1.0 - 1e-12));
        assert!(matches!(
            verify_geofence("check_in", &just_inside, position),
            Err(EngineError::OutsideGeofence { .. })
        ));
    }

    #[test]
    fn test_radii_are_independent() {
        // About 220 m north of the centre
        let position = Coordinate::new(-6.2068, OFFICE_LON).unwrap();
        assert!(verify_geofence("check_in", &office(100.0), position).is_err());
        assert!(verify_geofence("office_presence", &office(500.0), position).is_ok());
    }

    #[test]
    fn test_check_geofence_reports_without_rejecting() {
        let far = Coordinate::new(1.3521, 103.8198).unwrap();
        let check = check_geofence("check_in", &office(100.0), far).unwrap();
        assert!(!check.allowed);
        assert_eq!(check.radius_meters, 100.0);
    }

    #[test]
    fn test_invalid_position_is_rejected() {
        let bad = Coordinate {
            latitude: f64::NAN,
            longitude: 0.0,
        };
        assert!(matches!(
            check_geofence("check_in", &office(100.0), bad),
            Err(EngineError::InvalidCoordinate { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_distance_to_self_is_zero(lat in -90.0f64..90.0, lon in -180.0f64..180.0) {
            prop_assert!(haversine_distance_meters(lat, lon, lat, lon).abs() < 1e-6);
        }

        #[test]
        fn prop_distance_is_non_negative(
            lat1 in -90.0f64..90.0,
            lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0,
            lon2 in -180.0f64..180.0,
        ) {
            prop_assert!(haversine_distance_meters(lat1, lon1, lat2, lon2) >= 0.0);
        }

        #[test]
        fn prop_distance_grows_along_a_meridian(
            lat in -80.0f64..0.0,
            step in 0.001f64..40.0,
            extra in 0.001f64..40.0,
            lon in -180.0f64..180.0,
        ) {
            let near = haversine_distance_meters(lat, lon, lat + step, lon);
            let far = haversine_distance_meters(lat, lon, lat + step + extra, lon);
            prop_assert!(far > near);
        }
    }
}
