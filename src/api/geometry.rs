//! Coordinate-system conversion wrappers.

use crate::bridge::bridged;
use crate::marshal;
use crate::orrery_errors::CallResult;
use crate::quantities::{Angle, Distance, DistanceVector};
use crate::toolkit;

/// Latitudinal `(radius, longitude, latitude)` → rectangular position.
pub fn latitudinal_to_rectangular(
    radius: Distance,
    longitude: Angle,
    latitude: Angle,
) -> CallResult<DistanceVector> {
    bridged(|| {
        let mut raw = [0.0; 3];
        toolkit::coords::latitudinal_to_rect(
            radius.kilometers(),
            longitude.radians(),
            latitude.radians(),
            &mut raw,
        );
        raw
    })
    .map(|raw| marshal::distance_vector_from_array(&raw))
}

/// Rectangular position → latitudinal `(radius, longitude, latitude)`.
/// The origin maps to all zeros.
pub fn rectangular_to_latitudinal(
    position: &DistanceVector,
) -> CallResult<(Distance, Angle, Angle)> {
    let raw = marshal::distance_vector_to_array(position);
    bridged(|| toolkit::coords::rect_to_latitudinal(&raw)).map(|(radius, longitude, latitude)| {
        (
            Distance::from_kilometers(radius),
            Angle::from_radians(longitude),
            Angle::from_radians(latitude),
        )
    })
}

/// Geodetic `(longitude, latitude, altitude)` → rectangular position, on
/// the spheroid given by `equatorial_radius` and `flattening`. A flattening
/// of 1 or more, or a non-positive radius, fails with `VALUEOUTOFRANGE`.
pub fn geodetic_to_rectangular(
    longitude: Angle,
    latitude: Angle,
    altitude: Distance,
    equatorial_radius: Distance,
    flattening: f64,
) -> CallResult<DistanceVector> {
    bridged(|| {
        let mut raw = [0.0; 3];
        toolkit::coords::geodetic_to_rect(
            longitude.radians(),
            latitude.radians(),
            altitude.kilometers(),
            equatorial_radius.kilometers(),
            flattening,
            &mut raw,
        );
        raw
    })
    .map(|raw| marshal::distance_vector_from_array(&raw))
}

/// Rectangular position → geodetic `(longitude, latitude, altitude)`.
pub fn rectangular_to_geodetic(
    position: &DistanceVector,
    equatorial_radius: Distance,
    flattening: f64,
) -> CallResult<(Angle, Angle, Distance)> {
    let raw = marshal::distance_vector_to_array(position);
    bridged(|| {
        toolkit::coords::rect_to_geodetic(&raw, equatorial_radius.kilometers(), flattening)
            .unwrap_or((0.0, 0.0, 0.0))
    })
    .map(|(longitude, latitude, altitude)| {
        (
            Angle::from_radians(longitude),
            Angle::from_radians(latitude),
            Distance::from_kilometers(altitude),
        )
    })
}

#[cfg(test)]
mod wrapper_tests {
    use super::*;
    use crate::test_support;
    use approx::assert_relative_eq;

    #[test]
    fn latitudinal_round_trip_through_quantities() {
        let _serial = test_support::serial();
        let position = latitudinal_to_rectangular(
            Distance::from_kilometers(7000.0),
            Angle::from_degrees(45.0),
            Angle::from_degrees(30.0),
        )
        .unwrap();
        let (radius, longitude, latitude) = rectangular_to_latitudinal(&position).unwrap();
        assert_relative_eq!(radius.kilometers(), 7000.0, epsilon = 1e-9);
        assert_relative_eq!(longitude.degrees(), 45.0, epsilon = 1e-9);
        assert_relative_eq!(latitude.degrees(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_spheroid_fails_with_token() {
        let _serial = test_support::serial();
        let error = geodetic_to_rectangular(
            Angle::ZERO,
            Angle::ZERO,
            Distance::ZERO,
            Distance::from_kilometers(6378.0),
            1.25,
        )
        .unwrap_err();
        assert_eq!(error.token, "VALUEOUTOFRANGE");
        assert!(!error.message.is_empty());
    }

    #[test]
    fn geodetic_round_trip_through_quantities() {
        let _serial = test_support::serial();
        let equatorial_radius = Distance::from_kilometers(6378.1366);
        let flattening = 1.0 / 298.257;
        let position = geodetic_to_rectangular(
            Angle::from_degrees(-75.0),
            Angle::from_degrees(40.0),
            Distance::from_meters(250.0),
            equatorial_radius,
            flattening,
        )
        .unwrap();
        let (longitude, latitude, altitude) =
            rectangular_to_geodetic(&position, equatorial_radius, flattening).unwrap();
        assert_relative_eq!(longitude.degrees(), -75.0, epsilon = 1e-8);
        assert_relative_eq!(latitude.degrees(), 40.0, epsilon = 1e-8);
        assert_relative_eq!(altitude.meters(), 250.0, epsilon = 1e-3);
    }
}
