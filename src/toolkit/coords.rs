//! Coordinate-system conversions on raw rectangular triples.

use crate::constants::{Kilometer, Radian};

use super::errors::signal;

/// Rectangular → latitudinal `(radius, longitude, latitude)`. The origin
/// maps to all zeros, as the underlying library documents; no error is
/// signalled.
pub(crate) fn rect_to_latitudinal(rect: &[f64; 3]) -> (Kilometer, Radian, Radian) {
    let radius = (rect[0] * rect[0] + rect[1] * rect[1] + rect[2] * rect[2]).sqrt();
    if radius == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let longitude = if rect[0] == 0.0 && rect[1] == 0.0 {
        0.0
    } else {
        rect[1].atan2(rect[0])
    };
    let latitude = (rect[2] / radius).asin();
    (radius, longitude, latitude)
}

/// Latitudinal → rectangular.
pub(crate) fn latitudinal_to_rect(
    radius: Kilometer,
    longitude: Radian,
    latitude: Radian,
    rect: &mut [f64; 3],
) {
    rect[0] = radius * latitude.cos() * longitude.cos();
    rect[1] = radius * latitude.cos() * longitude.sin();
    rect[2] = radius * latitude.sin();
}

fn spheroid_ok(equatorial_radius: Kilometer, flattening: f64) -> bool {
    if equatorial_radius <= 0.0 {
        signal(
            "VALUEOUTOFRANGE",
            format!("Equatorial radius {equatorial_radius} km must be positive."),
        );
        return false;
    }
    if flattening >= 1.0 {
        signal(
            "VALUEOUTOFRANGE",
            format!("Flattening coefficient {flattening} must be less than 1."),
        );
        return false;
    }
    true
}

/// Geodetic `(longitude, latitude, altitude)` → rectangular, on the
/// spheroid given by `equatorial_radius` and `flattening`.
pub(crate) fn geodetic_to_rect(
    longitude: Radian,
    latitude: Radian,
    altitude: Kilometer,
    equatorial_radius: Kilometer,
    flattening: f64,
    rect: &mut [f64; 3],
) {
    if !spheroid_ok(equatorial_radius, flattening) {
        return;
    }
    let e2 = flattening * (2.0 - flattening);
    let sin_lat = latitude.sin();
    let prime_vertical = equatorial_radius / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    rect[0] = (prime_vertical + altitude) * latitude.cos() * longitude.cos();
    rect[1] = (prime_vertical + altitude) * latitude.cos() * longitude.sin();
    rect[2] = (prime_vertical * (1.0 - e2) + altitude) * sin_lat;
}

/// Rectangular → geodetic, by fixed-point iteration on the latitude. The
/// iteration converges to well below a millimeter for any point more than a
/// few kilometers from the spheroid's center.
pub(crate) fn rect_to_geodetic(
    rect: &[f64; 3],
    equatorial_radius: Kilometer,
    flattening: f64,
) -> Option<(Radian, Radian, Kilometer)> {
    if !spheroid_ok(equatorial_radius, flattening) {
        return None;
    }
    let e2 = flattening * (2.0 - flattening);
    let longitude = if rect[0] == 0.0 && rect[1] == 0.0 {
        0.0
    } else {
        rect[1].atan2(rect[0])
    };
    let p = (rect[0] * rect[0] + rect[1] * rect[1]).sqrt();
    if p == 0.0 {
        // polar axis: closed form
        let polar_radius = equatorial_radius * (1.0 - flattening);
        let latitude = if rect[2] >= 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            -std::f64::consts::FRAC_PI_2
        };
        return Some((0.0, latitude, rect[2].abs() - polar_radius));
    }

    let mut latitude = (rect[2] / (p * (1.0 - e2))).atan();
    let mut prime_vertical = equatorial_radius;
    for _ in 0..10 {
        let sin_lat = latitude.sin();
        prime_vertical = equatorial_radius / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = ((rect[2] + e2 * prime_vertical * sin_lat) / p).atan();
    }
    let altitude = p / latitude.cos() - prime_vertical;
    Some((longitude, latitude, altitude))
}

#[cfg(test)]
mod coord_tests {
    use super::*;
    use crate::test_support;
    use crate::toolkit::errors;
    use approx::assert_relative_eq;

    #[test]
    fn latitudinal_round_trip() {
        let mut rect = [0.0; 3];
        latitudinal_to_rect(2.0, 0.5, -0.3, &mut rect);
        let (r, lon, lat) = rect_to_latitudinal(&rect);
        assert_relative_eq!(r, 2.0, epsilon = 1e-12);
        assert_relative_eq!(lon, 0.5, epsilon = 1e-12);
        assert_relative_eq!(lat, -0.3, epsilon = 1e-12);

        assert_eq!(rect_to_latitudinal(&[0.0; 3]), (0.0, 0.0, 0.0));
    }

    #[test]
    fn geodetic_round_trip_on_an_earthlike_spheroid() {
        let _serial = test_support::serial();
        errors::set_action(errors::ErrorAction::Report);
        errors::reset();

        let re = 6378.1366;
        let f = 1.0 / 298.257;
        let (lon, lat, alt) = (2.1, 0.8, 0.42);
        let mut rect = [0.0; 3];
        geodetic_to_rect(lon, lat, alt, re, f, &mut rect);
        assert!(!errors::failed());

        let (lon2, lat2, alt2) = rect_to_geodetic(&rect, re, f).unwrap();
        assert_relative_eq!(lon2, lon, epsilon = 1e-10);
        assert_relative_eq!(lat2, lat, epsilon = 1e-10);
        assert_relative_eq!(alt2, alt, epsilon = 1e-6);
    }

    #[test]
    fn bad_spheroids_signal() {
        let _serial = test_support::serial();
        errors::set_action(errors::ErrorAction::Report);
        errors::reset();

        let mut rect = [0.0; 3];
        geodetic_to_rect(0.0, 0.0, 0.0, 6378.0, 1.5, &mut rect);
        assert!(errors::failed());
        assert_eq!(errors::short_message(), "VALUEOUTOFRANGE");
        errors::reset();

        assert!(rect_to_geodetic(&[1.0, 0.0, 0.0], -1.0, 0.0).is_none());
        assert_eq!(errors::short_message(), "VALUEOUTOFRANGE");
        errors::reset();
    }
}
