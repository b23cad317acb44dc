//! Typed physical constants and named-unit conversion.
//!
//! The constant accessors are pure: they read no toolkit state and cannot
//! fail, so they return quantities directly rather than [`CallResult`]s.

use crate::bridge::bridged;
use crate::constants::{
    B1950_JD, DEGREES_PER_RADIAN, J2000_JD, RADIANS_PER_DEGREE, SECONDS_PER_DAY,
    SECONDS_PER_JULIAN_YEAR, SPEED_OF_LIGHT_KM_S,
};
use crate::orrery_errors::CallResult;
use crate::quantities::{EphemerisPeriod, Speed};
use crate::toolkit;

/// The speed of light in vacuo.
pub fn speed_of_light() -> Speed {
    Speed::from_kilometers_per_second(SPEED_OF_LIGHT_KM_S)
}

/// One Julian day.
pub fn seconds_per_day() -> EphemerisPeriod {
    EphemerisPeriod::from_seconds(SECONDS_PER_DAY)
}

/// One Julian year (365.25 Julian days).
pub fn julian_year() -> EphemerisPeriod {
    EphemerisPeriod::from_seconds(SECONDS_PER_JULIAN_YEAR)
}

/// Julian date of the J2000 reference epoch.
pub fn j2000_julian_date() -> f64 {
    J2000_JD
}

/// Julian date of the B1950 reference epoch.
pub fn b1950_julian_date() -> f64 {
    B1950_JD
}

pub fn radians_per_degree() -> f64 {
    RADIANS_PER_DEGREE
}

pub fn degrees_per_radian() -> f64 {
    DEGREES_PER_RADIAN
}

/// Convert `value` between named units of one physical family (`"KM"`,
/// `"AU"`, `"DEGREES"`, `"DAYS"`, …). Unknown names fail with
/// `UNITSNOTRECOGNIZED`, cross-family requests with `INCOMPATIBLEUNITS`.
pub fn convert(value: f64, from: &str, to: &str) -> CallResult<f64> {
    bridged(|| {
        let mut converted = 0.0;
        toolkit::units::convert(value, from, to, &mut converted);
        converted
    })
}

#[cfg(test)]
mod wrapper_tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn constants_carry_their_dimensions() {
        assert_eq!(speed_of_light().kilometers_per_second(), 2.99792458e5);
        assert_eq!(seconds_per_day().days(), 1.0);
        assert_eq!(julian_year().days(), 365.25);
        assert_eq!(j2000_julian_date(), 2_451_545.0);
    }

    #[test]
    fn conversion_and_its_failure_modes() {
        let _serial = test_support::serial();
        let meters = convert(1.0, "KM", "M").unwrap();
        assert!((meters - 1000.0).abs() < 1e-9);
        assert_eq!(
            convert(1.0, "PARSECS", "KM").unwrap_err().token,
            "UNITSNOTRECOGNIZED"
        );
        assert_eq!(
            convert(1.0, "DAYS", "KM").unwrap_err().token,
            "INCOMPATIBLEUNITS"
        );
    }
}
