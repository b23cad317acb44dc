//! Named-unit conversion across the distance, angle and duration families.

use crate::constants::{
    AU_KM, RADIANS_PER_ARCSECOND, RADIANS_PER_DEGREE, SECONDS_PER_DAY, SECONDS_PER_JULIAN_YEAR,
};

use super::errors::signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Distance,
    Angle,
    Duration,
}

/// `(family, factor to the family's base unit)`; base units are km, radians
/// and seconds.
fn unit_named(name: &str) -> Option<(Family, f64)> {
    let unit = match name.trim().to_uppercase().as_str() {
        "M" | "METERS" => (Family::Distance, 1.0e-3),
        "KM" | "KILOMETERS" => (Family::Distance, 1.0),
        "AU" => (Family::Distance, AU_KM),
        "RADIANS" => (Family::Angle, 1.0),
        "DEGREES" => (Family::Angle, RADIANS_PER_DEGREE),
        "ARCSECONDS" => (Family::Angle, RADIANS_PER_ARCSECOND),
        "SECONDS" => (Family::Duration, 1.0),
        "MINUTES" => (Family::Duration, 60.0),
        "HOURS" => (Family::Duration, 3_600.0),
        "DAYS" => (Family::Duration, SECONDS_PER_DAY),
        "JULIAN YEARS" => (Family::Duration, SECONDS_PER_JULIAN_YEAR),
        _ => return None,
    };
    Some(unit)
}

/// Convert `value` from unit `from` to unit `to`. Unknown unit names signal
/// `UNITSNOTRECOGNIZED`; units of different physical families signal
/// `INCOMPATIBLEUNITS`.
pub(crate) fn convert(value: f64, from: &str, to: &str, out: &mut f64) {
    let Some((from_family, from_factor)) = unit_named(from) else {
        signal(
            "UNITSNOTRECOGNIZED",
            format!("'{from}' is not a recognized unit name."),
        );
        return;
    };
    let Some((to_family, to_factor)) = unit_named(to) else {
        signal(
            "UNITSNOTRECOGNIZED",
            format!("'{to}' is not a recognized unit name."),
        );
        return;
    };
    if from_family != to_family {
        signal(
            "INCOMPATIBLEUNITS",
            format!("Cannot convert between '{from}' and '{to}'."),
        );
        return;
    }
    *out = value * from_factor / to_factor;
}
