//! Time conversion wrappers.

use crate::bridge::bridged;
use crate::orrery_errors::CallResult;
use crate::quantities::{EphemerisInstant, EphemerisPeriod};
use crate::toolkit;

/// Output time system for [`instant_to_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSystem {
    #[default]
    Tdb,
    Utc,
}

impl TimeSystem {
    fn label(self) -> &'static str {
        match self {
            TimeSystem::Tdb => "TDB",
            TimeSystem::Utc => "UTC",
        }
    }
}

/// Output layout for [`instant_to_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// `2000 JAN 01 12:00:00.000 TDB`
    #[default]
    Calendar,
    /// `2000-01-01T12:00:00.000`
    Iso,
    /// `JD 2451545.000`
    JulianDate,
}

impl TimeFormat {
    fn label(self) -> &'static str {
        match self {
            TimeFormat::Calendar => "C",
            TimeFormat::Iso => "ISO",
            TimeFormat::JulianDate => "JD",
        }
    }
}

/// Parse an epoch string into an [`EphemerisInstant`].
///
/// Arguments
/// -----------------
/// * `text`: a calendar date with a month name or number
///   (`2000 JAN 01 12:00:00`, `2000-01-01T12:00:00`) or a Julian date
///   (`JD 2451545.0`), with an optional trailing scale label `TDB`,
///   `TT`/`TDT` or `UTC`. Without a label the string is read as UTC, the
///   documented default.
///
/// Return
/// ----------
/// * The instant on the TDB axis, or a failure with the
///   `INVALIDTIMESTRING` token.
pub fn str_to_instant(text: &str) -> CallResult<EphemerisInstant> {
    bridged(|| {
        let mut et = 0.0;
        toolkit::time::parse_epoch(text, &mut et);
        et
    })
    .map(EphemerisInstant::from_tdb_seconds)
}

/// Render an instant with `precision` decimal digits (at most 9) on the
/// seconds — or, for [`TimeFormat::JulianDate`], on the day.
pub fn instant_to_string(
    instant: EphemerisInstant,
    format: TimeFormat,
    system: TimeSystem,
    precision: usize,
) -> CallResult<String> {
    bridged(|| {
        let mut rendered = String::new();
        toolkit::time::format_epoch(
            instant.tdb_seconds(),
            system.label(),
            format.label(),
            precision,
            &mut rendered,
        );
        rendered
    })
}

/// ET−UTC at the given instant: the offset added to a UTC reading of a
/// clock to land on the TDB axis.
pub fn delta_et_utc(instant: EphemerisInstant) -> CallResult<EphemerisPeriod> {
    bridged(|| toolkit::time::delta_et_utc(instant.tdb_seconds()))
        .map(EphemerisPeriod::from_seconds)
}
