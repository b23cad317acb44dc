//! Time-string conversion on the TDB axis.
//!
//! The toolkit's native time coordinate is TDB seconds past the J2000 epoch
//! (2000-01-01 12:00:00 TDB, JD 2451545.0). TDB-labelled calendar strings
//! are pure calendar arithmetic against that epoch; UTC and TT strings go
//! through `hifitime`, which owns the leap-second table and scale offsets.

use hifitime::{Duration, Epoch, TimeScale};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{EphemerisSecond, J2000_JD, SECONDS_PER_DAY};

use super::errors::signal;

const ET_MINUS_TAI: f64 = 32.184;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    Tdb,
    Tt,
    Utc,
}

impl Scale {
    fn from_label(label: Option<&str>) -> Scale {
        match label {
            Some("TDB") => Scale::Tdb,
            Some("TT") | Some("TDT") => Scale::Tt,
            _ => Scale::Utc,
        }
    }
}

static CALENDAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{1,4})[ /-]([A-Z]{3,9}|\d{1,2})[ /-](\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2}(?:\.\d+)?))?)?(?:\s+(TDB|TDT|TT|UTC))?$",
    )
    .expect("calendar pattern is valid")
});

static JULIAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^JD\s*(\d+(?:\.\d*)?)(?:\s+(TDB|TDT|TT|UTC))?$").expect("JD pattern is valid")
});

const MONTHS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

fn month_number(token: &str) -> Option<u8> {
    if let Ok(numeric) = token.parse::<u8>() {
        return (1..=12).contains(&numeric).then_some(numeric);
    }
    MONTHS
        .iter()
        .position(|full| token.len() >= 3 && full.starts_with(token))
        .map(|index| index as u8 + 1)
}

fn month_label(month: u8) -> &'static str {
    &MONTHS[(month - 1) as usize][..3]
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Julian day number of the Gregorian date `(y, m, d)` at noon
/// (Fliegel & Van Flandern).
fn julian_day_number(year: i64, month: i64, day: i64) -> i64 {
    let a = (month - 14) / 12;
    (1461 * (year + 4800 + a)) / 4 + (367 * (month - 2 - 12 * a)) / 12
        - (3 * ((year + 4900 + a) / 100)) / 4
        + day
        - 32075
}

/// Inverse of [`julian_day_number`].
fn calendar_from_jdn(jdn: i64) -> (i64, u8, u8) {
    let l = jdn + 68569;
    let n = (4 * l) / 146097;
    let l = l - (146097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1461001;
    let l = l - (1461 * i) / 4 + 31;
    let j = (80 * l) / 2447;
    let day = l - (2447 * j) / 80;
    let l = j / 11;
    let month = j + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;
    (year, month as u8, day as u8)
}

// -------------------------------------------------------------------------------------------------
// Parsing
// -------------------------------------------------------------------------------------------------

/// Parse an epoch string into TDB seconds past J2000, writing `et` on
/// success. Accepted forms: `YYYY MON DD [HH:MM[:SS.fff]]`,
/// `YYYY-MM-DDTHH:MM:SS`, and `JD <days>`, each with an optional trailing
/// scale label `TDB`, `TT`/`TDT` or `UTC` (default `UTC`). Anything else
/// signals `INVALIDTIMESTRING`.
pub(crate) fn parse_epoch(input: &str, et: &mut EphemerisSecond) {
    let text = input.trim().to_uppercase();

    if let Some(captures) = JULIAN_RE.captures(&text) {
        let jd: f64 = match captures[1].parse() {
            Ok(value) => value,
            Err(_) => {
                signal(
                    "INVALIDTIMESTRING",
                    format!("Julian date in '{input}' is not a readable number."),
                );
                return;
            }
        };
        match Scale::from_label(captures.get(2).map(|m| m.as_str())) {
            Scale::Tdb => *et = (jd - J2000_JD) * SECONDS_PER_DAY,
            Scale::Utc => *et = Epoch::from_jde_utc(jd).to_et_seconds(),
            Scale::Tt => signal(
                "INVALIDTIMESTRING",
                format!("Julian dates carry only TDB or UTC labels; '{input}' uses TT."),
            ),
        }
        return;
    }

    let Some(captures) = CALENDAR_RE.captures(&text) else {
        signal(
            "INVALIDTIMESTRING",
            format!("Could not recognize '{input}' as a calendar or Julian date epoch."),
        );
        return;
    };

    let year: i64 = captures[1].parse().unwrap_or(0);
    let Some(month) = month_number(&captures[2]) else {
        signal(
            "INVALIDTIMESTRING",
            format!("'{}' is not a month in '{input}'.", &captures[2]),
        );
        return;
    };
    let day: u8 = captures[3].parse().unwrap_or(0);
    let hour: u8 = captures
        .get(4)
        .map_or(0, |m| m.as_str().parse().unwrap_or(99));
    let minute: u8 = captures
        .get(5)
        .map_or(0, |m| m.as_str().parse().unwrap_or(99));
    let second: f64 = captures
        .get(6)
        .map_or(0.0, |m| m.as_str().parse().unwrap_or(99.0));

    if day == 0
        || day > days_in_month(year, month)
        || hour > 23
        || minute > 59
        || !(0.0..60.0).contains(&second)
    {
        signal(
            "INVALIDTIMESTRING",
            format!("A calendar component of '{input}' is out of range."),
        );
        return;
    }

    match Scale::from_label(captures.get(7).map(|m| m.as_str())) {
        Scale::Tdb => {
            let jdn = julian_day_number(year, month as i64, day as i64);
            *et = (jdn - J2000_JD as i64) as f64 * SECONDS_PER_DAY
                + (hour as f64 - 12.0) * 3600.0
                + minute as f64 * 60.0
                + second;
        }
        scale => {
            let whole = second.trunc();
            let nanos = (((second - whole) * 1.0e9).round() as u32).min(999_999_999);
            let time_scale = match scale {
                Scale::Tt => TimeScale::TT,
                _ => TimeScale::UTC,
            };
            let epoch = Epoch::from_gregorian(
                year as i32,
                month,
                day,
                hour,
                minute,
                whole as u8,
                nanos,
                time_scale,
            );
            *et = epoch.to_et_seconds();
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Formatting
// -------------------------------------------------------------------------------------------------

/// Render an epoch. `system` is `"TDB"` or `"UTC"`; `format` is `"C"`
/// (calendar), `"ISO"` or `"JD"`; `precision` is the number of decimal
/// digits on the seconds (or day) field, at most 9.
pub(crate) fn format_epoch(
    et: EphemerisSecond,
    system: &str,
    format: &str,
    precision: usize,
    out: &mut String,
) {
    if precision > 9 {
        signal(
            "VALUEOUTOFRANGE",
            format!("Output precision {precision} exceeds the supported maximum of 9 digits."),
        );
        return;
    }
    let system = system.trim().to_uppercase();
    if system != "TDB" && system != "UTC" {
        signal(
            "INVALIDOPTION",
            format!("'{system}' is not a supported output time system (TDB or UTC)."),
        );
        return;
    }
    let format = format.trim().to_uppercase();

    if format == "JD" {
        let jd = if system == "TDB" {
            et / SECONDS_PER_DAY + J2000_JD
        } else {
            Epoch::from_et_seconds(et).to_jde_utc_days()
        };
        *out = format!("JD {jd:.precision$}");
        return;
    }
    if format != "C" && format != "ISO" {
        signal(
            "INVALIDTIMEFORMAT",
            format!("'{format}' is not a supported output format (C, ISO or JD)."),
        );
        return;
    }

    let (year, month, day, hour, minute, seconds) = if system == "TDB" {
        split_tdb(et, precision)
    } else {
        split_utc(et, precision)
    };

    let sec_width = if precision == 0 { 2 } else { precision + 3 };
    *out = if format == "C" {
        let label = month_label(month);
        format!(
            "{year:04} {label} {day:02} {hour:02}:{minute:02}:{seconds:0sec_width$.precision$} {system}"
        )
    } else {
        format!(
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{seconds:0sec_width$.precision$}"
        )
    };
}

/// Split a TDB epoch into calendar fields, rounding the seconds-of-day to
/// `precision` digits first so the fields never need a carry afterwards.
fn split_tdb(et: f64, precision: usize) -> (i64, u8, u8, u8, u8, f64) {
    let mut days = ((et + SECONDS_PER_DAY / 2.0) / SECONDS_PER_DAY).floor();
    let scale = 10f64.powi(precision as i32);
    let mut sod = ((et + SECONDS_PER_DAY / 2.0 - days * SECONDS_PER_DAY) * scale).round() / scale;
    if sod >= SECONDS_PER_DAY {
        sod -= SECONDS_PER_DAY;
        days += 1.0;
    }
    let (year, month, day) = calendar_from_jdn(J2000_JD as i64 + days as i64);
    let hour = (sod / 3600.0).floor();
    let minute = ((sod - hour * 3600.0) / 60.0).floor();
    let seconds = sod - hour * 3600.0 - minute * 60.0;
    (year, month, day, hour as u8, minute as u8, seconds)
}

fn split_utc(et: f64, precision: usize) -> (i64, u8, u8, u8, u8, f64) {
    let epoch = Epoch::from_et_seconds(et);
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    let scale = 10f64.powi(precision as i32);
    let field = second as f64 + nanos as f64 * 1.0e-9;
    let rounded = (field * scale).round() / scale;
    if rounded < 60.0 {
        return (year as i64, month, day, hour, minute, rounded);
    }
    // Rounding crossed the minute: re-split just past the boundary.
    let nudged = epoch + Duration::from_seconds(60.0 - field + 0.5 / scale);
    let (year, month, day, hour, minute, _, _) = nudged.to_gregorian_utc();
    (year as i64, month, day, hour, minute, 0.0)
}

// -------------------------------------------------------------------------------------------------
// Scale offset
// -------------------------------------------------------------------------------------------------

/// ET−UTC at `et`, in seconds: the 32.184 s ET−TAI offset plus the leap
/// seconds accumulated by that date. Periodic relativistic terms below the
/// two-millisecond level are not modelled.
pub(crate) fn delta_et_utc(et: EphemerisSecond) -> f64 {
    let epoch = Epoch::from_et_seconds(et);
    ET_MINUS_TAI + epoch.leap_seconds(true).unwrap_or(0.0)
}

#[cfg(test)]
mod time_tests {
    use super::*;
    use crate::test_support;
    use crate::toolkit::errors;
    use approx::assert_relative_eq;

    #[test]
    fn calendar_math_round_trips() {
        assert_eq!(julian_day_number(2000, 1, 1), 2_451_545);
        assert_eq!(calendar_from_jdn(2_451_545), (2000, 1, 1));
        assert_eq!(julian_day_number(1976, 9, 20), 2_443_042);
        assert_eq!(calendar_from_jdn(2_443_042), (1976, 9, 20));
        for jdn in [2_400_000, 2_451_545, 2_460_000, 2_470_000] {
            let (y, m, d) = calendar_from_jdn(jdn);
            assert_eq!(julian_day_number(y, m as i64, d as i64), jdn);
        }
    }

    #[test]
    fn month_tokens() {
        assert_eq!(month_number("JAN"), Some(1));
        assert_eq!(month_number("JANUARY"), Some(1));
        assert_eq!(month_number("SEPT"), Some(9));
        assert_eq!(month_number("12"), Some(12));
        assert_eq!(month_number("13"), None);
        assert_eq!(month_number("JA"), None);
        assert_eq!(month_number("FOO"), None);
    }

    #[test]
    fn tdb_reference_epoch_is_zero() {
        let _serial = test_support::serial();
        errors::set_action(errors::ErrorAction::Report);
        errors::reset();

        let mut et = f64::NAN;
        parse_epoch("2000 JAN 01 12:00:00 TDB", &mut et);
        assert!(!errors::failed());
        assert_eq!(et, 0.0);

        parse_epoch("JD 2451545.0 TDB", &mut et);
        assert_eq!(et, 0.0);

        parse_epoch("2000 JAN 02 12:00:00 TDB", &mut et);
        assert_eq!(et, 86_400.0);

        parse_epoch("2000-01-01T11:58:00 TDB", &mut et);
        assert_eq!(et, -120.0);
    }

    #[test]
    fn utc_strings_include_the_scale_offset() {
        let _serial = test_support::serial();
        errors::set_action(errors::ErrorAction::Report);
        errors::reset();

        // ET-UTC was 32.184 + 32 leap seconds in 2000
        let mut et = 0.0;
        parse_epoch("2000 JAN 01 12:00:00 UTC", &mut et);
        assert!(!errors::failed());
        assert_relative_eq!(et, 64.184, epsilon = 2e-3);

        assert_relative_eq!(delta_et_utc(0.0), 64.184, epsilon = 1e-9);
    }

    #[test]
    fn malformed_strings_signal() {
        let _serial = test_support::serial();
        errors::set_action(errors::ErrorAction::Report);
        errors::reset();

        let mut et = 123.0;
        parse_epoch("yesterday around noon", &mut et);
        assert!(errors::failed());
        assert_eq!(errors::short_message(), "INVALIDTIMESTRING");
        assert_eq!(et, 123.0);
        errors::reset();

        parse_epoch("2000 FOO 01 12:00:00 TDB", &mut et);
        assert_eq!(errors::short_message(), "INVALIDTIMESTRING");
        errors::reset();

        parse_epoch("2001 FEB 29 00:00:00 TDB", &mut et);
        assert_eq!(errors::short_message(), "INVALIDTIMESTRING");
        errors::reset();

        parse_epoch("2000 JAN 01 25:00:00 TDB", &mut et);
        assert_eq!(errors::short_message(), "INVALIDTIMESTRING");
        errors::reset();
    }

    #[test]
    fn formatting_calendar_and_julian() {
        let _serial = test_support::serial();
        errors::set_action(errors::ErrorAction::Report);
        errors::reset();

        let mut out = String::new();
        format_epoch(0.0, "TDB", "C", 3, &mut out);
        assert!(!errors::failed());
        assert_eq!(out, "2000 JAN 01 12:00:00.000 TDB");

        format_epoch(0.0, "TDB", "C", 0, &mut out);
        assert_eq!(out, "2000 JAN 01 12:00:00 TDB");

        format_epoch(86_400.0, "TDB", "ISO", 1, &mut out);
        assert_eq!(out, "2000-01-02T12:00:00.0");

        format_epoch(-120.0, "TDB", "C", 2, &mut out);
        assert_eq!(out, "2000 JAN 01 11:58:00.00 TDB");

        format_epoch(43_200.0, "TDB", "JD", 2, &mut out);
        assert_eq!(out, "JD 2451545.50");
    }

    #[test]
    fn formatting_rejects_bad_arguments() {
        let _serial = test_support::serial();
        errors::set_action(errors::ErrorAction::Report);
        errors::reset();

        let mut out = String::new();
        format_epoch(0.0, "TDB", "C", 12, &mut out);
        assert_eq!(errors::short_message(), "VALUEOUTOFRANGE");
        errors::reset();

        format_epoch(0.0, "GPS", "C", 3, &mut out);
        assert_eq!(errors::short_message(), "INVALIDOPTION");
        errors::reset();

        format_epoch(0.0, "TDB", "XYZ", 3, &mut out);
        assert_eq!(errors::short_message(), "INVALIDTIMEFORMAT");
        errors::reset();
    }

    #[test]
    fn parse_format_round_trip_in_tdb() {
        let _serial = test_support::serial();
        errors::set_action(errors::ErrorAction::Report);
        errors::reset();

        let mut et = 0.0;
        parse_epoch("2024 MAR 15 06:30:15.250 TDB", &mut et);
        let mut out = String::new();
        format_epoch(et, "TDB", "C", 3, &mut out);
        assert_eq!(out, "2024 MAR 15 06:30:15.250 TDB");
    }
}
