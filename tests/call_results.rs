//! The per-call error contract, observed from the outside: distinct causes
//! yield distinct stable tokens, failures never bleed into later calls, and
//! the documented end-to-end scenarios behave.

mod common;

use std::collections::HashSet;

use orrery::api::time::{TimeFormat, TimeSystem};
use orrery::api::{admin, ephemeris, frames, pool, time, units};
use orrery::quantities::{Angle, EphemerisInstant};

#[test]
fn distinct_failure_causes_have_distinct_tokens() {
    let _serial = common::serial();
    admin::reset().unwrap();

    // out-of-range numeric input
    let axis_error = frames::rotation_about_axis(Angle::from_degrees(10.0), 9).unwrap_err();
    // referencing an ephemeris object nothing has been loaded for
    let data_error =
        ephemeris::state("MOON", EphemerisInstant::J2000, "SUN", None, None).unwrap_err();
    // an internally raised test error
    let raised_error = admin::raise_error("TESTERROR", "raised by the test suite").unwrap_err();

    let tokens = [
        axis_error.token.clone(),
        data_error.token.clone(),
        raised_error.token.clone(),
    ];
    assert!(tokens.iter().all(|token| !token.is_empty()));
    let distinct: HashSet<&String> = tokens.iter().collect();
    assert_eq!(distinct.len(), tokens.len(), "tokens must be distinguishable");

    assert_eq!(axis_error.token, "BADAXISNUMBER");
    assert_eq!(data_error.token, "SPKINSUFFDATA");
    assert_eq!(raised_error.token, "TESTERROR");
    assert!(!axis_error.message.is_empty());
}

#[test]
fn failures_do_not_bleed_into_later_calls() {
    let _serial = common::serial();

    let error = frames::rotation_about_axis(Angle::from_degrees(45.0), 0).unwrap_err();
    assert_eq!(error.token, "BADAXISNUMBER");

    // the very next calls start from a clean slate
    assert_eq!(units::convert(1.0, "KM", "M").unwrap(), 1000.0);
    let rotation = frames::rotation_about_axis(Angle::from_degrees(45.0), 3).unwrap();
    assert_eq!(rotation.element(2, 2), 1.0);

    // a failure inspected late still describes its own call only
    let stale = time::str_to_instant("not a date").unwrap_err();
    let fresh = time::str_to_instant("2000 JAN 02 12:00:00 TDB").unwrap();
    assert_eq!(stale.token, "INVALIDTIMESTRING");
    assert_eq!(fresh.tdb_seconds(), 86_400.0);
}

#[test]
fn reference_epoch_scenario() {
    let _serial = common::serial();

    let instant = time::str_to_instant("2000 JAN 01 12:00:00 TDB").unwrap();
    assert_eq!(instant.tdb_seconds(), 0.0);

    let rendered =
        time::instant_to_string(instant, TimeFormat::Calendar, TimeSystem::Tdb, 3).unwrap();
    assert_eq!(rendered, "2000 JAN 01 12:00:00.000 TDB");

    let julian =
        time::instant_to_string(instant, TimeFormat::JulianDate, TimeSystem::Tdb, 1).unwrap();
    assert_eq!(julian, "JD 2451545.0");
}

#[test]
fn undefined_pool_variable_scenario() {
    let _serial = common::serial();
    admin::reset().unwrap();

    let outcome = pool::doubles("NEVER_DEFINED_ANYWHERE").unwrap();
    assert!(outcome.is_missing());

    // and the bridge reports no token for it: the next failing call
    // carries its own token, not a leftover
    let error = admin::raise_error("OTHERTOKEN", "unrelated").unwrap_err();
    assert_eq!(error.token, "OTHERTOKEN");
}

#[test]
fn rotation_out_of_range_scenario() {
    let _serial = common::serial();

    let error = frames::rotation_about_axis(Angle::from_degrees(30.0), 42).unwrap_err();
    assert_eq!(error.token, "BADAXISNUMBER");
    assert!(error.message.contains("42"));
    assert!(!error.message.is_empty());
}
