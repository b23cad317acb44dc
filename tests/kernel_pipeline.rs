//! End-to-end exercise of the kernel pipeline: load fixture kernels, read
//! the pool through the typed wrappers, query coverage and states, unload,
//! and reset.

mod common;

use approx::assert_relative_eq;
use orrery::api::ephemeris::{self, AberrationCorrection};
use orrery::api::kernels::{self, KernelKind};
use orrery::api::{admin, pool, units};
use orrery::orrery_errors::Lookup;
use orrery::quantities::{EphemerisInstant, EphemerisPeriod};

#[test]
fn load_query_unload_reset() {
    let _serial = common::serial();
    admin::reset().unwrap();

    let constants = kernels::load(&common::data_path("constants.tk")).unwrap();
    let states = kernels::load(&common::data_path("states.eph")).unwrap();
    assert!(states.value() > constants.value());

    // file table enumeration: count, then index
    assert_eq!(kernels::loaded_count(None).unwrap(), 2);
    assert_eq!(
        kernels::loaded_count(Some(KernelKind::Ephemeris)).unwrap(),
        1
    );
    let record = kernels::loaded_record(Some(KernelKind::Ephemeris), 0)
        .unwrap()
        .found()
        .unwrap();
    assert!(record.path.as_str().ends_with("states.eph"));
    assert_eq!(record.kind, KernelKind::Ephemeris);
    assert!(kernels::loaded_record(None, 2).unwrap().is_missing());

    // typed pool reads
    let radii = pool::distance_vector("BODY399_RADII")
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(radii.z.kilometers(), 6356.7519);
    let gm = ephemeris::body_mass_parameter("EARTH")
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(gm.km3_per_s2(), 398600.435436);
    let phases = pool::strings("MISSION_PHASES").unwrap().found().unwrap();
    assert_eq!(phases, vec!["CRUISE", "APPROACH", "SCIENCE"]);

    // a variable no kernel ever defined: expected absence, not an error
    assert_eq!(pool::doubles("BODY876_GM").unwrap(), Lookup::Missing);

    // coverage: two disjoint Earth arcs, merged and ascending
    let window = ephemeris::coverage("EARTH").unwrap();
    assert_eq!(window.len(), 2);
    assert_eq!(window[0].start.tdb_seconds(), 0.0);
    assert_eq!(window[0].stop.tdb_seconds(), 172_800.0);
    assert_eq!(window[1].start.tdb_seconds(), 259_200.0);
    assert_eq!(window[1].stop.tdb_seconds(), 345_600.0);
    assert!(window[0].stop < window[1].start);
    assert_eq!(window[1].duration().days(), 1.0);

    assert!(ephemeris::coverage("MOON").unwrap().is_empty());

    // geometric state halfway into the first arc: the straight-line motion
    // makes the interpolated state exact
    let t = EphemerisInstant::from_tdb_seconds(43_200.0);
    let (state, light_time) = ephemeris::state("EARTH", t, "SUN", None, None).unwrap();
    assert_relative_eq!(state.position.x.kilometers(), -27_788_360.0, epsilon = 1e-6);
    assert_relative_eq!(state.position.y.kilometers(), 132_582_000.0, epsilon = 1e-6);
    assert_relative_eq!(state.position.z.kilometers(), 57_451_960.0, epsilon = 1e-6);
    assert_relative_eq!(
        state.velocity.dx.kilometers_per_second(),
        -29.8,
        epsilon = 1e-12
    );
    let expected_lt = state.position.norm() / units::speed_of_light();
    assert_relative_eq!(
        light_time.seconds(),
        expected_lt.seconds(),
        epsilon = 1e-9
    );
    assert!(light_time > EphemerisPeriod::from_seconds(400.0));

    // light-time correction retards the target along its track
    let (corrected, corrected_lt) = ephemeris::state(
        "EARTH",
        t,
        "SUN",
        None,
        Some(AberrationCorrection::LightTime),
    )
    .unwrap();
    let shift = corrected.position - state.position;
    let expected_shift = state.velocity * -corrected_lt;
    assert_relative_eq!(
        shift.x.kilometers(),
        expected_shift.x.kilometers(),
        epsilon = 1.0
    );
    assert_relative_eq!(
        shift.y.kilometers(),
        expected_shift.y.kilometers(),
        epsilon = 1.0
    );

    // the same state in ECLIPJ2000 is the frame rotation of the J2000 one
    let rotation = orrery::api::frames::position_transform("J2000", "ECLIPJ2000", t).unwrap();
    let (ecliptic, _) =
        ephemeris::state("EARTH", t, "SUN", Some("ECLIPJ2000"), None).unwrap();
    let rotated = rotation * state.position;
    assert_relative_eq!(
        ecliptic.position.x.kilometers(),
        rotated.x.kilometers(),
        epsilon = 1e-6
    );
    assert_relative_eq!(
        ecliptic.position.y.kilometers(),
        rotated.y.kilometers(),
        epsilon = 1e-6
    );
    assert_relative_eq!(
        ecliptic.position.z.kilometers(),
        rotated.z.kilometers(),
        epsilon = 1e-6
    );

    // inside the coverage gap: an error, not a silent extrapolation
    let gap = EphemerisInstant::from_tdb_seconds(200_000.0);
    let error = ephemeris::state("EARTH", gap, "SUN", None, None).unwrap_err();
    assert_eq!(error.token, "SPKINSUFFDATA");

    // unloading the ephemeris withdraws its segments and pool variables,
    // but not the other kernel's
    kernels::unload(&common::data_path("states.eph")).unwrap();
    assert_eq!(kernels::loaded_count(None).unwrap(), 1);
    assert!(ephemeris::coverage("EARTH").unwrap().is_empty());
    assert!(pool::strings("PRODUCER").unwrap().is_missing());
    assert!(pool::doubles("BODY399_GM").unwrap().is_found());

    // reset empties everything and is idempotent
    admin::reset().unwrap();
    let observe = || {
        (
            kernels::loaded_count(None).unwrap(),
            pool::doubles("BODY399_GM").unwrap(),
            ephemeris::coverage("EARTH").unwrap().len(),
            admin::error_action().unwrap(),
        )
    };
    let after_first = observe();
    admin::reset().unwrap();
    assert_eq!(observe(), after_first);
    assert_eq!(after_first.0, 0);
    assert_eq!(after_first.1, Lookup::Missing);
    assert_eq!(after_first.3, admin::ErrorAction::Report);
}

#[test]
fn unload_all_empties_tables_but_keeps_definitions() {
    let _serial = common::serial();
    admin::reset().unwrap();

    orrery::api::bodies::define_body("PIPELINE PROBE", -77_001).unwrap();
    kernels::load(&common::data_path("constants.tk")).unwrap();
    kernels::load(&common::data_path("states.eph")).unwrap();
    assert_eq!(kernels::loaded_count(None).unwrap(), 2);

    kernels::unload_all().unwrap();
    assert_eq!(kernels::loaded_count(None).unwrap(), 0);
    assert!(pool::doubles("BODY399_GM").unwrap().is_missing());
    assert!(ephemeris::coverage("EARTH").unwrap().is_empty());

    // body definitions are not kernel state and survive
    assert!(orrery::api::bodies::code_for_name("PIPELINE PROBE")
        .unwrap()
        .is_found());

    admin::reset().unwrap();
}

#[test]
fn rejected_kernel_files() {
    let _serial = common::serial();

    let error = kernels::load(&common::data_path("garbage.txt")).unwrap_err();
    assert_eq!(error.token, "BADKERNELTYPE");

    let error = kernels::load(&common::data_path("malformed.tk")).unwrap_err();
    assert_eq!(error.token, "BADKERNELFILE");

    let error = kernels::load(&common::data_path("does_not_exist.tk")).unwrap_err();
    assert_eq!(error.token, "NOSUCHFILE");

    // none of the rejected loads left a file table entry behind
    let count_before = kernels::loaded_count(None).unwrap();
    let _ = kernels::load(&common::data_path("garbage.txt"));
    assert_eq!(kernels::loaded_count(None).unwrap(), count_before);
}
