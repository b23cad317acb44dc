//! Ephemeris lookup wrappers: states, positions, coverage, and the typed
//! body-constant reader built on the kernel pool.

use crate::bridge::{bridged, bridged_lookup};
use crate::marshal;
use crate::orrery_errors::{CallResult, Lookup};
use crate::quantities::{
    DistanceVector, EphemerisInstant, EphemerisPeriod, MassParameter, StateVector, Window,
};
use crate::toolkit;

/// Aberration correction applied to a state or position lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AberrationCorrection {
    /// Geometric state, no correction. The documented default.
    #[default]
    None,
    /// Target retarded by the converged one-way light time.
    LightTime,
}

impl AberrationCorrection {
    fn label(self) -> &'static str {
        match self {
            AberrationCorrection::None => "NONE",
            AberrationCorrection::LightTime => "LT",
        }
    }
}

/// Largest number of coverage intervals a single query reports.
const WINDOW_CAPACITY: usize = 64;

fn resolve_body(name: &str) -> i32 {
    let mut code = 0;
    toolkit::bodies::resolve(name, &mut code);
    code
}

/// State of `target` relative to `observer` at `instant`, with the one-way
/// light time.
///
/// Arguments
/// -----------------
/// * `target`, `observer`: body names resolved through the registry.
/// * `instant`: request epoch on the TDB axis.
/// * `frame`: output frame name; `None` means the default `"J2000"`.
/// * `correction`: aberration correction; `None` means geometric.
///
/// Return
/// ----------
/// * The relative state and the one-way light time, or a failure: unknown
///   body names fail with `IDCODENOTFOUND`, bodies without loaded coverage
///   at the requested epoch with `SPKINSUFFDATA`.
pub fn state(
    target: &str,
    instant: EphemerisInstant,
    observer: &str,
    frame: Option<&str>,
    correction: Option<AberrationCorrection>,
) -> CallResult<(StateVector, EphemerisPeriod)> {
    let frame = frame.unwrap_or("J2000");
    let correction = correction.unwrap_or_default();
    bridged(|| {
        let target_code = resolve_body(target);
        let observer_code = resolve_body(observer);
        let mut raw_state = [0.0; 6];
        let mut light_time = 0.0;
        toolkit::ephemeris::lookup_state(
            target_code,
            instant.tdb_seconds(),
            frame,
            correction.label(),
            observer_code,
            &mut raw_state,
            &mut light_time,
        );
        (raw_state, light_time)
    })
    .map(|(raw_state, light_time)| {
        (
            marshal::state_from_array(&raw_state),
            EphemerisPeriod::from_seconds(light_time),
        )
    })
}

/// Position-only variant of [`state`].
pub fn position(
    target: &str,
    instant: EphemerisInstant,
    observer: &str,
    frame: Option<&str>,
    correction: Option<AberrationCorrection>,
) -> CallResult<(DistanceVector, EphemerisPeriod)> {
    state(target, instant, observer, frame, correction)
        .map(|(state, light_time)| (state.position, light_time))
}

/// Merged coverage window of `body` across every loaded ephemeris kernel.
/// A body with no loaded data has an empty window; an unknown body name
/// fails with `IDCODENOTFOUND`.
pub fn coverage(body: &str) -> CallResult<Window> {
    bridged(|| {
        let code = resolve_body(body);
        let mut buffer = [0.0; 2 * WINDOW_CAPACITY];
        let pairs = toolkit::ephemeris::coverage(code, &mut buffer);
        (buffer, pairs)
    })
    .map(|(buffer, pairs)| marshal::window_from_pairs(&buffer, pairs))
}

/// GM of a body, read from the pool variable `BODY<code>_GM` that physical
/// constant kernels define. `Missing` when no such kernel is loaded.
pub fn body_mass_parameter(body: &str) -> CallResult<Lookup<MassParameter>> {
    bridged_lookup(|| {
        let code = resolve_body(body);
        let mut raw = [0.0; 1];
        let (written, found) =
            toolkit::pool::get_doubles(&format!("BODY{code}_GM"), 0, &mut raw);
        (MassParameter::from_km3_per_s2(raw[0]), found && written == 1)
    })
}

#[cfg(test)]
mod wrapper_tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn unknown_bodies_fail_with_idcode_token() {
        let _serial = test_support::serial();
        let error = state(
            "NONEXISTENT ROCK",
            EphemerisInstant::J2000,
            "EARTH",
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(error.token, "IDCODENOTFOUND");

        let error = coverage("NONEXISTENT ROCK").unwrap_err();
        assert_eq!(error.token, "IDCODENOTFOUND");
    }

    #[test]
    fn missing_data_fails_with_spk_token() {
        let _serial = test_support::serial();
        crate::api::admin::reset().unwrap();
        let error = state("MARS", EphemerisInstant::J2000, "SUN", None, None).unwrap_err();
        assert_eq!(error.token, "SPKINSUFFDATA");
        assert!(!error.message.is_empty());
    }

    #[test]
    fn mass_parameter_reads_the_pool_constant() {
        let _serial = test_support::serial();
        crate::api::pool::put_doubles("BODY399_GM", &[398600.435436]).unwrap();
        let gm = body_mass_parameter("EARTH").unwrap().found().unwrap();
        assert_eq!(gm.km3_per_s2(), 398600.435436);
        crate::api::pool::delete_variable("BODY399_GM").unwrap();
        assert!(body_mass_parameter("EARTH").unwrap().is_missing());
    }
}
