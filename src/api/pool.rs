//! Kernel pool wrappers.
//!
//! Reads come in two flavors: the general readers return the variable's
//! values sized to the count the pool reports, and the typed readers
//! (`distance`, `distance_vector`, `mass_parameter`) stamp the raw numbers
//! with their physical dimension on the way out — the pool itself stores
//! bare doubles and has no idea what they mean.

use crate::bridge::{bridged, bridged_lookup};
use crate::marshal;
use crate::orrery_errors::{CallResult, Lookup};
use crate::quantities::{Distance, DistanceVector, MassParameter};
use crate::toolkit;

/// Number of elements and type of a pool variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAttributes {
    pub count: usize,
    pub kind: PoolKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Numeric,
    Text,
}

/// Set (or replace) a numeric pool variable.
pub fn put_doubles(name: &str, values: &[f64]) -> CallResult<()> {
    bridged(|| toolkit::pool::put_doubles(name, values))
}

/// Set (or replace) a text pool variable.
pub fn put_strings(name: &str, values: &[&str]) -> CallResult<()> {
    let owned: Vec<String> = values.iter().map(|value| (*value).to_string()).collect();
    bridged(|| toolkit::pool::put_strings(name, &owned))
}

/// All numeric values of a variable, or `Missing` when it was never
/// defined. Requesting a text variable fails with `TYPEMISMATCH`.
pub fn doubles(name: &str) -> CallResult<Lookup<Vec<f64>>> {
    bridged_lookup(|| {
        let (found, count, _) = toolkit::pool::attributes(name);
        if !found {
            return (Vec::new(), false);
        }
        let mut buffer = vec![0.0; count];
        let (written, found) = toolkit::pool::get_doubles(name, 0, &mut buffer);
        (marshal::reported(buffer, written), found)
    })
}

/// All text values of a variable.
pub fn strings(name: &str) -> CallResult<Lookup<Vec<String>>> {
    bridged_lookup(|| {
        let (found, count, _) = toolkit::pool::attributes(name);
        if !found {
            return (Vec::new(), false);
        }
        let mut buffer = Vec::new();
        let found = toolkit::pool::get_strings(name, 0, count, &mut buffer);
        (buffer, found)
    })
}

/// First numeric element of a variable.
pub fn scalar(name: &str) -> CallResult<Lookup<f64>> {
    bridged_lookup(|| {
        let mut buffer = [0.0; 1];
        let (written, found) = toolkit::pool::get_doubles(name, 0, &mut buffer);
        (buffer[0], found && written == 1)
    })
}

/// A one-element variable read as a distance in kilometers.
pub fn distance(name: &str) -> CallResult<Lookup<Distance>> {
    Ok(scalar(name)?.map(Distance::from_kilometers))
}

/// A one-element variable read as a mass parameter GM in km³/s².
pub fn mass_parameter(name: &str) -> CallResult<Lookup<MassParameter>> {
    Ok(scalar(name)?.map(MassParameter::from_km3_per_s2))
}

/// A three-element variable read as a distance vector in kilometers. A
/// variable with any other element count fails with `BADDIMENSION`.
pub fn distance_vector(name: &str) -> CallResult<Lookup<DistanceVector>> {
    bridged_lookup(|| {
        let mut raw = [0.0; 3];
        let found = toolkit::pool::get_doubles_exact(name, &mut raw);
        (marshal::distance_vector_from_array(&raw), found)
    })
}

/// Element count and type of a variable, or `Missing`.
pub fn attributes(name: &str) -> CallResult<Lookup<PoolAttributes>> {
    bridged_lookup(|| {
        let (found, count, kind) = toolkit::pool::attributes(name);
        let kind = if kind == 'C' {
            PoolKind::Text
        } else {
            PoolKind::Numeric
        };
        (PoolAttributes { count, kind }, found)
    })
}

/// Remove one variable; removing an undefined variable succeeds.
pub fn delete_variable(name: &str) -> CallResult<()> {
    bridged(|| toolkit::pool::delete(name))
}

/// Drop every pool variable, whether it came from a kernel file or a `put`.
pub fn clear() -> CallResult<()> {
    bridged(toolkit::pool::clear)
}

#[cfg(test)]
mod wrapper_tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn undefined_variables_are_missing_not_errors() {
        let _serial = test_support::serial();
        let _ = delete_variable("WRAPPER_TEST_UNSET");
        let outcome = doubles("WRAPPER_TEST_UNSET").unwrap();
        assert!(outcome.is_missing());
        let outcome = distance("WRAPPER_TEST_UNSET").unwrap();
        assert!(outcome.is_missing());
        let outcome = attributes("WRAPPER_TEST_UNSET").unwrap();
        assert!(outcome.is_missing());
    }

    #[test]
    fn typed_readers_stamp_dimensions() {
        let _serial = test_support::serial();
        put_doubles("WRAPPER_TEST_GM", &[398600.435436]).unwrap();
        put_doubles("WRAPPER_TEST_RADII", &[6378.14, 6378.14, 6356.75]).unwrap();

        let gm = mass_parameter("WRAPPER_TEST_GM").unwrap().found().unwrap();
        assert_eq!(gm.km3_per_s2(), 398600.435436);

        let radii = distance_vector("WRAPPER_TEST_RADII")
            .unwrap()
            .found()
            .unwrap();
        assert_eq!(radii.z.kilometers(), 6356.75);

        delete_variable("WRAPPER_TEST_GM").unwrap();
        delete_variable("WRAPPER_TEST_RADII").unwrap();
    }

    #[test]
    fn dimension_and_type_misuse_are_errors() {
        let _serial = test_support::serial();
        put_doubles("WRAPPER_TEST_PAIR", &[1.0, 2.0]).unwrap();
        let error = distance_vector("WRAPPER_TEST_PAIR").unwrap_err();
        assert_eq!(error.token, "BADDIMENSION");

        put_strings("WRAPPER_TEST_NAMES", &["ODYSSEY"]).unwrap();
        let error = doubles("WRAPPER_TEST_NAMES").unwrap_err();
        assert_eq!(error.token, "TYPEMISMATCH");

        let error = put_doubles("", &[1.0]).unwrap_err();
        assert_eq!(error.token, "EMPTYSTRING");

        delete_variable("WRAPPER_TEST_PAIR").unwrap();
        delete_variable("WRAPPER_TEST_NAMES").unwrap();
    }

    #[test]
    fn attributes_report_count_and_kind() {
        let _serial = test_support::serial();
        put_doubles("WRAPPER_TEST_ATTR", &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let attrs = attributes("WRAPPER_TEST_ATTR").unwrap().found().unwrap();
        assert_eq!(attrs.count, 4);
        assert_eq!(attrs.kind, PoolKind::Numeric);
        delete_variable("WRAPPER_TEST_ATTR").unwrap();
    }
}
