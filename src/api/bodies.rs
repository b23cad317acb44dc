//! Body name ↔ code wrappers.
//!
//! An unknown name or code is expected absence, not an error: the registry
//! is extensible and lookups are routinely used to probe it.

use crate::bridge::{bridged, bridged_lookup};
use crate::constants::BodyCode;
use crate::orrery_errors::{CallResult, Lookup};
use crate::toolkit;

/// Integer code of a body name, case- and whitespace-insensitive.
pub fn code_for_name(name: &str) -> CallResult<Lookup<BodyCode>> {
    bridged_lookup(|| {
        let mut code = 0;
        let found = toolkit::bodies::code_for_name(name, &mut code);
        (code, found)
    })
}

/// Canonical name of a body code.
pub fn name_for_code(code: BodyCode) -> CallResult<Lookup<String>> {
    bridged_lookup(|| {
        let mut name = String::new();
        let found = toolkit::bodies::name_for_code(code, &mut name);
        (name, found)
    })
}

/// Add (or override) one name → code association. A blank name fails with
/// `EMPTYSTRING`.
pub fn define_body(name: &str, code: BodyCode) -> CallResult<()> {
    bridged(|| toolkit::bodies::define(name, code))
}
