//! Body name ↔ code registry.
//!
//! A two-way map seeded with the standard solar-system codes (barycentres
//! 0–9, `SUN` 10, planet centers `x99`, `MOON` 301) and extensible at run
//! time. Names are case-insensitive and whitespace-normalized.

use ahash::AHashMap;

use super::with_state;

const BUILTIN: &[(i32, &str)] = &[
    (0, "SOLAR SYSTEM BARYCENTER"),
    (1, "MERCURY BARYCENTER"),
    (2, "VENUS BARYCENTER"),
    (3, "EARTH BARYCENTER"),
    (4, "MARS BARYCENTER"),
    (5, "JUPITER BARYCENTER"),
    (6, "SATURN BARYCENTER"),
    (7, "URANUS BARYCENTER"),
    (8, "NEPTUNE BARYCENTER"),
    (9, "PLUTO BARYCENTER"),
    (10, "SUN"),
    (199, "MERCURY"),
    (299, "VENUS"),
    (301, "MOON"),
    (399, "EARTH"),
    (499, "MARS"),
    (599, "JUPITER"),
    (699, "SATURN"),
    (799, "URANUS"),
    (899, "NEPTUNE"),
    (999, "PLUTO"),
];

/// Extra names accepted on input but never produced on output.
const ALIASES: &[(i32, &str)] = &[(0, "SSB"), (3, "EMB")];

#[derive(Debug, Clone)]
pub(crate) struct BodyRegistry {
    by_name: AHashMap<String, i32>,
    by_code: AHashMap<i32, String>,
}

impl BodyRegistry {
    pub(crate) fn builtin() -> Self {
        let mut registry = BodyRegistry {
            by_name: AHashMap::new(),
            by_code: AHashMap::new(),
        };
        for &(code, name) in ALIASES {
            registry.by_name.insert(name.to_owned(), code);
        }
        for &(code, name) in BUILTIN {
            registry.by_name.insert(name.to_owned(), code);
            registry.by_code.insert(code, name.to_owned());
        }
        registry
    }

    pub(crate) fn code_for(&self, name: &str) -> Option<i32> {
        self.by_name.get(&normalize(name)).copied()
    }

    pub(crate) fn name_for(&self, code: i32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    pub(crate) fn define(&mut self, name: &str, code: i32) {
        let name = normalize(name);
        self.by_name.insert(name.clone(), code);
        self.by_code.insert(code, name);
    }
}

/// Uppercase, trim, and collapse internal whitespace runs to single blanks.
fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

// -------------------------------------------------------------------------------------------------
// Entry points
// -------------------------------------------------------------------------------------------------

pub(crate) fn code_for_name(name: &str, code: &mut i32) -> bool {
    with_state(|state| match state.bodies.code_for(name) {
        Some(found) => {
            *code = found;
            true
        }
        None => false,
    })
}

pub(crate) fn name_for_code(code: i32, name: &mut String) -> bool {
    with_state(|state| match state.bodies.name_for(code) {
        Some(found) => {
            *name = found.to_owned();
            true
        }
        None => false,
    })
}

/// Resolve a name that must exist, signalling `IDCODENOTFOUND` when it does
/// not. Used by the ephemeris entry points, where an unknown body is an
/// error rather than an expected absence.
pub(crate) fn resolve(name: &str, code: &mut i32) {
    with_state(|state| match state.bodies.code_for(name) {
        Some(found) => *code = found,
        None => state.error.signal(
            "IDCODENOTFOUND",
            format!("The body name '{name}' is not associated with an ID code."),
        ),
    });
}

pub(crate) fn define(name: &str, code: i32) {
    with_state(|state| {
        if normalize(name).is_empty() {
            state
                .error
                .signal("EMPTYSTRING", "A body name must not be blank.");
            return;
        }
        state.bodies.define(name, code);
    });
}
