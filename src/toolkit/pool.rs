//! The kernel pool: named numeric or text variables.
//!
//! Variables arrive from loaded text kernels or from direct `put` calls and
//! are read back through the fixed-capacity buffer convention: the caller
//! supplies a buffer sized to its capacity, the pool reports how many
//! elements it actually wrote and whether the variable existed at all.

use super::{with_state, ToolkitState};

/// Longest accepted variable name, matching the kernel-file grammar.
pub(crate) const MAX_NAME_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PoolEntry {
    Doubles(Vec<f64>),
    Strings(Vec<String>),
}

impl PoolEntry {
    pub(crate) fn len(&self) -> usize {
        match self {
            PoolEntry::Doubles(values) => values.len(),
            PoolEntry::Strings(values) => values.len(),
        }
    }

    /// Pool type code: `'N'` numeric, `'C'` character.
    pub(crate) fn kind(&self) -> char {
        match self {
            PoolEntry::Doubles(_) => 'N',
            PoolEntry::Strings(_) => 'C',
        }
    }
}

/// Validate a variable name, signalling on rejection. Returns `false` when
/// the name was rejected and the operation must not proceed.
fn name_ok(state: &mut ToolkitState, name: &str) -> bool {
    if name.is_empty() {
        state
            .error
            .signal("EMPTYSTRING", "A kernel pool variable name must not be blank.");
        return false;
    }
    if name.len() > MAX_NAME_LEN || name.chars().any(|c| c.is_whitespace()) {
        state.error.signal(
            "BADVARNAME",
            format!(
                "'{name}' is not a valid kernel pool variable name \
                 (at most {MAX_NAME_LEN} characters, no blanks)."
            ),
        );
        return false;
    }
    true
}

// -------------------------------------------------------------------------------------------------
// Entry points
// -------------------------------------------------------------------------------------------------

pub(crate) fn put_doubles(name: &str, values: &[f64]) {
    with_state(|state| {
        if !name_ok(state, name) {
            return;
        }
        state
            .pool
            .insert(name.to_owned(), PoolEntry::Doubles(values.to_vec()));
    });
}

pub(crate) fn put_strings(name: &str, values: &[String]) {
    with_state(|state| {
        if !name_ok(state, name) {
            return;
        }
        state
            .pool
            .insert(name.to_owned(), PoolEntry::Strings(values.to_vec()));
    });
}

/// Copy up to `out.len()` numeric elements starting at `start` into `out`.
/// Returns `(written, found)`. A variable of character type signals
/// `TYPEMISMATCH` and reports not-found outputs.
pub(crate) fn get_doubles(name: &str, start: usize, out: &mut [f64]) -> (usize, bool) {
    with_state(|state| {
        if !name_ok(state, name) {
            return (0, false);
        }
        match state.pool.get(name) {
            None => (0, false),
            Some(PoolEntry::Strings(_)) => {
                state.error.signal(
                    "TYPEMISMATCH",
                    format!("Kernel pool variable '{name}' has character type, numeric requested."),
                );
                (0, false)
            }
            Some(PoolEntry::Doubles(values)) => {
                let tail = values.get(start..).unwrap_or(&[]);
                let written = tail.len().min(out.len());
                out[..written].copy_from_slice(&tail[..written]);
                (written, true)
            }
        }
    })
}

/// Numeric read that insists on an exact element count, for the typed
/// fixed-size readers (a distance vector is three elements, no more).
pub(crate) fn get_doubles_exact(name: &str, out: &mut [f64]) -> bool {
    with_state(|state| {
        if !name_ok(state, name) {
            return false;
        }
        match state.pool.get(name) {
            None => false,
            Some(PoolEntry::Strings(_)) => {
                state.error.signal(
                    "TYPEMISMATCH",
                    format!("Kernel pool variable '{name}' has character type, numeric requested."),
                );
                false
            }
            Some(PoolEntry::Doubles(values)) => {
                if values.len() != out.len() {
                    state.error.signal(
                        "BADDIMENSION",
                        format!(
                            "Kernel pool variable '{name}' has {} element(s), {} required.",
                            values.len(),
                            out.len()
                        ),
                    );
                    return false;
                }
                out.copy_from_slice(values);
                true
            }
        }
    })
}

/// Copy up to `room` text elements starting at `start` into `out`.
pub(crate) fn get_strings(name: &str, start: usize, room: usize, out: &mut Vec<String>) -> bool {
    with_state(|state| {
        out.clear();
        if !name_ok(state, name) {
            return false;
        }
        match state.pool.get(name) {
            None => false,
            Some(PoolEntry::Doubles(_)) => {
                state.error.signal(
                    "TYPEMISMATCH",
                    format!("Kernel pool variable '{name}' has numeric type, character requested."),
                );
                false
            }
            Some(PoolEntry::Strings(values)) => {
                out.extend(
                    values
                        .get(start..)
                        .unwrap_or(&[])
                        .iter()
                        .take(room)
                        .cloned(),
                );
                true
            }
        }
    })
}

/// `(found, element count, type code)` for a variable.
pub(crate) fn attributes(name: &str) -> (bool, usize, char) {
    with_state(|state| {
        if !name_ok(state, name) {
            return (false, 0, ' ');
        }
        match state.pool.get(name) {
            None => (false, 0, ' '),
            Some(entry) => (true, entry.len(), entry.kind()),
        }
    })
}

/// Remove one variable. Deleting an absent variable is not an error.
pub(crate) fn delete(name: &str) {
    with_state(|state| {
        if !name_ok(state, name) {
            return;
        }
        state.pool.remove(name);
    });
}

/// Drop every variable.
pub(crate) fn clear() {
    with_state(|state| state.pool.clear());
}

/// Merge an assignment coming from a kernel file. `append` corresponds to
/// the `+=` operator; appending to a variable of the other type signals
/// `TYPEMISMATCH`.
pub(crate) fn merge(state: &mut ToolkitState, name: &str, entry: PoolEntry, append: bool) {
    if !name_ok(state, name) {
        return;
    }
    if !append {
        state.pool.insert(name.to_owned(), entry);
        return;
    }
    match (state.pool.get_mut(name), entry) {
        (None, entry) => {
            state.pool.insert(name.to_owned(), entry);
        }
        (Some(PoolEntry::Doubles(existing)), PoolEntry::Doubles(values)) => {
            existing.extend(values);
        }
        (Some(PoolEntry::Strings(existing)), PoolEntry::Strings(values)) => {
            existing.extend(values);
        }
        (Some(_), _) => {
            state.error.signal(
                "TYPEMISMATCH",
                format!("Cannot append mixed types to kernel pool variable '{name}'."),
            );
        }
    }
}
