//! # The error-state bridge
//!
//! The toolkit records failures in one process-global error cell instead of
//! returning per-call codes. Left unmanaged, that cell loses errors and
//! bleeds stale ones into unrelated calls. This module implements the one
//! protocol that prevents both, wrapped around every toolkit invocation:
//!
//! 1. If the global flag is already set on entry, clear it unconditionally —
//!    stale state is not attributable to this call.
//! 2. Invoke the toolkit function(s).
//! 3. Inspect the flag. Set: capture the short token and long diagnostic,
//!    clear the flag, and return the pair as a [`CallError`]. Clear: return
//!    the outputs as `Ok`.
//!
//! On every return path — success or failure — the global flag is clear.
//! Nothing above this module reads or writes the error cell, and the
//! toolkit's error action is forced to `Report` exactly once per process, at
//! the first bridged call, so that per-call recovery is actually reachable
//! (the toolkit's native default aborts the process instead).
//!
//! Each wrapper passes one closure to [`bridged`]; a closure may chain
//! several toolkit operations, in which case the first signalled error is
//! the one reported (the cell freezes on first signal) and the whole
//! composite reports as one call.

use std::sync::Once;

use crate::orrery_errors::{CallError, CallResult, Lookup};
use crate::toolkit::errors::{self, ErrorAction};

static FORCE_REPORT: Once = Once::new();

/// Force the toolkit's error action to `Report` once per process, making
/// signalled errors recordable rather than fatal.
pub(crate) fn ensure_report_mode() {
    FORCE_REPORT.call_once(|| errors::set_action(ErrorAction::Report));
}

/// Run one toolkit invocation under the bridge protocol.
pub(crate) fn bridged<T>(invoke: impl FnOnce() -> T) -> CallResult<T> {
    ensure_report_mode();

    if errors::failed() {
        errors::reset();
    }

    let outputs = invoke();

    if errors::failed() {
        let token = errors::short_message();
        let message = errors::long_message();
        errors::reset();
        return Err(CallError { token, message });
    }
    Ok(outputs)
}

/// Bridge a `(value, found)`-shaped toolkit lookup into the three-way
/// outcome: failure, success-found, success-missing.
pub(crate) fn bridged_lookup<T>(invoke: impl FnOnce() -> (T, bool)) -> CallResult<Lookup<T>> {
    bridged(invoke).map(|(value, found)| {
        if found {
            Lookup::Found(value)
        } else {
            Lookup::Missing
        }
    })
}
