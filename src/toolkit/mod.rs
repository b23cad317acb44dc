//! # Toolkit substrate
//!
//! The computational core this crate binds. Its call surface deliberately
//! keeps the conventions of a C-style numerical library:
//!
//! - bare `f64` scalars and fixed-size arrays in and out, out-parameters for
//!   results, `bool` found-flags for lookups;
//! - no `Result` anywhere — failures are recorded in a single process-global
//!   error cell ([`errors`]) and nothing else;
//! - one process-global state table (kernel pool, loaded-file table,
//!   ephemeris segments, body registry) with **no cross-call
//!   synchronization**: each entry point locks the table for its own
//!   duration only, and any multi-call protocol (such as the error bridge's
//!   clear/invoke/inspect sequence) is sound only under the embedder's
//!   single-writer discipline.
//!
//! Everything above this module observes the binding contract: the
//! [`bridge`](crate::bridge) is the only reader and writer of the error
//! cell, and the [`api`](crate::api) wrappers are the only callers of the
//! remaining entry points.

pub(crate) mod bodies;
pub(crate) mod coords;
pub(crate) mod ephemeris;
pub(crate) mod errors;
pub(crate) mod frames;
pub(crate) mod kernels;
pub(crate) mod pool;
pub(crate) mod time;
pub(crate) mod units;

use std::sync::{Mutex, PoisonError};

use ahash::AHashMap;
use once_cell::sync::Lazy;

use self::bodies::BodyRegistry;
use self::ephemeris::Segment;
use self::errors::{ErrorAction, ErrorCell};
use self::kernels::LoadedKernel;
use self::pool::PoolEntry;

/// The toolkit's entire mutable state. One instance per process.
pub(crate) struct ToolkitState {
    pub(crate) error: ErrorCell,
    pub(crate) pool: AHashMap<String, PoolEntry>,
    pub(crate) files: Vec<LoadedKernel>,
    pub(crate) segments: Vec<Segment>,
    pub(crate) bodies: BodyRegistry,
    pub(crate) next_handle: i32,
}

impl ToolkitState {
    fn baseline() -> Self {
        ToolkitState {
            error: ErrorCell::default(),
            pool: AHashMap::new(),
            files: Vec::new(),
            segments: Vec::new(),
            bodies: BodyRegistry::builtin(),
            next_handle: 1,
        }
    }
}

static STATE: Lazy<Mutex<ToolkitState>> = Lazy::new(|| Mutex::new(ToolkitState::baseline()));

/// Run `f` with exclusive access to the global state table.
///
/// Holds the lock only for the duration of `f`: this keeps each entry point
/// internally consistent but provides no atomicity across entry points.
/// Poisoning is deliberately ignored — an abort-mode panic must not wedge
/// the error subsystem for the process.
pub(crate) fn with_state<T>(f: impl FnOnce(&mut ToolkitState) -> T) -> T {
    let mut guard = STATE.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Restore the pristine state: no loaded files, empty pool, builtin body
/// registry, clear error cell — and the `Report` error action, which is the
/// operational default once a process has gone through bridge
/// initialization.
pub(crate) fn reset_all() {
    with_state(|state| {
        *state = ToolkitState::baseline();
        state.error.set_action(ErrorAction::Report);
    });
}
