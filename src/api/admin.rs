//! Administrative wrappers: global reset, error-action configuration, and
//! deliberate error injection.
//!
//! None of these may run concurrently with in-flight query calls — they
//! mutate the same process-global state every query reads. Serializing them
//! is the embedding application's responsibility.

use crate::bridge::bridged;
use crate::orrery_errors::CallResult;
use crate::toolkit;

pub use crate::toolkit::errors::ErrorAction;

/// Restore the toolkit to its initial operational state: no loaded kernels,
/// empty pool, builtin body registry, clear error record, `Report` error
/// action. Idempotent — a second reset observes exactly the state the first
/// one left.
pub fn reset() -> CallResult<()> {
    bridged(toolkit::reset_all)
}

/// The currently configured error action.
pub fn error_action() -> CallResult<ErrorAction> {
    bridged(toolkit::errors::action)
}

/// Reconfigure the error action. Setting [`ErrorAction::Abort`] makes the
/// next signalled error terminate the process, bypassing per-call recovery;
/// it exists for embedders that prefer fail-fast during development.
pub fn set_error_action(action: ErrorAction) -> CallResult<()> {
    bridged(|| toolkit::errors::set_action(action))
}

/// Signal an error on purpose and report it through the regular bridge
/// path. Always returns the failure branch; useful for exercising an
/// embedder's error handling end to end.
pub fn raise_error(token: &str, message: &str) -> CallResult<()> {
    bridged(|| toolkit::errors::signal(token, message))
}
