//! The global error cell.
//!
//! The toolkit reports every failure here: a short symbolic token, a long
//! diagnostic, and a `failed` flag that stays set until explicitly reset.
//! Once set, subsequent signals are ignored — the first error of a call
//! sequence is the one preserved. The configured [`ErrorAction`] decides
//! what signalling does: `Abort` (the library's native default) panics the
//! process; `Report` records the error and returns, which is the mode the
//! bridge forces before any bridged call.
//!
//! The free functions are the toolkit's own signalling and inspection
//! surface. Above the toolkit, only the [`bridge`](crate::bridge) and the
//! administrative entry points touch them; wrappers never do.

use serde::{Deserialize, Serialize};

use super::with_state;

/// What the toolkit does when an error is signalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorAction {
    /// Terminate the process on the spot. Native default.
    Abort,
    /// Record the error in the global cell and continue.
    Report,
}

#[derive(Debug)]
pub(crate) struct ErrorCell {
    failed: bool,
    short: String,
    long: String,
    action: ErrorAction,
}

impl Default for ErrorCell {
    fn default() -> Self {
        ErrorCell {
            failed: false,
            short: String::new(),
            long: String::new(),
            action: ErrorAction::Abort,
        }
    }
}

impl ErrorCell {
    /// Record a failure. In `Report` mode the first signal wins and later
    /// ones are dropped until [`ErrorCell::reset`].
    pub(crate) fn signal(&mut self, short: &str, long: impl Into<String>) {
        let long = long.into();
        if self.action == ErrorAction::Abort {
            panic!("{short}: {long}");
        }
        if self.failed {
            return;
        }
        self.failed = true;
        self.short = short.to_owned();
        self.long = long;
    }

    pub(crate) fn failed(&self) -> bool {
        self.failed
    }

    pub(crate) fn short_message(&self) -> String {
        self.short.clone()
    }

    pub(crate) fn long_message(&self) -> String {
        self.long.clone()
    }

    pub(crate) fn reset(&mut self) {
        self.failed = false;
        self.short.clear();
        self.long.clear();
    }

    pub(crate) fn action(&self) -> ErrorAction {
        self.action
    }

    pub(crate) fn set_action(&mut self, action: ErrorAction) {
        self.action = action;
    }
}

// -------------------------------------------------------------------------------------------------
// Entry points (bridge and administration only)
// -------------------------------------------------------------------------------------------------

pub(crate) fn failed() -> bool {
    with_state(|state| state.error.failed())
}

pub(crate) fn short_message() -> String {
    with_state(|state| state.error.short_message())
}

pub(crate) fn long_message() -> String {
    with_state(|state| state.error.long_message())
}

pub(crate) fn reset() {
    with_state(|state| state.error.reset());
}

pub(crate) fn signal(short: &str, long: impl Into<String>) {
    let long = long.into();
    with_state(|state| state.error.signal(short, long));
}

pub(crate) fn action() -> ErrorAction {
    with_state(|state| state.error.action())
}

pub(crate) fn set_action(action: ErrorAction) {
    with_state(|state| state.error.set_action(action));
}
