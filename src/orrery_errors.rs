//! # Call outcomes
//!
//! The toolkit underneath this crate does not return error codes: failures
//! are recorded in a process-global status cell. The
//! [`bridge`](crate::bridge) converts that cell into the per-call values
//! defined here, and nothing above the bridge ever inspects the global state
//! directly.
//!
//! Three outcomes exist, and callers are expected to branch on all of them:
//!
//! - `Ok(value)` — the call succeeded and every declared output is valid.
//! - `Ok(Lookup::Missing)` — the call succeeded but the requested item does
//!   not exist (an undefined pool variable, an unknown body name). Expected
//!   absence is not an error and carries no token.
//! - `Err(CallError)` — the toolkit signalled a failure. Outputs must not be
//!   used, even if partially written before the signal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure record of one bridged toolkit call.
///
/// `token` is the toolkit's short symbolic error name (e.g.
/// `BADAXISNUMBER`), preserved verbatim as an opaque stable key; `message`
/// is the long diagnostic text. Both are captured at the moment the bridge
/// observes the failure, immediately before it clears the global record.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{token}: {message}")]
pub struct CallError {
    pub token: String,
    pub message: String,
}

/// Outcome of one bridged toolkit call.
pub type CallResult<T> = Result<T, CallError>;

/// Success payload of a lookup-style call that may legitimately find
/// nothing.
///
/// The toolkit distinguishes "not found" from "error" (a missing kernel-pool
/// variable is routine; a malformed variable name is not), and so does this
/// type: `Missing` travels in the `Ok` branch of a [`CallResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lookup<T> {
    Found(T),
    Missing,
}

impl<T> Lookup<T> {
    /// `Some(value)` when found, `None` when missing.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }

    /// Apply `f` to the found value, leaving `Missing` untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::Missing => Lookup::Missing,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => Lookup::Found(value),
            None => Lookup::Missing,
        }
    }
}

#[cfg(test)]
mod outcome_tests {
    use super::*;

    #[test]
    fn call_error_displays_token_and_message() {
        let err = CallError {
            token: "BADAXISNUMBER".into(),
            message: "Axis index 7 is not in the range 1 to 3.".into(),
        };
        assert_eq!(
            err.to_string(),
            "BADAXISNUMBER: Axis index 7 is not in the range 1 to 3."
        );
    }

    #[test]
    fn lookup_adapters() {
        let found: Lookup<i32> = Lookup::Found(3);
        assert!(found.is_found());
        assert_eq!(found.map(|v| v * 2).found(), Some(6));

        let missing: Lookup<i32> = Lookup::Missing;
        assert!(missing.is_missing());
        assert_eq!(missing.map(|v| v * 2).found(), None);

        assert_eq!(Lookup::from(Some(1)), Lookup::Found(1));
        assert_eq!(Lookup::<i32>::from(None), Lookup::Missing);
    }
}
