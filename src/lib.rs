//! # Orrery: a typed binding core for an astrodynamics toolkit
//!
//! `orrery` exposes a numerical astrodynamics toolkit — time conversion,
//! reference-frame transforms, ephemeris lookup, geometry, and kernel-file
//! I/O — behind a strongly typed Rust surface. Two mechanisms make that
//! surface safe:
//!
//! 1. **Quantity types** ([`quantities`]): every number crossing the
//!    boundary carries its physical dimension. A [`Distance`](quantities::Distance)
//!    cannot be passed where an [`Angle`](quantities::Angle) is expected, and
//!    unit conversions are explicit constructor/accessor calls, never silent
//!    coercions.
//! 2. **The error-state bridge** ([`bridge`]): the toolkit reports failures
//!    through a single process-global status record rather than per-call
//!    return codes. The bridge wraps every call in a strict
//!    clear/invoke/inspect/clear protocol so callers see independent
//!    [`CallResult`](orrery_errors::CallResult)s and the global record never
//!    leaks between calls.
//!
//! The callable surface lives in [`api`], one thin wrapper per toolkit entry
//! point, grouped by service (time, frames, geometry, ephemeris, kernel pool,
//! bodies, kernel files, administration).
//!
//! ## Concurrency
//!
//! The toolkit state (loaded kernels, pool variables, error record) is
//! process-wide and mutable. Individual calls are internally consistent, but
//! the per-call bridge protocol spans several state accesses: callers must
//! serialize all toolkit activity — confine it to one thread or guard it with
//! an application-owned lock. Administrative operations
//! ([`api::admin`], [`api::kernels`]) must never run concurrently with
//! queries.

pub mod api;
pub mod bridge;
pub mod constants;
pub mod orrery_errors;
pub mod quantities;

pub(crate) mod marshal;
pub(crate) mod toolkit;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Unit tests exercising the process-global toolkit state take this lock,
    /// which is the same single-writer discipline the crate asks of embedders.
    static TOOLKIT_SERIAL: Mutex<()> = Mutex::new(());

    pub(crate) fn serial() -> MutexGuard<'static, ()> {
        TOOLKIT_SERIAL
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
