//! Shared helpers for the integration tests.
//!
//! The toolkit state is process-global and unsynchronized across calls, so
//! the tests — the embedding application here — own the single-writer
//! discipline: every test takes [`serial`] before touching the toolkit.

use std::sync::{Mutex, MutexGuard, PoisonError};

use camino::Utf8PathBuf;

static TOOLKIT_SERIAL: Mutex<()> = Mutex::new(());

pub fn serial() -> MutexGuard<'static, ()> {
    TOOLKIT_SERIAL
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Path of a fixture kernel under `tests/data/`.
pub fn data_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("tests/data/{name}"))
}
