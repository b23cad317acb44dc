//! Kernel file wrappers: load, unload, and enumeration of the file table.
//!
//! Paths are passed to the toolkit as given; resolving them against any
//! application-specific asset layout is the embedder's concern. The handle
//! returned by [`load`] is an opaque ticket into the toolkit's file table —
//! the toolkit, not this crate, decides when it stops being valid.

use camino::{Utf8Path, Utf8PathBuf};

use crate::bridge::{bridged, bridged_lookup};
use crate::orrery_errors::{CallResult, Lookup};
use crate::toolkit;

pub use crate::toolkit::kernels::KernelKind;

/// Opaque identifier of one loaded kernel file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelHandle(i32);

impl KernelHandle {
    pub fn value(&self) -> i32 {
        self.0
    }
}

/// One entry of the loaded-file table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelRecord {
    pub path: Utf8PathBuf,
    pub kind: KernelKind,
    pub handle: KernelHandle,
}

/// Load a kernel file and record it in the file table. A missing file fails
/// with `NOSUCHFILE`, a file without a `KPL/` header with `BADKERNELTYPE`,
/// and malformed contents with `BADKERNELFILE`.
pub fn load(path: &Utf8Path) -> CallResult<KernelHandle> {
    bridged(|| {
        let mut handle = 0;
        toolkit::kernels::load(path.as_str(), &mut handle);
        handle
    })
    .map(KernelHandle)
}

/// Unload one kernel file by path, withdrawing its pool variables and
/// ephemeris segments. Unloading a path that is not loaded succeeds and
/// does nothing.
pub fn unload(path: &Utf8Path) -> CallResult<()> {
    bridged(|| toolkit::kernels::unload(path.as_str()))
}

/// Unload every kernel: empties the file table, the ephemeris segment
/// table and the kernel pool. Error state and body definitions survive —
/// use [`crate::api::admin::reset`] for a full restore.
pub fn unload_all() -> CallResult<()> {
    bridged(toolkit::kernels::unload_all)
}

/// Number of loaded kernels, optionally restricted to one kind.
pub fn loaded_count(filter: Option<KernelKind>) -> CallResult<usize> {
    bridged(|| toolkit::kernels::count(filter))
}

/// The `index`-th loaded kernel in load order, or `Missing` past the end —
/// the enumeration idiom: count, then index.
pub fn loaded_record(
    filter: Option<KernelKind>,
    index: usize,
) -> CallResult<Lookup<KernelRecord>> {
    bridged_lookup(|| {
        let mut path = String::new();
        let mut kind = KernelKind::Text;
        let mut handle = 0;
        let found = toolkit::kernels::record(index, filter, &mut path, &mut kind, &mut handle);
        (
            KernelRecord {
                path: Utf8PathBuf::from(path),
                kind,
                handle: KernelHandle(handle),
            },
            found,
        )
    })
}
