//! Coverage windows: ordered lists of disjoint time intervals.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{EphemerisInstant, EphemerisPeriod};

/// One half-open interval `[start, stop)` of the TDB timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSegment {
    pub start: EphemerisInstant,
    pub stop: EphemerisInstant,
}

impl WindowSegment {
    pub fn new(start: EphemerisInstant, stop: EphemerisInstant) -> Self {
        WindowSegment { start, stop }
    }

    pub fn duration(&self) -> EphemerisPeriod {
        self.stop - self.start
    }

    pub fn contains(&self, instant: EphemerisInstant) -> bool {
        self.start <= instant && instant < self.stop
    }
}

/// An ordered sequence of non-overlapping segments, ascending by start time.
///
/// The ordering and disjointness invariants are established by the toolkit's
/// coverage and search routines; the binding forwards them without
/// re-validation. Most windows are short, hence the inline capacity.
pub type Window = SmallVec<[WindowSegment; 4]>;
