//! Ephemeris segments: discrete barycentric states with piecewise-linear
//! interpolation, and the state/coverage entry points built on them.
//!
//! Every segment stores states of one body relative to the solar-system
//! barycentre in the J2000 frame. The barycentre itself (code 0) is always
//! available as the zero state. Later-loaded segments shadow earlier ones
//! where they overlap.

use itertools::Itertools;

use crate::constants::SPEED_OF_LIGHT_KM_S;

use super::{errors, frames, with_state, ToolkitState};

#[derive(Debug, Clone)]
pub(crate) struct Segment {
    pub(crate) body: i32,
    /// Strictly ascending node epochs, TDB seconds past J2000.
    pub(crate) epochs: Vec<f64>,
    /// One `[x, y, z, dx, dy, dz]` row per node (km, km/s).
    pub(crate) states: Vec<[f64; 6]>,
    /// Owning kernel handle, for unload bookkeeping.
    pub(crate) handle: i32,
}

impl Segment {
    fn covers(&self, et: f64) -> bool {
        self.epochs[0] <= et && et <= self.epochs[self.epochs.len() - 1]
    }

    fn state_at(&self, et: f64) -> [f64; 6] {
        let index = self.epochs.partition_point(|&epoch| epoch <= et);
        if index == 0 {
            return self.states[0];
        }
        let i = index - 1;
        if i + 1 == self.epochs.len() {
            return self.states[i];
        }
        let fraction = (et - self.epochs[i]) / (self.epochs[i + 1] - self.epochs[i]);
        let mut interpolated = [0.0; 6];
        for (k, value) in interpolated.iter_mut().enumerate() {
            *value = self.states[i][k] + fraction * (self.states[i + 1][k] - self.states[i][k]);
        }
        interpolated
    }
}

/// Barycentric J2000 state of `body` at `et`, or `None` when no loaded
/// segment covers the request.
fn barycentric_state(state: &ToolkitState, body: i32, et: f64) -> Option<[f64; 6]> {
    if body == 0 {
        return Some([0.0; 6]);
    }
    state
        .segments
        .iter()
        .rev()
        .find(|segment| segment.body == body && segment.covers(et))
        .map(|segment| segment.state_at(et))
}

// -------------------------------------------------------------------------------------------------
// Entry points
// -------------------------------------------------------------------------------------------------

/// Write the merged coverage of `body` into `out` as flattened
/// `(start, stop)` pairs, capped by the buffer's capacity. Returns the
/// number of pairs written.
pub(crate) fn coverage(body: i32, out: &mut [f64]) -> usize {
    with_state(|state| {
        let mut spans: Vec<(f64, f64)> = state
            .segments
            .iter()
            .filter(|segment| segment.body == body)
            .map(|segment| (segment.epochs[0], segment.epochs[segment.epochs.len() - 1]))
            .collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let merged = spans
            .into_iter()
            .coalesce(|a, b| {
                if b.0 <= a.1 {
                    Ok((a.0, a.1.max(b.1)))
                } else {
                    Err((a, b))
                }
            })
            .collect::<Vec<_>>();

        let capacity = out.len() / 2;
        let written = merged.len().min(capacity);
        for (pair, span) in out.chunks_exact_mut(2).zip(merged.iter().take(written)) {
            pair[0] = span.0;
            pair[1] = span.1;
        }
        written
    })
}

/// State of `target` relative to `observer` at `et`, expressed in `frame`,
/// with the one-way light time. `correction` is `NONE` (geometric) or `LT`
/// (target retarded by the converged light time). Bodies without covering
/// segments signal `SPKINSUFFDATA`; an unsupported correction signals
/// `INVALIDOPTION`.
pub(crate) fn lookup_state(
    target: i32,
    et: f64,
    frame: &str,
    correction: &str,
    observer: i32,
    state_out: &mut [f64; 6],
    light_time: &mut f64,
) {
    let light_corrected = match correction.trim().to_uppercase().as_str() {
        "NONE" => false,
        "LT" => true,
        other => {
            errors::signal(
                "INVALIDOPTION",
                format!("Aberration correction '{other}' is not supported (NONE or LT)."),
            );
            return;
        }
    };

    let looked_up = with_state(|state| -> Result<([f64; 6], f64), String> {
        let observer_state = barycentric_state(state, observer, et)
            .ok_or_else(|| format!("No loaded ephemeris data for body {observer} at {et} TDB."))?;

        let mut epoch = et;
        let mut relative = [0.0; 6];
        let mut lt = 0.0;
        let passes = if light_corrected { 3 } else { 1 };
        for _ in 0..passes {
            let target_state = barycentric_state(state, target, epoch).ok_or_else(|| {
                format!("No loaded ephemeris data for body {target} at {epoch} TDB.")
            })?;
            for k in 0..6 {
                relative[k] = target_state[k] - observer_state[k];
            }
            let range =
                (relative[0] * relative[0] + relative[1] * relative[1] + relative[2] * relative[2])
                    .sqrt();
            lt = range / SPEED_OF_LIGHT_KM_S;
            epoch = et - lt;
        }
        Ok((relative, lt))
    });

    let (mut relative, lt) = match looked_up {
        Ok(result) => result,
        Err(diagnostic) => {
            errors::signal("SPKINSUFFDATA", diagnostic);
            return;
        }
    };

    let frame = frame.trim().to_uppercase();
    if frame != "J2000" {
        let mut rotation = [[0.0; 3]; 3];
        frames::frame_rotation("J2000", &frame, et, &mut rotation);
        if errors::failed() {
            return;
        }
        let rotate = |v: [f64; 3]| -> [f64; 3] {
            let mut out = [0.0; 3];
            for (i, row) in rotation.iter().enumerate() {
                out[i] = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
            }
            out
        };
        let position = rotate([relative[0], relative[1], relative[2]]);
        let velocity = rotate([relative[3], relative[4], relative[5]]);
        relative = [
            position[0],
            position[1],
            position[2],
            velocity[0],
            velocity[1],
            velocity[2],
        ];
    }

    *state_out = relative;
    *light_time = lt;
}
