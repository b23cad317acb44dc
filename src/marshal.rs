//! # Array marshaling
//!
//! The toolkit substrate consumes and produces flat double arrays; the rest
//! of the crate traffics in quantity types. This module is the single
//! crossing point between the two representations. Conversions are total and
//! order-preserving: both sides store canonical-unit doubles, so a round
//! trip reproduces the original value bit for bit.
//!
//! Variable-length toolkit outputs follow the fixed-capacity convention
//! (caller hands over a maximum-capacity buffer, the routine reports how
//! many elements it wrote). The helpers here size the resulting collection
//! to the *reported* count, never the capacity, so uninitialized trailing
//! elements are never exposed.

use nalgebra::{Matrix3, Matrix6};

use crate::quantities::{
    DimensionlessVector, DistanceVector, EphemerisInstant, RotationMatrix, RotationQuaternion,
    StateTransform, StateVector, VelocityVector, Window, WindowSegment,
};

// -------------------------------------------------------------------------------------------------
// Fixed-size aggregates
// -------------------------------------------------------------------------------------------------

pub(crate) fn dimensionless_to_array(v: &DimensionlessVector) -> [f64; 3] {
    [v.x, v.y, v.z]
}

pub(crate) fn dimensionless_from_array(raw: &[f64; 3]) -> DimensionlessVector {
    DimensionlessVector::new(raw[0], raw[1], raw[2])
}

pub(crate) fn distance_vector_to_array(v: &DistanceVector) -> [f64; 3] {
    [v.x.kilometers(), v.y.kilometers(), v.z.kilometers()]
}

pub(crate) fn distance_vector_from_array(raw: &[f64; 3]) -> DistanceVector {
    DistanceVector::from_kilometers(raw[0], raw[1], raw[2])
}

pub(crate) fn velocity_vector_to_array(v: &VelocityVector) -> [f64; 3] {
    [
        v.dx.kilometers_per_second(),
        v.dy.kilometers_per_second(),
        v.dz.kilometers_per_second(),
    ]
}

pub(crate) fn velocity_vector_from_array(raw: &[f64; 3]) -> VelocityVector {
    VelocityVector::from_kilometers_per_second(raw[0], raw[1], raw[2])
}

/// Position in elements 0–2, velocity in 3–5: the toolkit's state layout.
pub(crate) fn state_to_array(s: &StateVector) -> [f64; 6] {
    [
        s.position.x.kilometers(),
        s.position.y.kilometers(),
        s.position.z.kilometers(),
        s.velocity.dx.kilometers_per_second(),
        s.velocity.dy.kilometers_per_second(),
        s.velocity.dz.kilometers_per_second(),
    ]
}

pub(crate) fn state_from_array(raw: &[f64; 6]) -> StateVector {
    StateVector::new(
        DistanceVector::from_kilometers(raw[0], raw[1], raw[2]),
        VelocityVector::from_kilometers_per_second(raw[3], raw[4], raw[5]),
    )
}

pub(crate) fn rotation_to_array(r: &RotationMatrix) -> [[f64; 3]; 3] {
    let mut raw = [[0.0; 3]; 3];
    for (i, row) in raw.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = r.element(i, j);
        }
    }
    raw
}

pub(crate) fn rotation_from_array(raw: &[[f64; 3]; 3]) -> RotationMatrix {
    RotationMatrix::from_matrix(Matrix3::from_fn(|i, j| raw[i][j]))
}

pub(crate) fn state_transform_from_array(raw: &[[f64; 6]; 6]) -> StateTransform {
    StateTransform::from_matrix(Matrix6::from_fn(|i, j| raw[i][j]))
}

pub(crate) fn quaternion_to_array(q: &RotationQuaternion) -> [f64; 4] {
    [q.w, q.x, q.y, q.z]
}

pub(crate) fn quaternion_from_array(raw: &[f64; 4]) -> RotationQuaternion {
    RotationQuaternion::new(raw[0], raw[1], raw[2], raw[3])
}

// -------------------------------------------------------------------------------------------------
// Variable-length outputs
// -------------------------------------------------------------------------------------------------

/// Convert a flat `(start, stop, start, stop, …)` buffer into a typed
/// window, honoring only the first `pairs` pairs the toolkit reported.
pub(crate) fn window_from_pairs(raw: &[f64], pairs: usize) -> Window {
    raw.chunks_exact(2)
        .take(pairs)
        .map(|pair| {
            WindowSegment::new(
                EphemerisInstant::from_tdb_seconds(pair[0]),
                EphemerisInstant::from_tdb_seconds(pair[1]),
            )
        })
        .collect()
}

/// Truncate a capacity-sized buffer to the count the toolkit reported.
pub(crate) fn reported<T>(mut buf: Vec<T>, written: usize) -> Vec<T> {
    buf.truncate(written);
    buf
}

#[cfg(test)]
mod marshal_tests {
    use super::*;
    use crate::quantities::Distance;

    #[test]
    fn distance_vector_round_trip_is_bit_exact() {
        let v = DistanceVector::from_kilometers(1.0, 2.0, 3.0);
        assert_eq!(distance_vector_from_array(&distance_vector_to_array(&v)), v);

        // an awkward value that would expose any rescaling
        let v = DistanceVector::new(
            Distance::from_kilometers(0.1 + 0.2),
            Distance::from_kilometers(-7.3e17),
            Distance::from_kilometers(5e-324),
        );
        assert_eq!(distance_vector_from_array(&distance_vector_to_array(&v)), v);
    }

    #[test]
    fn direction_and_velocity_round_trips_are_bit_exact() {
        let direction = DimensionlessVector::new(0.1, -0.2, 0.9);
        assert_eq!(
            dimensionless_from_array(&dimensionless_to_array(&direction)),
            direction
        );

        let velocity = VelocityVector::from_kilometers_per_second(7.8, -0.05, 1.0e-7);
        assert_eq!(
            velocity_vector_from_array(&velocity_vector_to_array(&velocity)),
            velocity
        );
    }

    #[test]
    fn state_round_trip_is_bit_exact() {
        let s = StateVector::new(
            DistanceVector::from_kilometers(-2.5e7, 1.3e8, 5.6e7),
            VelocityVector::from_kilometers_per_second(-29.78, -5.03, -2.18),
        );
        assert_eq!(state_from_array(&state_to_array(&s)), s);

        let raw = state_to_array(&s);
        assert_eq!(raw[0], -2.5e7);
        assert_eq!(raw[5], -2.18);
    }

    #[test]
    fn rotation_round_trip_preserves_layout() {
        let raw = [
            [0.0, -1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let r = rotation_from_array(&raw);
        assert_eq!(r.element(0, 1), -1.0);
        assert_eq!(r.element(1, 0), 1.0);
        assert_eq!(rotation_to_array(&r), raw);
    }

    #[test]
    fn quaternion_round_trip_is_scalar_first() {
        let q = RotationQuaternion::new(0.5, -0.5, 0.5, -0.5);
        let raw = quaternion_to_array(&q);
        assert_eq!(raw[0], 0.5);
        assert_eq!(quaternion_from_array(&raw), q);
    }

    #[test]
    fn window_honors_reported_count_not_capacity() {
        // capacity for four pairs, toolkit reported two
        let raw = [0.0, 10.0, 20.0, 30.0, 0.0, 0.0, 0.0, 0.0];
        let window = window_from_pairs(&raw, 2);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].start.tdb_seconds(), 0.0);
        assert_eq!(window[1].stop.tdb_seconds(), 30.0);
    }

    #[test]
    fn reported_truncates_trailing_elements() {
        let buf = vec![1.0, 2.0, 3.0, 0.0, 0.0];
        assert_eq!(reported(buf, 3), vec![1.0, 2.0, 3.0]);
    }
}
