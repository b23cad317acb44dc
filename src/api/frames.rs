//! Rotation construction and reference-frame transform wrappers.

use crate::bridge::bridged;
use crate::marshal;
use crate::orrery_errors::CallResult;
use crate::quantities::{
    Angle, DimensionlessVector, EphemerisInstant, RotationMatrix, RotationQuaternion,
    StateTransform,
};
use crate::toolkit;

/// Coordinate rotation by `angle` about principal axis `1`, `2` or `3`.
/// An axis outside that range fails with `BADAXISNUMBER`.
pub fn rotation_about_axis(angle: Angle, axis: i32) -> CallResult<RotationMatrix> {
    bridged(|| {
        let mut raw = [[0.0; 3]; 3];
        toolkit::frames::axis_rotation(angle.radians(), axis, &mut raw);
        raw
    })
    .map(|raw| marshal::rotation_from_array(&raw))
}

/// Active rotation by `angle` about an arbitrary axis vector. A zero axis
/// fails with `ZEROVECTOR`.
pub fn axis_angle_rotation(
    axis: &DimensionlessVector,
    angle: Angle,
) -> CallResult<RotationMatrix> {
    let raw_axis = marshal::dimensionless_to_array(axis);
    bridged(|| {
        let mut raw = [[0.0; 3]; 3];
        toolkit::frames::axis_angle_rotation(&raw_axis, angle.radians(), &mut raw);
        raw
    })
    .map(|raw| marshal::rotation_from_array(&raw))
}

/// Compose three coordinate rotations: the result applies `angles.0` about
/// `axes.0` last, matching the toolkit's Euler convention.
pub fn euler_rotation(
    angles: (Angle, Angle, Angle),
    axes: (i32, i32, i32),
) -> CallResult<RotationMatrix> {
    bridged(|| {
        let mut raw = [[0.0; 3]; 3];
        toolkit::frames::euler_rotation(
            [angles.0.radians(), angles.1.radians(), angles.2.radians()],
            [axes.0, axes.1, axes.2],
            &mut raw,
        );
        raw
    })
    .map(|raw| marshal::rotation_from_array(&raw))
}

/// Position rotation taking `from`-frame coordinates into `to`-frame
/// coordinates at `instant`. Unknown frame names fail with `UNKNOWNFRAME`.
pub fn position_transform(
    from: &str,
    to: &str,
    instant: EphemerisInstant,
) -> CallResult<RotationMatrix> {
    bridged(|| {
        let mut raw = [[0.0; 3]; 3];
        toolkit::frames::frame_rotation(from, to, instant.tdb_seconds(), &mut raw);
        raw
    })
    .map(|raw| marshal::rotation_from_array(&raw))
}

/// Full 6×6 state transform between two frames at `instant`.
pub fn state_transform(
    from: &str,
    to: &str,
    instant: EphemerisInstant,
) -> CallResult<StateTransform> {
    bridged(|| {
        let mut raw = [[0.0; 6]; 6];
        toolkit::frames::frame_state_rotation(from, to, instant.tdb_seconds(), &mut raw);
        raw
    })
    .map(|raw| marshal::state_transform_from_array(&raw))
}

/// Rotation matrix of a scalar-first quaternion. The zero quaternion fails
/// with `ZEROQUATERNION`.
pub fn quaternion_to_matrix(quaternion: &RotationQuaternion) -> CallResult<RotationMatrix> {
    let raw_quaternion = marshal::quaternion_to_array(quaternion);
    bridged(|| {
        let mut raw = [[0.0; 3]; 3];
        toolkit::frames::quaternion_to_matrix(&raw_quaternion, &mut raw);
        raw
    })
    .map(|raw| marshal::rotation_from_array(&raw))
}

/// Quaternion (scalar-first, non-negative scalar part) of a rotation
/// matrix. A matrix that is not a rotation fails with `NOTAROTATION`.
pub fn matrix_to_quaternion(matrix: &RotationMatrix) -> CallResult<RotationQuaternion> {
    let raw_matrix = marshal::rotation_to_array(matrix);
    bridged(|| {
        let mut raw = [0.0; 4];
        toolkit::frames::matrix_to_quaternion(&raw_matrix, &mut raw);
        raw
    })
    .map(|raw| marshal::quaternion_from_array(&raw))
}
