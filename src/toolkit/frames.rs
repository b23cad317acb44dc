//! Rotation construction and inertial frame transforms.
//!
//! Two rotation conventions coexist here, matching the underlying library's
//! documented behavior: [`axis_rotation`] (and everything built on it)
//! produces *coordinate* rotations — the matrix that re-expresses a fixed
//! vector in a frame rotated by the given angle — while
//! [`axis_angle_rotation`] and the quaternion conversions produce *active*
//! rotations that move vectors. The two differ by a transpose.

use nalgebra::{Matrix3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3};

use crate::constants::{
    B1950_JD, J2000_JD, OBLIQUITY_J2000_ARCSEC, RADIANS_PER_ARCSECOND, Radian,
};

use super::errors::signal;

fn write(out: &mut [[f64; 3]; 3], m: &Matrix3<f64>) {
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = m[(i, j)];
        }
    }
}

fn read(raw: &[[f64; 3]; 3]) -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| raw[i][j])
}

fn active(angle: Radian, axis: usize) -> Matrix3<f64> {
    let axis = match axis {
        1 => Vector3::x_axis(),
        2 => Vector3::y_axis(),
        _ => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&axis, angle).into_inner()
}

/// Coordinate rotation about a principal axis: the inverse of the active
/// rotation by the same angle.
fn coordinate(angle: Radian, axis: usize) -> Matrix3<f64> {
    active(-angle, axis)
}

// -------------------------------------------------------------------------------------------------
// Entry points
// -------------------------------------------------------------------------------------------------

/// Coordinate rotation by `angle` about axis `1`, `2` or `3` (x, y, z). An
/// axis outside that range signals `BADAXISNUMBER` and leaves `out`
/// untouched.
pub(crate) fn axis_rotation(angle: Radian, axis: i32, out: &mut [[f64; 3]; 3]) {
    if !(1..=3).contains(&axis) {
        signal(
            "BADAXISNUMBER",
            format!("Axis index {axis} is not in the range 1 to 3."),
        );
        return;
    }
    write(out, &coordinate(angle, axis as usize));
}

/// Active rotation by `angle` about the (not necessarily unit) vector
/// `axis`. A zero axis signals `ZEROVECTOR`.
pub(crate) fn axis_angle_rotation(axis: &[f64; 3], angle: Radian, out: &mut [[f64; 3]; 3]) {
    let v = Vector3::new(axis[0], axis[1], axis[2]);
    if v.norm() == 0.0 {
        signal(
            "ZEROVECTOR",
            "The rotation axis must not be the zero vector.",
        );
        return;
    }
    let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(v), angle);
    write(out, rotation.matrix());
}

/// Compose three coordinate rotations, `out = [a3]ax3 · [a2]ax2 · [a1]ax1`.
pub(crate) fn euler_rotation(
    angles: [Radian; 3],
    axes: [i32; 3],
    out: &mut [[f64; 3]; 3],
) {
    for axis in axes {
        if !(1..=3).contains(&axis) {
            signal(
                "BADAXISNUMBER",
                format!("Axis index {axis} is not in the range 1 to 3."),
            );
            return;
        }
    }
    let m = coordinate(angles[0], axes[0] as usize)
        * coordinate(angles[1], axes[1] as usize)
        * coordinate(angles[2], axes[2] as usize);
    write(out, &m);
}

/// Active rotation matrix of a scalar-first quaternion. The quaternion is
/// normalized on the way in; a zero quaternion signals `ZEROQUATERNION`.
pub(crate) fn quaternion_to_matrix(q: &[f64; 4], out: &mut [[f64; 3]; 3]) {
    let quaternion = Quaternion::new(q[0], q[1], q[2], q[3]);
    if quaternion.norm() == 0.0 {
        signal(
            "ZEROQUATERNION",
            "The zero quaternion does not describe a rotation.",
        );
        return;
    }
    let unit = UnitQuaternion::from_quaternion(quaternion);
    write(out, unit.to_rotation_matrix().matrix());
}

/// Scalar-first quaternion of a rotation matrix, with a non-negative scalar
/// part. A matrix that is not orthonormal with determinant +1 signals
/// `NOTAROTATION`.
pub(crate) fn matrix_to_quaternion(m: &[[f64; 3]; 3], q: &mut [f64; 4]) {
    let matrix = read(m);
    let defect = (matrix * matrix.transpose() - Matrix3::identity()).abs().max();
    if defect > 1.0e-7 || matrix.determinant() < 0.5 {
        signal(
            "NOTAROTATION",
            "The input matrix is not orthonormal with determinant +1.",
        );
        return;
    }
    let unit = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(matrix));
    let (w, v) = (unit.scalar(), unit.vector());
    let sign = if w < 0.0 { -1.0 } else { 1.0 };
    *q = [sign * w, sign * v[0], sign * v[1], sign * v[2]];
}

// -------------------------------------------------------------------------------------------------
// Inertial frames
// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    J2000,
    EclipJ2000,
    B1950,
}

fn frame_named(name: &str) -> Option<Frame> {
    match name.trim().to_uppercase().as_str() {
        "J2000" => Some(Frame::J2000),
        "ECLIPJ2000" => Some(Frame::EclipJ2000),
        "B1950" => Some(Frame::B1950),
        _ => None,
    }
}

/// Coordinate transform taking J2000 coordinates into `frame`.
fn from_j2000(frame: Frame) -> Matrix3<f64> {
    match frame {
        Frame::J2000 => Matrix3::identity(),
        Frame::EclipJ2000 => {
            coordinate(OBLIQUITY_J2000_ARCSEC * RADIANS_PER_ARCSECOND, 1)
        }
        Frame::B1950 => precession_to_b1950(),
    }
}

/// IAU 1976 precession from J2000 to the B1950 mean equator and equinox,
/// evaluated at a fixed (negative) number of Julian centuries.
fn precession_to_b1950() -> Matrix3<f64> {
    let t = (B1950_JD - J2000_JD) / 36_525.0;
    let zeta = (2306.2181 + (0.30188 + 0.017998 * t) * t) * t * RADIANS_PER_ARCSECOND;
    let theta = (2004.3109 + (-0.42665 - 0.041833 * t) * t) * t * RADIANS_PER_ARCSECOND;
    let z = (2306.2181 + (1.09468 + 0.018203 * t) * t) * t * RADIANS_PER_ARCSECOND;
    active(-z, 3) * active(theta, 2) * active(-zeta, 3)
}

/// Coordinate rotation taking `from`-frame coordinates into `to`-frame
/// coordinates at epoch `et` (unused for the built-in inertial set, kept for
/// interface parity with time-dependent frames). Unknown names signal
/// `UNKNOWNFRAME`.
pub(crate) fn frame_rotation(from: &str, to: &str, _et: f64, out: &mut [[f64; 3]; 3]) {
    let Some(from_frame) = frame_named(from) else {
        signal(
            "UNKNOWNFRAME",
            format!("'{from}' is not a recognized reference frame."),
        );
        return;
    };
    let Some(to_frame) = frame_named(to) else {
        signal(
            "UNKNOWNFRAME",
            format!("'{to}' is not a recognized reference frame."),
        );
        return;
    };
    let m = from_j2000(to_frame) * from_j2000(from_frame).transpose();
    write(out, &m);
}

/// 6×6 state transform between two inertial frames: both diagonal blocks are
/// the position rotation, the derivative block is zero.
pub(crate) fn frame_state_rotation(from: &str, to: &str, et: f64, out: &mut [[f64; 6]; 6]) {
    let mut rotation = [[0.0; 3]; 3];
    frame_rotation(from, to, et, &mut rotation);
    if super::errors::failed() {
        return;
    }
    *out = [[0.0; 6]; 6];
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = rotation[i][j];
            out[i + 3][j + 3] = rotation[i][j];
        }
    }
}
