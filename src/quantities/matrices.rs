//! Rotation matrices, state transforms and quaternions.
//!
//! All three are dimensionless operators: applying one to a dimensional
//! vector preserves that vector's dimension, which is why their entries are
//! bare doubles while their operands are quantity types.

use std::ops::Mul;

use nalgebra::{Matrix3, Matrix6, Vector3, Vector6};
use serde::{Deserialize, Serialize};

use super::{DimensionlessVector, DistanceVector, StateVector, VelocityVector};

// The nalgebra-backed matrix types stay out of serde: their wire form is the
// raw row-major array produced by the marshaling layer.

// -------------------------------------------------------------------------------------------------
// RotationMatrix
// -------------------------------------------------------------------------------------------------

/// A 3×3 rotation, applied as `v_out = R · v_in`.
///
/// Construction from raw angles, axes, quaternions or frame names goes
/// through [`crate::api::frames`]; this type only composes and applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix {
    m: Matrix3<f64>,
}

impl RotationMatrix {
    pub fn identity() -> Self {
        RotationMatrix {
            m: Matrix3::identity(),
        }
    }

    /// Row-major component access.
    pub fn element(&self, row: usize, col: usize) -> f64 {
        self.m[(row, col)]
    }

    pub fn transpose(&self) -> RotationMatrix {
        RotationMatrix {
            m: self.m.transpose(),
        }
    }

    pub(crate) fn from_matrix(m: Matrix3<f64>) -> Self {
        RotationMatrix { m }
    }

    pub(crate) fn matrix(&self) -> &Matrix3<f64> {
        &self.m
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        RotationMatrix::identity()
    }
}

impl Mul for RotationMatrix {
    type Output = RotationMatrix;
    fn mul(self, rhs: RotationMatrix) -> RotationMatrix {
        RotationMatrix { m: self.m * rhs.m }
    }
}

impl Mul<DimensionlessVector> for RotationMatrix {
    type Output = DimensionlessVector;
    fn mul(self, rhs: DimensionlessVector) -> DimensionlessVector {
        (self.m * Vector3::from(rhs)).into()
    }
}

impl Mul<DistanceVector> for RotationMatrix {
    type Output = DistanceVector;
    fn mul(self, rhs: DistanceVector) -> DistanceVector {
        let v = self.m
            * Vector3::new(
                rhs.x.kilometers(),
                rhs.y.kilometers(),
                rhs.z.kilometers(),
            );
        DistanceVector::from_kilometers(v.x, v.y, v.z)
    }
}

impl Mul<VelocityVector> for RotationMatrix {
    type Output = VelocityVector;
    fn mul(self, rhs: VelocityVector) -> VelocityVector {
        let v = self.m
            * Vector3::new(
                rhs.dx.kilometers_per_second(),
                rhs.dy.kilometers_per_second(),
                rhs.dz.kilometers_per_second(),
            );
        VelocityVector::from_kilometers_per_second(v.x, v.y, v.z)
    }
}

// -------------------------------------------------------------------------------------------------
// StateTransform
// -------------------------------------------------------------------------------------------------

/// A 6×6 state transformation, applied as `s_out = M · s_in`. For inertial
/// frame pairs the off-diagonal derivative block is zero and both diagonal
/// blocks equal the 3×3 rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTransform {
    m: Matrix6<f64>,
}

impl StateTransform {
    pub fn identity() -> Self {
        StateTransform {
            m: Matrix6::identity(),
        }
    }

    pub fn element(&self, row: usize, col: usize) -> f64 {
        self.m[(row, col)]
    }

    /// The upper-left rotation block.
    pub fn rotation(&self) -> RotationMatrix {
        RotationMatrix::from_matrix(self.m.fixed_view::<3, 3>(0, 0).into_owned())
    }

    pub(crate) fn from_matrix(m: Matrix6<f64>) -> Self {
        StateTransform { m }
    }

    pub(crate) fn matrix(&self) -> &Matrix6<f64> {
        &self.m
    }
}

impl Default for StateTransform {
    fn default() -> Self {
        StateTransform::identity()
    }
}

impl Mul for StateTransform {
    type Output = StateTransform;
    fn mul(self, rhs: StateTransform) -> StateTransform {
        StateTransform { m: self.m * rhs.m }
    }
}

impl Mul<StateVector> for StateTransform {
    type Output = StateVector;
    fn mul(self, rhs: StateVector) -> StateVector {
        let s = self.m
            * Vector6::new(
                rhs.position.x.kilometers(),
                rhs.position.y.kilometers(),
                rhs.position.z.kilometers(),
                rhs.velocity.dx.kilometers_per_second(),
                rhs.velocity.dy.kilometers_per_second(),
                rhs.velocity.dz.kilometers_per_second(),
            );
        StateVector::new(
            DistanceVector::from_kilometers(s[0], s[1], s[2]),
            VelocityVector::from_kilometers_per_second(s[3], s[4], s[5]),
        )
    }
}

// -------------------------------------------------------------------------------------------------
// RotationQuaternion
// -------------------------------------------------------------------------------------------------

/// A unit quaternion in the toolkit's scalar-first convention
/// `(w, x, y, z)`.
///
/// No normalization is enforced on construction; conversion to a rotation
/// matrix normalizes, and conversion *from* a matrix that is not a rotation
/// fails through the bridge, not here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationQuaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationQuaternion {
    /// The identity rotation.
    pub fn identity() -> Self {
        RotationQuaternion {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        RotationQuaternion { w, x, y, z }
    }

    pub fn conjugate(&self) -> RotationQuaternion {
        RotationQuaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}
