//! Composite vector quantities: three scalar components of one dimension,
//! plus the position/velocity pair making up a full state.

use std::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::{Angle, Distance, EphemerisPeriod, Speed};

// -------------------------------------------------------------------------------------------------
// DimensionlessVector
// -------------------------------------------------------------------------------------------------

/// A bare direction or ratio vector. The only vector type whose components
/// are unlabeled doubles; everything dimensional goes through
/// [`DistanceVector`] or [`VelocityVector`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionlessVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl DimensionlessVector {
    pub const ZERO: DimensionlessVector = DimensionlessVector {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        DimensionlessVector { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        Vector3::from(*self).norm()
    }

    /// Unit vector along `self`; the zero vector maps to itself.
    pub fn hat(&self) -> DimensionlessVector {
        let n = self.norm();
        if n == 0.0 {
            DimensionlessVector::ZERO
        } else {
            DimensionlessVector {
                x: self.x / n,
                y: self.y / n,
                z: self.z / n,
            }
        }
    }

    pub fn dot(&self, other: &DimensionlessVector) -> f64 {
        Vector3::from(*self).dot(&Vector3::from(*other))
    }

    pub fn cross(&self, other: &DimensionlessVector) -> DimensionlessVector {
        Vector3::from(*self).cross(&Vector3::from(*other)).into()
    }

    /// Angular separation between `self` and `other`, in `[0, π]`. Zero when
    /// either vector is zero.
    pub fn separation(&self, other: &DimensionlessVector) -> Angle {
        let (a, b) = (Vector3::from(*self), Vector3::from(*other));
        let denom = a.norm() * b.norm();
        if denom == 0.0 {
            return Angle::ZERO;
        }
        Angle::from_radians((a.dot(&b) / denom).clamp(-1.0, 1.0).acos())
    }
}

impl From<Vector3<f64>> for DimensionlessVector {
    fn from(v: Vector3<f64>) -> Self {
        DimensionlessVector {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<DimensionlessVector> for Vector3<f64> {
    fn from(v: DimensionlessVector) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

// -------------------------------------------------------------------------------------------------
// DistanceVector
// -------------------------------------------------------------------------------------------------

/// A position or offset: three [`Distance`] components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DistanceVector {
    pub x: Distance,
    pub y: Distance,
    pub z: Distance,
}

impl DistanceVector {
    pub const ZERO: DistanceVector = DistanceVector {
        x: Distance::ZERO,
        y: Distance::ZERO,
        z: Distance::ZERO,
    };

    pub fn new(x: Distance, y: Distance, z: Distance) -> Self {
        DistanceVector { x, y, z }
    }

    pub fn from_kilometers(x: f64, y: f64, z: f64) -> Self {
        DistanceVector {
            x: Distance::from_kilometers(x),
            y: Distance::from_kilometers(y),
            z: Distance::from_kilometers(z),
        }
    }

    pub fn norm(&self) -> Distance {
        Distance::from_kilometers(
            Vector3::new(
                self.x.kilometers(),
                self.y.kilometers(),
                self.z.kilometers(),
            )
            .norm(),
        )
    }

    /// Direction of `self`, dimensionless.
    pub fn hat(&self) -> DimensionlessVector {
        DimensionlessVector {
            x: self.x.kilometers(),
            y: self.y.kilometers(),
            z: self.z.kilometers(),
        }
        .hat()
    }
}

impl Add for DistanceVector {
    type Output = DistanceVector;
    fn add(self, rhs: DistanceVector) -> DistanceVector {
        DistanceVector {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for DistanceVector {
    type Output = DistanceVector;
    fn sub(self, rhs: DistanceVector) -> DistanceVector {
        DistanceVector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Neg for DistanceVector {
    type Output = DistanceVector;
    fn neg(self) -> DistanceVector {
        DistanceVector {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f64> for DistanceVector {
    type Output = DistanceVector;
    fn mul(self, rhs: f64) -> DistanceVector {
        DistanceVector {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Div<f64> for DistanceVector {
    type Output = DistanceVector;
    fn div(self, rhs: f64) -> DistanceVector {
        DistanceVector {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Per-component distance over period, yielding a velocity.
impl Div<EphemerisPeriod> for DistanceVector {
    type Output = VelocityVector;
    fn div(self, rhs: EphemerisPeriod) -> VelocityVector {
        VelocityVector {
            dx: self.x / rhs,
            dy: self.y / rhs,
            dz: self.z / rhs,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// VelocityVector
// -------------------------------------------------------------------------------------------------

/// A velocity: three [`Speed`] components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityVector {
    pub dx: Speed,
    pub dy: Speed,
    pub dz: Speed,
}

impl VelocityVector {
    pub const ZERO: VelocityVector = VelocityVector {
        dx: Speed::ZERO,
        dy: Speed::ZERO,
        dz: Speed::ZERO,
    };

    pub fn new(dx: Speed, dy: Speed, dz: Speed) -> Self {
        VelocityVector { dx, dy, dz }
    }

    pub fn from_kilometers_per_second(dx: f64, dy: f64, dz: f64) -> Self {
        VelocityVector {
            dx: Speed::from_kilometers_per_second(dx),
            dy: Speed::from_kilometers_per_second(dy),
            dz: Speed::from_kilometers_per_second(dz),
        }
    }

    pub fn norm(&self) -> Speed {
        Speed::from_kilometers_per_second(
            Vector3::new(
                self.dx.kilometers_per_second(),
                self.dy.kilometers_per_second(),
                self.dz.kilometers_per_second(),
            )
            .norm(),
        )
    }
}

impl Add for VelocityVector {
    type Output = VelocityVector;
    fn add(self, rhs: VelocityVector) -> VelocityVector {
        VelocityVector {
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
            dz: self.dz + rhs.dz,
        }
    }
}

impl Sub for VelocityVector {
    type Output = VelocityVector;
    fn sub(self, rhs: VelocityVector) -> VelocityVector {
        VelocityVector {
            dx: self.dx - rhs.dx,
            dy: self.dy - rhs.dy,
            dz: self.dz - rhs.dz,
        }
    }
}

impl Neg for VelocityVector {
    type Output = VelocityVector;
    fn neg(self) -> VelocityVector {
        VelocityVector {
            dx: -self.dx,
            dy: -self.dy,
            dz: -self.dz,
        }
    }
}

impl Mul<f64> for VelocityVector {
    type Output = VelocityVector;
    fn mul(self, rhs: f64) -> VelocityVector {
        VelocityVector {
            dx: self.dx * rhs,
            dy: self.dy * rhs,
            dz: self.dz * rhs,
        }
    }
}

/// Per-component displacement over a period.
impl Mul<EphemerisPeriod> for VelocityVector {
    type Output = DistanceVector;
    fn mul(self, rhs: EphemerisPeriod) -> DistanceVector {
        DistanceVector {
            x: self.dx * rhs,
            y: self.dy * rhs,
            z: self.dz * rhs,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// StateVector
// -------------------------------------------------------------------------------------------------

/// A full ephemeris state: position paired with velocity. Deliberately not a
/// bare 6-array — the two halves carry different dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateVector {
    pub position: DistanceVector,
    pub velocity: VelocityVector,
}

impl StateVector {
    pub const ZERO: StateVector = StateVector {
        position: DistanceVector::ZERO,
        velocity: VelocityVector::ZERO,
    };

    pub fn new(position: DistanceVector, velocity: VelocityVector) -> Self {
        StateVector { position, velocity }
    }
}

impl Add for StateVector {
    type Output = StateVector;
    fn add(self, rhs: StateVector) -> StateVector {
        StateVector {
            position: self.position + rhs.position,
            velocity: self.velocity + rhs.velocity,
        }
    }
}

impl Sub for StateVector {
    type Output = StateVector;
    fn sub(self, rhs: StateVector) -> StateVector {
        StateVector {
            position: self.position - rhs.position,
            velocity: self.velocity - rhs.velocity,
        }
    }
}

impl Neg for StateVector {
    type Output = StateVector;
    fn neg(self) -> StateVector {
        StateVector {
            position: -self.position,
            velocity: -self.velocity,
        }
    }
}
