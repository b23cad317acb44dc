//! # Physical quantity types
//!
//! One value type per physical dimension, each wrapping a double stored in a
//! single canonical unit:
//!
//! | type                 | canonical unit              |
//! |----------------------|-----------------------------|
//! | [`Distance`]         | kilometers                  |
//! | [`Angle`]            | radians                     |
//! | [`EphemerisInstant`] | TDB seconds past J2000      |
//! | [`EphemerisPeriod`]  | seconds                     |
//! | [`Speed`]            | kilometers per second       |
//! | [`AngularRate`]      | radians per second          |
//! | [`MassParameter`]    | km³/s²                      |
//!
//! Alternate units (degrees, days, astronomical units, …) exist only at the
//! type boundary: named constructors scale on the way in, named accessors
//! scale on the way out, and the stored value never changes representation.
//! Arithmetic is closed within a dimension where physically meaningful
//! (`Distance + Distance`, `Distance × f64`, `Distance ÷ EphemerisPeriod =
//! Speed`); mixing dimensions any other way is a type error.
//!
//! These types validate nothing. A NaN fed to a constructor travels through
//! unmodified; rejecting malformed values is the toolkit's job, and its
//! verdict comes back through the error bridge.
//!
//! Composite quantities (vectors, states, matrices, quaternions, coverage
//! windows) live in the `vectors`, `matrices` and `windows` submodules and
//! are re-exported here.

mod matrices;
mod vectors;
mod windows;

pub use self::matrices::{RotationMatrix, RotationQuaternion, StateTransform};
pub use self::vectors::{DimensionlessVector, DistanceVector, StateVector, VelocityVector};
pub use self::windows::{Window, WindowSegment};

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AU_KM, DEGREES_PER_RADIAN, KM_PER_METER, RADIANS_PER_ARCSECOND, RADIANS_PER_DEGREE,
    SECONDS_PER_DAY,
};

// -------------------------------------------------------------------------------------------------
// Distance
// -------------------------------------------------------------------------------------------------

/// A length, stored in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Distance {
    km: f64,
}

impl Distance {
    pub const ZERO: Distance = Distance { km: 0.0 };

    pub fn from_kilometers(km: f64) -> Self {
        Distance { km }
    }

    pub fn from_meters(m: f64) -> Self {
        Distance {
            km: m * KM_PER_METER,
        }
    }

    /// Enter a distance expressed in astronomical units (IAU 2012 value).
    pub fn from_au(au: f64) -> Self {
        Distance { km: au * AU_KM }
    }

    pub fn kilometers(&self) -> f64 {
        self.km
    }

    pub fn meters(&self) -> f64 {
        self.km / KM_PER_METER
    }

    pub fn au(&self) -> f64 {
        self.km / AU_KM
    }

    pub fn abs(&self) -> Self {
        Distance { km: self.km.abs() }
    }
}

impl Add for Distance {
    type Output = Distance;
    fn add(self, rhs: Distance) -> Distance {
        Distance {
            km: self.km + rhs.km,
        }
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Distance) {
        self.km += rhs.km;
    }
}

impl Sub for Distance {
    type Output = Distance;
    fn sub(self, rhs: Distance) -> Distance {
        Distance {
            km: self.km - rhs.km,
        }
    }
}

impl SubAssign for Distance {
    fn sub_assign(&mut self, rhs: Distance) {
        self.km -= rhs.km;
    }
}

impl Neg for Distance {
    type Output = Distance;
    fn neg(self) -> Distance {
        Distance { km: -self.km }
    }
}

impl Mul<f64> for Distance {
    type Output = Distance;
    fn mul(self, rhs: f64) -> Distance {
        Distance { km: self.km * rhs }
    }
}

impl Mul<Distance> for f64 {
    type Output = Distance;
    fn mul(self, rhs: Distance) -> Distance {
        Distance { km: self * rhs.km }
    }
}

impl Div<f64> for Distance {
    type Output = Distance;
    fn div(self, rhs: f64) -> Distance {
        Distance { km: self.km / rhs }
    }
}

/// Ratio of two lengths.
impl Div<Distance> for Distance {
    type Output = f64;
    fn div(self, rhs: Distance) -> f64 {
        self.km / rhs.km
    }
}

/// Distance covered per elapsed period.
impl Div<EphemerisPeriod> for Distance {
    type Output = Speed;
    fn div(self, rhs: EphemerisPeriod) -> Speed {
        Speed {
            km_s: self.km / rhs.seconds,
        }
    }
}

/// Time needed to cover a distance at a given speed.
impl Div<Speed> for Distance {
    type Output = EphemerisPeriod;
    fn div(self, rhs: Speed) -> EphemerisPeriod {
        EphemerisPeriod {
            seconds: self.km / rhs.km_s,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Angle
// -------------------------------------------------------------------------------------------------

/// A plane angle, stored in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Angle {
    rad: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { rad: 0.0 };

    pub fn from_radians(rad: f64) -> Self {
        Angle { rad }
    }

    pub fn from_degrees(deg: f64) -> Self {
        Angle {
            rad: deg * RADIANS_PER_DEGREE,
        }
    }

    pub fn from_arcseconds(arcsec: f64) -> Self {
        Angle {
            rad: arcsec * RADIANS_PER_ARCSECOND,
        }
    }

    pub fn radians(&self) -> f64 {
        self.rad
    }

    pub fn degrees(&self) -> f64 {
        self.rad * DEGREES_PER_RADIAN
    }

    pub fn arcseconds(&self) -> f64 {
        self.rad / RADIANS_PER_ARCSECOND
    }

    pub fn sin(&self) -> f64 {
        self.rad.sin()
    }

    pub fn cos(&self) -> f64 {
        self.rad.cos()
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle {
            rad: self.rad + rhs.rad,
        }
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle {
            rad: self.rad - rhs.rad,
        }
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle { rad: -self.rad }
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        Angle {
            rad: self.rad * rhs,
        }
    }
}

impl Mul<Angle> for f64 {
    type Output = Angle;
    fn mul(self, rhs: Angle) -> Angle {
        Angle {
            rad: self * rhs.rad,
        }
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle {
        Angle {
            rad: self.rad / rhs,
        }
    }
}

impl Div<Angle> for Angle {
    type Output = f64;
    fn div(self, rhs: Angle) -> f64 {
        self.rad / rhs.rad
    }
}

/// Angle swept per elapsed period.
impl Div<EphemerisPeriod> for Angle {
    type Output = AngularRate;
    fn div(self, rhs: EphemerisPeriod) -> AngularRate {
        AngularRate {
            rad_s: self.rad / rhs.seconds,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// EphemerisInstant
// -------------------------------------------------------------------------------------------------

/// A point on the TDB timeline, stored as seconds past the J2000 epoch
/// (2000-01-01 12:00:00 TDB).
///
/// This is the toolkit's native time axis: every ephemeris query, coverage
/// window and time-string conversion is anchored to it. Conversions to and
/// from calendar representations go through [`crate::api::time`];
/// conversions to the `hifitime` ecosystem go through [`Self::from_epoch`]
/// and [`Self::epoch`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct EphemerisInstant {
    tdb_s: f64,
}

impl EphemerisInstant {
    /// The J2000 reference epoch itself.
    pub const J2000: EphemerisInstant = EphemerisInstant { tdb_s: 0.0 };

    pub fn from_tdb_seconds(tdb_s: f64) -> Self {
        EphemerisInstant { tdb_s }
    }

    pub fn tdb_seconds(&self) -> f64 {
        self.tdb_s
    }

    /// Enter from a [`hifitime::Epoch`] (any time scale).
    pub fn from_epoch(epoch: Epoch) -> Self {
        EphemerisInstant {
            tdb_s: epoch.to_et_seconds(),
        }
    }

    /// Leave as a [`hifitime::Epoch`].
    pub fn epoch(&self) -> Epoch {
        Epoch::from_et_seconds(self.tdb_s)
    }
}

impl Sub for EphemerisInstant {
    type Output = EphemerisPeriod;
    fn sub(self, rhs: EphemerisInstant) -> EphemerisPeriod {
        EphemerisPeriod {
            seconds: self.tdb_s - rhs.tdb_s,
        }
    }
}

impl Add<EphemerisPeriod> for EphemerisInstant {
    type Output = EphemerisInstant;
    fn add(self, rhs: EphemerisPeriod) -> EphemerisInstant {
        EphemerisInstant {
            tdb_s: self.tdb_s + rhs.seconds,
        }
    }
}

impl Sub<EphemerisPeriod> for EphemerisInstant {
    type Output = EphemerisInstant;
    fn sub(self, rhs: EphemerisPeriod) -> EphemerisInstant {
        EphemerisInstant {
            tdb_s: self.tdb_s - rhs.seconds,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// EphemerisPeriod
// -------------------------------------------------------------------------------------------------

/// An elapsed span of TDB time, stored in seconds. Signed: the difference of
/// two instants taken in either order is representable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct EphemerisPeriod {
    seconds: f64,
}

impl EphemerisPeriod {
    pub const ZERO: EphemerisPeriod = EphemerisPeriod { seconds: 0.0 };

    /// One Julian day.
    pub const DAY: EphemerisPeriod = EphemerisPeriod {
        seconds: SECONDS_PER_DAY,
    };

    pub fn from_seconds(seconds: f64) -> Self {
        EphemerisPeriod { seconds }
    }

    pub fn from_days(days: f64) -> Self {
        EphemerisPeriod {
            seconds: days * SECONDS_PER_DAY,
        }
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn days(&self) -> f64 {
        self.seconds / SECONDS_PER_DAY
    }

    pub fn abs(&self) -> Self {
        EphemerisPeriod {
            seconds: self.seconds.abs(),
        }
    }
}

impl Add for EphemerisPeriod {
    type Output = EphemerisPeriod;
    fn add(self, rhs: EphemerisPeriod) -> EphemerisPeriod {
        EphemerisPeriod {
            seconds: self.seconds + rhs.seconds,
        }
    }
}

impl Sub for EphemerisPeriod {
    type Output = EphemerisPeriod;
    fn sub(self, rhs: EphemerisPeriod) -> EphemerisPeriod {
        EphemerisPeriod {
            seconds: self.seconds - rhs.seconds,
        }
    }
}

impl Neg for EphemerisPeriod {
    type Output = EphemerisPeriod;
    fn neg(self) -> EphemerisPeriod {
        EphemerisPeriod {
            seconds: -self.seconds,
        }
    }
}

impl Mul<f64> for EphemerisPeriod {
    type Output = EphemerisPeriod;
    fn mul(self, rhs: f64) -> EphemerisPeriod {
        EphemerisPeriod {
            seconds: self.seconds * rhs,
        }
    }
}

impl Mul<EphemerisPeriod> for f64 {
    type Output = EphemerisPeriod;
    fn mul(self, rhs: EphemerisPeriod) -> EphemerisPeriod {
        EphemerisPeriod {
            seconds: self * rhs.seconds,
        }
    }
}

impl Div<f64> for EphemerisPeriod {
    type Output = EphemerisPeriod;
    fn div(self, rhs: f64) -> EphemerisPeriod {
        EphemerisPeriod {
            seconds: self.seconds / rhs,
        }
    }
}

impl Div<EphemerisPeriod> for EphemerisPeriod {
    type Output = f64;
    fn div(self, rhs: EphemerisPeriod) -> f64 {
        self.seconds / rhs.seconds
    }
}

// -------------------------------------------------------------------------------------------------
// Speed
// -------------------------------------------------------------------------------------------------

/// A rate of change of distance, stored in km/s.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Speed {
    km_s: f64,
}

impl Speed {
    pub const ZERO: Speed = Speed { km_s: 0.0 };

    pub fn from_kilometers_per_second(km_s: f64) -> Self {
        Speed { km_s }
    }

    pub fn from_meters_per_second(m_s: f64) -> Self {
        Speed {
            km_s: m_s * KM_PER_METER,
        }
    }

    pub fn kilometers_per_second(&self) -> f64 {
        self.km_s
    }

    pub fn meters_per_second(&self) -> f64 {
        self.km_s / KM_PER_METER
    }
}

impl Add for Speed {
    type Output = Speed;
    fn add(self, rhs: Speed) -> Speed {
        Speed {
            km_s: self.km_s + rhs.km_s,
        }
    }
}

impl Sub for Speed {
    type Output = Speed;
    fn sub(self, rhs: Speed) -> Speed {
        Speed {
            km_s: self.km_s - rhs.km_s,
        }
    }
}

impl Neg for Speed {
    type Output = Speed;
    fn neg(self) -> Speed {
        Speed { km_s: -self.km_s }
    }
}

impl Mul<f64> for Speed {
    type Output = Speed;
    fn mul(self, rhs: f64) -> Speed {
        Speed {
            km_s: self.km_s * rhs,
        }
    }
}

impl Mul<Speed> for f64 {
    type Output = Speed;
    fn mul(self, rhs: Speed) -> Speed {
        Speed {
            km_s: self * rhs.km_s,
        }
    }
}

impl Div<f64> for Speed {
    type Output = Speed;
    fn div(self, rhs: f64) -> Speed {
        Speed {
            km_s: self.km_s / rhs,
        }
    }
}

impl Div<Speed> for Speed {
    type Output = f64;
    fn div(self, rhs: Speed) -> f64 {
        self.km_s / rhs.km_s
    }
}

/// Distance covered over an elapsed period.
impl Mul<EphemerisPeriod> for Speed {
    type Output = Distance;
    fn mul(self, rhs: EphemerisPeriod) -> Distance {
        Distance {
            km: self.km_s * rhs.seconds,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// AngularRate
// -------------------------------------------------------------------------------------------------

/// A rate of rotation, stored in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct AngularRate {
    rad_s: f64,
}

impl AngularRate {
    pub const ZERO: AngularRate = AngularRate { rad_s: 0.0 };

    pub fn from_radians_per_second(rad_s: f64) -> Self {
        AngularRate { rad_s }
    }

    pub fn from_degrees_per_day(deg_day: f64) -> Self {
        AngularRate {
            rad_s: deg_day * RADIANS_PER_DEGREE / SECONDS_PER_DAY,
        }
    }

    pub fn radians_per_second(&self) -> f64 {
        self.rad_s
    }

    pub fn degrees_per_day(&self) -> f64 {
        self.rad_s * SECONDS_PER_DAY / RADIANS_PER_DEGREE
    }
}

impl Add for AngularRate {
    type Output = AngularRate;
    fn add(self, rhs: AngularRate) -> AngularRate {
        AngularRate {
            rad_s: self.rad_s + rhs.rad_s,
        }
    }
}

impl Sub for AngularRate {
    type Output = AngularRate;
    fn sub(self, rhs: AngularRate) -> AngularRate {
        AngularRate {
            rad_s: self.rad_s - rhs.rad_s,
        }
    }
}

impl Neg for AngularRate {
    type Output = AngularRate;
    fn neg(self) -> AngularRate {
        AngularRate {
            rad_s: -self.rad_s,
        }
    }
}

impl Mul<f64> for AngularRate {
    type Output = AngularRate;
    fn mul(self, rhs: f64) -> AngularRate {
        AngularRate {
            rad_s: self.rad_s * rhs,
        }
    }
}

impl Div<f64> for AngularRate {
    type Output = AngularRate;
    fn div(self, rhs: f64) -> AngularRate {
        AngularRate {
            rad_s: self.rad_s / rhs,
        }
    }
}

/// Angle swept over an elapsed period.
impl Mul<EphemerisPeriod> for AngularRate {
    type Output = Angle;
    fn mul(self, rhs: EphemerisPeriod) -> Angle {
        Angle {
            rad: self.rad_s * rhs.seconds,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// MassParameter
// -------------------------------------------------------------------------------------------------

/// A gravitational mass parameter GM, stored in km³/s².
///
/// The toolkit never traffics in bare masses: bodies are characterized by
/// the product GM, which is what kernel files carry (`BODY399_GM` and
/// friends).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct MassParameter {
    km3_s2: f64,
}

impl MassParameter {
    pub fn from_km3_per_s2(km3_s2: f64) -> Self {
        MassParameter { km3_s2 }
    }

    pub fn km3_per_s2(&self) -> f64 {
        self.km3_s2
    }
}

impl Add for MassParameter {
    type Output = MassParameter;
    fn add(self, rhs: MassParameter) -> MassParameter {
        MassParameter {
            km3_s2: self.km3_s2 + rhs.km3_s2,
        }
    }
}

impl Mul<f64> for MassParameter {
    type Output = MassParameter;
    fn mul(self, rhs: f64) -> MassParameter {
        MassParameter {
            km3_s2: self.km3_s2 * rhs,
        }
    }
}

impl Div<MassParameter> for MassParameter {
    type Output = f64;
    fn div(self, rhs: MassParameter) -> f64 {
        self.km3_s2 / rhs.km3_s2
    }
}
