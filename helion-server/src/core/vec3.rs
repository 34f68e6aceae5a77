//! Fixed-Point 3D Vector
//!
//! Positions as the engine reports them: three Q16.16 components.
//! The lag-compensation store only constructs, copies and compares these.

use std::fmt;
use std::ops::{Add, Sub};
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, FIXED_SCALE, to_float};

/// 3D vector with fixed-point components.
///
/// The zero vector doubles as the "no data yet" sentinel of the
/// lag-compensation store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec3 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point)
    pub y: Fixed,
    /// Z component (Q16.16 fixed-point)
    pub z: Fixed,
}

impl FixedVec3 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self { x, y, z }
    }

    /// Create a vector from whole map units.
    #[inline]
    pub const fn from_ints(x: i32, y: i32, z: i32) -> Self {
        Self {
            x: x.wrapping_shl(FIXED_SCALE as u32),
            y: y.wrapping_shl(FIXED_SCALE as u32),
            z: z.wrapping_shl(FIXED_SCALE as u32),
        }
    }

    /// True for the origin, which is also the reset value.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    /// Convert to float tuple for logging.
    #[inline]
    pub fn to_floats(self) -> (f32, f32, f32) {
        (to_float(self.x), to_float(self.y), to_float(self.z))
    }
}

impl Add for FixedVec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x.wrapping_add(rhs.x),
            y: self.y.wrapping_add(rhs.y),
            z: self.z.wrapping_add(rhs.z),
        }
    }
}

impl Sub for FixedVec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(rhs.x),
            y: self.y.wrapping_sub(rhs.y),
            z: self.z.wrapping_sub(rhs.z),
        }
    }
}

impl fmt::Debug for FixedVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy, fz) = self.to_floats();
        write!(f, "Vec3({:.3}, {:.3}, {:.3})", fx, fy, fz)
    }
}

impl fmt::Display for FixedVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy, fz) = self.to_floats();
        write!(f, "({:.3}, {:.3}, {:.3})", fx, fy, fz)
    }
}
