/// 3D points and directions
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Coordinate axis used for rotations and indexed access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A point or direction in 3D space.
///
/// `Vector3` is a plain value: every operation returns a new vector and
/// leaves its operands untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component by index, treating the vector as a homogeneous point:
    /// indices past z read as w = 1.
    pub fn get(&self, index: usize) -> f64 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => 1.0,
        }
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.to_na().dot(&other.to_na())
    }

    /// Right-handed cross product `self × other`.
    pub fn cross(self, other: Self) -> Self {
        self.to_na().cross(&other.to_na()).into()
    }

    pub fn length(self) -> f64 {
        self.to_na().norm()
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Unit vector in the same direction.
    ///
    /// Fails for zero-length input, which happens in practice when two
    /// vertices coincide.
    pub fn normalize(self) -> Result<Self> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return Err(Error::ZeroLengthVector(len));
        }
        Ok(self.scale(1.0 / len))
    }

    /// Rotate about a coordinate axis by `angle_deg` degrees.
    ///
    /// The pair orthogonal to the axis is rotated as
    /// `a' = a cosθ + b sinθ`, `b' = b cosθ - a sinθ` with (a, b) being
    /// (y, z) for X, (x, z) for Y and (x, y) for Z.
    pub fn rotate(self, angle_deg: f64, axis: Axis) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let Vector3 { x, y, z } = self;
        match axis {
            Axis::X => Self::new(x, y * cos + z * sin, z * cos - y * sin),
            Axis::Y => Self::new(x * cos + z * sin, y, z * cos - x * sin),
            Axis::Z => Self::new(x * cos + y * sin, y * cos - x * sin, z),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_na(self) -> na::Vector3<f64> {
        na::Vector3::new(self.x, self.y, self.z)
    }
}

impl From<na::Vector3<f64>> for Vector3 {
    fn from(v: na::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, other: Vector3) {
        *self = *self + other;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, other: Vector3) {
        *self = *self - other;
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, s: f64) -> Vector3 {
        self.scale(s)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self.scale(-1.0)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>12.4}{:>12.4}{:>12.4}", self.x, self.y, self.z)
    }
}
