//! # Vector Module
//!
//! Three-dimensional vectors used for detector corner positions, panel
//! axes and rotation axes.
//!
//! ## Coordinate System Convention
//!
//! Instrument coordinates are right-handed:
//! - **Z-axis**: Along the incident beam
//! - **Y-axis**: Vertically up
//! - **X-axis**: Completes the right-handed set (horizontal)
//!
//! ## Conversions
//!
//! Corner positions arrive from survey tables as plain numbers. Every public
//! entry point of the crate accepts anything implementing [`IntoVector3`]
//! (vectors, `[f64; 3]`, 3-tuples, slices, `Vec<f64>`, nalgebra vectors) and
//! converts it once through [`to_vector3`]. Slices of the wrong length fail
//! with [`GeometryError::SizeMismatch`], NaN or infinite components with
//! [`GeometryError::NonFinite`].
//!
//! ## Examples
//!
//! ```rust
//! use panelgeom::coordinates::vector::Vector3;
//!
//! let z = Vector3::X.cross(&Vector3::Y);
//! assert_eq!(z, Vector3::Z);
//! assert_eq!(Vector3::X.dot(&Vector3::Y), 0.0);
//!
//! // Plain arrays compare and combine directly
//! let p = Vector3::new(1.0, 2.0, 3.0) + [1.0, 1.0, 1.0];
//! assert_eq!(p, [2.0, 3.0, 4.0]);
//! ```

use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::constants::TOLERANCE;
use crate::errors::{GeometryError, Result};

/// Three-dimensional vector
///
/// Represents either a point (a panel corner, a panel center) or a
/// direction (a panel axis, a rotation axis). Equality is exact; use the
/// tolerances carried by the panel solver for approximate comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// X-component (horizontal)
    pub x: f64,
    /// Y-component (vertical)
    pub y: f64,
    /// Z-component (along the beam)
    pub z: f64,
}

impl Vector3 {
    /// Unit vector along X
    pub const X: Vector3 = Vector3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// Unit vector along Y
    pub const Y: Vector3 = Vector3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Unit vector along Z
    pub const Z: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };
    /// The zero vector
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a new vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use panelgeom::coordinates::vector::Vector3;
    ///
    /// let v = Vector3::new(1.0, 0.0, 0.0);
    /// assert_eq!(v, Vector3::X);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// Euclidean length of the vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use panelgeom::coordinates::vector::Vector3;
    ///
    /// assert_eq!(Vector3::new(3.0, 4.0, 0.0).length(), 5.0);
    /// ```
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared Euclidean length, used where only comparisons are needed
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns a unit vector in the same direction
    ///
    /// The canonical axes [`Vector3::X`], [`Vector3::Y`] and [`Vector3::Z`]
    /// are returned unchanged so that already-exact axes do not pick up
    /// rounding from a division.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DegenerateVector`] when the length is below
    /// [`TOLERANCE`] or is not finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use panelgeom::coordinates::vector::Vector3;
    ///
    /// let unit = Vector3::new(3.0, 4.0, 0.0).normalize().unwrap();
    /// assert!((unit.length() - 1.0).abs() < 1e-15);
    /// assert!(Vector3::ZERO.normalize().is_err());
    /// ```
    pub fn normalize(&self) -> Result<Vector3> {
        if *self == Vector3::X || *self == Vector3::Y || *self == Vector3::Z {
            return Ok(*self);
        }

        let length = self.length();
        if !(length >= TOLERANCE && length.is_finite()) {
            return Err(GeometryError::DegenerateVector {
                x: self.x,
                y: self.y,
                z: self.z,
                length,
                tolerance: TOLERANCE,
            });
        }

        Ok(*self / length)
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector (right-hand rule)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use panelgeom::coordinates::vector::Vector3;
    ///
    /// assert_eq!(Vector3::Y.cross(&Vector3::Z), Vector3::X);
    /// ```
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Components as an array
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to nalgebra Vector3 for matrix operations
    pub fn to_nalgebra(&self) -> nalgebra::Vector3<f64> {
        nalgebra::Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_nalgebra(vec: nalgebra::Vector3<f64>) -> Self {
        Vector3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

/// Euclidean length of `v`
pub fn length(v: &Vector3) -> f64 {
    v.length()
}

/// Unit vector along `v`, see [`Vector3::normalize`]
pub fn normalize(v: &Vector3) -> Result<Vector3> {
    v.normalize()
}

/// Dot product of `a` and `b`
pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
    a.dot(b)
}

/// Cross product of `a` and `b`
pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    a.cross(b)
}

/// Conversion of vector-like values into [`Vector3`]
///
/// This is the single validation path for externally supplied coordinates.
pub trait IntoVector3 {
    /// Performs the conversion, failing if the input does not have exactly
    /// three finite components
    fn into_vector3(self) -> Result<Vector3>;
}

fn finite(v: Vector3) -> Result<Vector3> {
    for (name, value) in [("x", v.x), ("y", v.y), ("z", v.z)] {
        if !value.is_finite() {
            return Err(GeometryError::NonFinite {
                quantity: format!("{} component of {}", name, v),
                value,
            });
        }
    }
    Ok(v)
}

/// Converts any vector-like value to a [`Vector3`]
///
/// # Examples
///
/// ```rust
/// use panelgeom::coordinates::vector::{to_vector3, Vector3};
///
/// assert_eq!(to_vector3((1.0, 2.0, 3.0)).unwrap(), Vector3::new(1.0, 2.0, 3.0));
/// assert!(to_vector3(vec![1.0, 2.0]).is_err());
/// ```
pub fn to_vector3<T: IntoVector3>(value: T) -> Result<Vector3> {
    value.into_vector3()
}

impl IntoVector3 for Vector3 {
    fn into_vector3(self) -> Result<Vector3> {
        finite(self)
    }
}

impl IntoVector3 for &Vector3 {
    fn into_vector3(self) -> Result<Vector3> {
        finite(*self)
    }
}

impl IntoVector3 for [f64; 3] {
    fn into_vector3(self) -> Result<Vector3> {
        finite(Vector3::from(self))
    }
}

impl IntoVector3 for (f64, f64, f64) {
    fn into_vector3(self) -> Result<Vector3> {
        finite(Vector3::from(self))
    }
}

impl IntoVector3 for &[f64] {
    fn into_vector3(self) -> Result<Vector3> {
        Vector3::try_from(self).and_then(finite)
    }
}

impl IntoVector3 for Vec<f64> {
    fn into_vector3(self) -> Result<Vector3> {
        Vector3::try_from(self.as_slice()).and_then(finite)
    }
}

impl IntoVector3 for nalgebra::Vector3<f64> {
    fn into_vector3(self) -> Result<Vector3> {
        finite(Vector3::from_nalgebra(self))
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(a: [f64; 3]) -> Self {
        Vector3::new(a[0], a[1], a[2])
    }
}

impl From<(f64, f64, f64)> for Vector3 {
    fn from(t: (f64, f64, f64)) -> Self {
        Vector3::new(t.0, t.1, t.2)
    }
}

impl TryFrom<&[f64]> for Vector3 {
    type Error = GeometryError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match values {
            [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
            _ => Err(GeometryError::SizeMismatch {
                actual: values.len(),
            }),
        }
    }
}

impl PartialEq<[f64; 3]> for Vector3 {
    fn eq(&self, other: &[f64; 3]) -> bool {
        self.x == other[0] && self.y == other[1] && self.z == other[2]
    }
}

impl PartialEq<(f64, f64, f64)> for Vector3 {
    fn eq(&self, other: &(f64, f64, f64)) -> bool {
        self.x == other.0 && self.y == other.1 && self.z == other.2
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of range: {}", index),
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// Arithmetic operations
impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, other: Vector3) -> Vector3 {
        Vector3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Add<[f64; 3]> for Vector3 {
    type Output = Vector3;

    fn add(self, other: [f64; 3]) -> Vector3 {
        self + Vector3::from(other)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, other: Vector3) -> Vector3 {
        Vector3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Sub<[f64; 3]> for Vector3 {
    type Output = Vector3;

    fn sub(self, other: [f64; 3]) -> Vector3 {
        self - Vector3::from(other)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, scalar: f64) -> Vector3 {
        Vector3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, scalar: f64) -> Vector3 {
        Vector3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}
