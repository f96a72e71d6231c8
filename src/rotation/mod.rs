//! Rotation matrices
//!
//! Axis-angle matrix construction and the validity check used to guard
//! every generated matrix. Euler decomposition lives in [`euler`].

pub mod euler;

pub use euler::{calc_euler, get_euler, get_yzy, get_zyz, Axis, EulerConvention, GoniometerAngles};

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::constants::{GENERATED_ROTATION_TOLERANCE, MATRIX_ZERO, ROTATION_TOLERANCE};
use crate::coordinates::{Angle, IntoVector3, Vector3};
use crate::errors::{GeometryError, Result};

/// A single rotation: an angle about an axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub angle: Angle,
    pub axis: Vector3,
}

impl Rotation {
    pub fn new(angle: Angle, axis: Vector3) -> Self {
        Rotation { angle, axis }
    }

    /// Rotation matrix for this rotation, see [`generate_rotation`]
    pub fn matrix(&self) -> Result<Matrix3<f64>> {
        generate_rotation(self.axis, self.angle.to_radians())
    }
}

/// Builds the matrix rotating by `angle` radians about `axis`
///
/// The axis does not need unit length; it is normalized first. Entries
/// whose magnitude is below 1e-15 are set to exactly zero, and the result is
/// verified with [`check_rotation_with_tolerance`] at
/// [`GENERATED_ROTATION_TOLERANCE`] before it is returned.
///
/// # Errors
///
/// [`GeometryError::DegenerateVector`] for an axis shorter than the length
/// tolerance, [`GeometryError::NonFinite`] for a NaN or infinite axis or
/// angle, [`GeometryError::InvalidRotationMatrix`] if the result fails
/// verification.
///
/// # Examples
///
/// ```rust
/// use panelgeom::coordinates::Vector3;
/// use panelgeom::rotation::generate_rotation;
/// use std::f64::consts::FRAC_PI_2;
///
/// let m = generate_rotation(Vector3::Z, FRAC_PI_2).unwrap();
/// let rotated = m * Vector3::X.to_nalgebra();
/// assert_eq!(Vector3::from_nalgebra(rotated), Vector3::Y);
/// ```
pub fn generate_rotation<V: IntoVector3>(axis: V, angle: f64) -> Result<Matrix3<f64>> {
    if !angle.is_finite() {
        return Err(GeometryError::NonFinite {
            quantity: "rotation angle".to_string(),
            value: angle,
        });
    }
    let axis = axis.into_vector3()?.normalize()?;

    let (k3, k2) = angle.sin_cos();
    let k1 = 1.0 - k2;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    let mut m = Matrix3::new(
        k1 * x * x + k2,
        k1 * x * y - k3 * z,
        k1 * x * z + k3 * y,
        k1 * x * y + k3 * z,
        k1 * y * y + k2,
        k1 * y * z - k3 * x,
        k1 * x * z - k3 * y,
        k1 * y * z + k3 * x,
        k1 * z * z + k2,
    );
    for entry in m.iter_mut() {
        if entry.abs() < MATRIX_ZERO {
            *entry = 0.0;
        }
    }

    check_rotation_with_tolerance(&m, GENERATED_ROTATION_TOLERANCE)?;
    Ok(m)
}

/// Verifies that `m` is a rotation: `|det| = 1` and inverse equals transpose
///
/// Uses a tolerance of 1e-15.
pub fn check_rotation(m: &Matrix3<f64>) -> Result<()> {
    check_rotation_with_tolerance(m, ROTATION_TOLERANCE)
}

/// [`check_rotation`] with an explicit tolerance, for matrices that are
/// products of several rotations and carry more rounding
///
/// Matrices with NaN or infinite entries are always rejected.
pub fn check_rotation_with_tolerance(m: &Matrix3<f64>, tolerance: f64) -> Result<()> {
    if let Some(entry) = m.iter().find(|v| !v.is_finite()) {
        return Err(GeometryError::InvalidRotationMatrix(format!(
            "non-finite entry {} in {}",
            entry, m
        )));
    }

    let det = m.determinant();
    if !((det.abs() - 1.0).abs() <= tolerance) {
        return Err(GeometryError::InvalidRotationMatrix(format!(
            "|determinant| = {} differs from 1 by more than {}",
            det.abs(),
            tolerance
        )));
    }

    // M * M^T == I is the same condition as M^-1 == M^T without the
    // rounding of an explicit inversion
    let deviation = (m * m.transpose() - Matrix3::identity()).amax();
    if !(deviation <= tolerance) {
        let inverse = match m.try_inverse() {
            Some(inv) => format!("{}", inv),
            None => "<singular>".to_string(),
        };
        return Err(GeometryError::InvalidRotationMatrix(format!(
            "inverse differs from transpose by {} (tolerance {}): inverse {} transpose {}",
            deviation,
            tolerance,
            inverse,
            m.transpose()
        )));
    }

    log::trace!("rotation matrix verified: det = {}", det);
    Ok(())
}
