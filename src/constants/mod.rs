//! Constants module for panel geometry calculations

use std::f64::consts::PI;

// Tolerances
/// Absolute length tolerance for corner validation and normalization
pub const TOLERANCE: f64 = 1e-4;
/// Default tolerance below which a rotation (in degrees) is dropped
pub const ANGLE_TOLERANCE: f64 = 1e-4;
/// Entries of generated rotation matrices below this are snapped to zero
pub const MATRIX_ZERO: f64 = 1e-15;
/// Determinant and orthogonality tolerance of `check_rotation`
pub const ROTATION_TOLERANCE: f64 = 1e-15;
/// Self-check tolerance of `generate_rotation` for arbitrary axes
pub const GENERATED_ROTATION_TOLERANCE: f64 = 1e-14;
/// Euler angles (radians) smaller than this collapse to zero
pub const EULER_ZERO: f64 = 1e-5;
/// Sine of the middle Euler angle below which the sequence is gimbal locked
pub const GIMBAL_LOCK: f64 = 1e-10;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Goniometer angles whose magnitude rounds to zero at this precision are
/// reported as +0.0
pub const ROUNDS_TO_ZERO: f64 = 1e-12;
