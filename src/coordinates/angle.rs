//! # Angle Representation Module
//!
//! Rotation angles come out of the Euler solver in radians but are written
//! to instrument definitions in degrees. [`Angle`] keeps the value in the
//! unit it was created with and converts only when asked, so a rotation
//! specified as `90.0` degrees is emitted as exactly `90`.
//!
//! ```rust
//! use panelgeom::coordinates::angle::{Angle, AngleUnit};
//!
//! let quarter = Angle::from_degrees(90.0);
//! assert_eq!(quarter.to_degrees(), 90.0);
//! assert_eq!(quarter.unit(), AngleUnit::Degrees);
//! assert!((quarter.to_radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, RAD2DEG, TAU};

/// Unit in which an angle is stored or requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Expresses an angle given in radians in this unit
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            AngleUnit::Degrees => radians * RAD2DEG,
            AngleUnit::Radians => radians,
        }
    }
}

/// An angular measurement stored in its original unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    value: f64,
    unit: AngleUnit,
}

impl Angle {
    /// Creates an angle from a value in degrees
    pub fn from_degrees(degrees: f64) -> Self {
        Angle {
            value: degrees,
            unit: AngleUnit::Degrees,
        }
    }

    /// Creates an angle from a value in radians
    pub fn from_radians(radians: f64) -> Self {
        Angle {
            value: radians,
            unit: AngleUnit::Radians,
        }
    }

    /// Returns the angle value in degrees
    ///
    /// Exact when the angle was created from degrees.
    pub fn to_degrees(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.value,
            AngleUnit::Radians => self.value * RAD2DEG,
        }
    }

    /// Returns the angle value in radians
    ///
    /// Exact when the angle was created from radians.
    pub fn to_radians(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.value * DEG2RAD,
            AngleUnit::Radians => self.value,
        }
    }

    /// Returns the angle value in the requested unit
    pub fn value_in(&self, unit: AngleUnit) -> f64 {
        match unit {
            AngleUnit::Degrees => self.to_degrees(),
            AngleUnit::Radians => self.to_radians(),
        }
    }

    /// The unit the angle was created with
    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// True when the angle is within `tolerance_deg` of a whole turn
    /// (including zero)
    ///
    /// ```rust
    /// use panelgeom::coordinates::angle::Angle;
    ///
    /// assert!(Angle::from_degrees(359.99999).is_negligible(1e-4));
    /// assert!(Angle::from_degrees(-0.00001).is_negligible(1e-4));
    /// assert!(!Angle::from_degrees(0.01).is_negligible(1e-4));
    /// ```
    pub fn is_negligible(&self, tolerance_deg: f64) -> bool {
        let reduced = self.to_degrees().rem_euclid(360.0);
        reduced < tolerance_deg || 360.0 - reduced < tolerance_deg
    }
}

/// Wraps an angle in radians into `[0, 2π)`
pub fn wrap_two_pi(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can return TAU itself for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Replaces values within `threshold` of zero by `+0.0`
pub fn collapse_zero(value: f64, threshold: f64) -> f64 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::f64::consts::PI;

    #[test]
    fn test_exact_storage() {
        let deg = Angle::from_degrees(123.456789012345);
        assert_eq!(deg.to_degrees(), 123.456789012345);
        assert_eq!(deg.unit(), AngleUnit::Degrees);

        let rad = Angle::from_radians(PI / 4.0);
        assert_eq!(rad.to_radians(), PI / 4.0);
        assert_eq!(rad.unit(), AngleUnit::Radians);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, PI / 2.0)]
    #[case(180.0, PI)]
    #[case(270.0, 3.0 * PI / 2.0)]
    #[case(-45.0, -PI / 4.0)]
    fn test_conversions(#[case] degrees: f64, #[case] radians: f64) {
        assert!((Angle::from_degrees(degrees).to_radians() - radians).abs() < 1e-14);
        assert!((Angle::from_radians(radians).to_degrees() - degrees).abs() < 1e-12);
        assert_eq!(
            Angle::from_degrees(degrees).value_in(AngleUnit::Degrees),
            degrees
        );
        assert!((AngleUnit::Degrees.from_radians(radians) - degrees).abs() < 1e-12);
        assert_eq!(AngleUnit::Radians.from_radians(radians), radians);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(-PI / 2.0, 3.0 * PI / 2.0)]
    #[case(2.0 * PI, 0.0)]
    #[case(5.0 * PI, PI)]
    #[case(-1e-300, 0.0)]
    fn test_wrap_two_pi(#[case] input: f64, #[case] expected: f64) {
        let wrapped = wrap_two_pi(input);
        assert!((0.0..TAU).contains(&wrapped));
        assert!((wrapped - expected).abs() < 1e-12, "{} -> {}", input, wrapped);
    }

    #[test]
    fn test_collapse_zero() {
        assert_eq!(collapse_zero(-1e-9, 1e-5), 0.0);
        assert!(collapse_zero(-1e-9, 1e-5).is_sign_positive());
        assert_eq!(collapse_zero(0.5, 1e-5), 0.5);
    }

    #[test]
    fn test_negligible() {
        assert!(Angle::from_radians(0.0).is_negligible(1e-4));
        assert!(Angle::from_radians(2.0 * PI).is_negligible(1e-4));
        assert!(!Angle::from_radians(PI).is_negligible(1e-4));
        assert!(!Angle::from_degrees(-90.0).is_negligible(1e-4));
    }
}
