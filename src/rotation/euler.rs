//! Euler angle extraction
//!
//! Two methods are provided:
//!
//! - [`get_euler`] derives goniometer angles `(phi, chi, omega)` directly
//!   from a primary and a secondary panel direction.
//! - [`calc_euler`] decomposes a rotation matrix for any sequence of three
//!   axes. [`get_zyz`] and [`get_yzy`] wrap it for the two sequences used in
//!   instrument definitions.
//!
//! For a convention `s1 s2 s3` the angles `(a1, a2, a3)` satisfy
//! `M = R(s3, a3) · R(s2, a2) · R(s1, a1)`: `a1` is applied first.
//! [`get_yzy`] reports its angles the other way round, last applied first.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::constants::{EULER_ZERO, GIMBAL_LOCK, ROUNDS_TO_ZERO, TAU, TOLERANCE};
use crate::coordinates::angle::{collapse_zero, wrap_two_pi};
use crate::coordinates::{AngleUnit, IntoVector3, Vector3};
use crate::errors::{GeometryError, Result};

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of the axis (0, 1, 2)
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the axis
    pub fn unit(self) -> Vector3 {
        match self {
            Axis::X => Vector3::X,
            Axis::Y => Vector3::Y,
            Axis::Z => Vector3::Z,
        }
    }

    fn from_letter(c: char) -> Option<Axis> {
        match c.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            _ => None,
        }
    }

    fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    /// Elementary rotation about this axis
    fn rotation(self, angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        match self {
            Axis::X => Matrix3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c),
            Axis::Y => Matrix3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c),
            Axis::Z => Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Sequence of three rotation axes
///
/// Proper Euler sequences repeat the first axis last (`ZYZ`), Tait-Bryan
/// sequences use three distinct axes (`XYZ`). Two consecutive rotations
/// about the same axis are not a valid sequence.
///
/// ```rust
/// use panelgeom::rotation::EulerConvention;
///
/// let zyz: EulerConvention = "zyz".parse().unwrap();
/// assert_eq!(zyz, EulerConvention::ZYZ);
/// assert!(zyz.is_proper());
/// assert!("ZZY".parse::<EulerConvention>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EulerConvention {
    axes: [Axis; 3],
}

impl EulerConvention {
    pub const ZYZ: EulerConvention = EulerConvention {
        axes: [Axis::Z, Axis::Y, Axis::Z],
    };
    pub const YZY: EulerConvention = EulerConvention {
        axes: [Axis::Y, Axis::Z, Axis::Y],
    };

    /// Builds a convention from three axes
    pub fn new(first: Axis, second: Axis, third: Axis) -> Result<Self> {
        if first == second || second == third {
            return Err(GeometryError::UnsupportedConvention(format!(
                "{}{}{}",
                first.letter(),
                second.letter(),
                third.letter()
            )));
        }
        Ok(EulerConvention {
            axes: [first, second, third],
        })
    }

    /// Axes in application order
    pub fn axes(&self) -> [Axis; 3] {
        self.axes
    }

    /// True when [`wrapped`](Self::wrapped) lists the angles last applied
    /// first
    ///
    /// Only `YZY` is reported this way: its angles `(b1, b2, b3)` satisfy
    /// `M = R(Y, b1) · R(Z, b2) · R(Y, b3)`.
    pub fn reports_last_first(&self) -> bool {
        *self == EulerConvention::YZY
    }

    /// Axes matching the angle order of [`wrapped`](Self::wrapped)
    pub fn reported_axes(&self) -> [Axis; 3] {
        let mut axes = self.axes;
        if self.reports_last_first() {
            axes.reverse();
        }
        axes
    }

    /// True for sequences whose first and last axes coincide
    pub fn is_proper(&self) -> bool {
        self.axes[0] == self.axes[2]
    }

    /// Decomposes a rotation matrix into angles `(a1, a2, a3)` in radians
    ///
    /// The third angle is read off the first column of the matrix, its
    /// rotation is removed, and the two remaining angles come from the
    /// residual. In gimbal lock the third angle is zero and the first
    /// carries the combined rotation. Angles below 1e-5 are returned as 0.
    pub fn decompose(&self, m: &Matrix3<f64>) -> [f64; 3] {
        let i = self.axes[0].index();
        let j = self.axes[1].index();
        let k = 3 - i - j;
        // +1 when (i, j, k) is a cyclic permutation of (x, y, z)
        let parity = if j == (i + 1) % 3 { 1.0 } else { -1.0 };

        let third = if self.is_proper() {
            let sin_second = m[(j, i)].hypot(m[(k, i)]);
            if sin_second < GIMBAL_LOCK {
                0.0
            } else {
                m[(j, i)].atan2(-parity * m[(k, i)])
            }
        } else {
            let cos_second = m[(i, i)].hypot(m[(j, i)]);
            if cos_second < GIMBAL_LOCK {
                0.0
            } else {
                (parity * m[(j, i)]).atan2(m[(i, i)])
            }
        };

        let residual = self.axes[2].rotation(-third) * m;
        let second = (-parity * residual[(k, i)]).atan2(residual[(i, i)]);
        let first = (-parity * residual[(j, k)]).atan2(residual[(j, j)]);

        log::trace!(
            "{} decomposition: ({}, {}, {}) rad",
            self,
            first,
            second,
            third
        );

        [first, second, third].map(|a| collapse_zero(a, EULER_ZERO))
    }

    /// [`decompose`](Self::decompose) with every angle wrapped into
    /// `[0, 2π)`, in the order given by [`reported_axes`](Self::reported_axes)
    ///
    /// For proper sequences a zero middle angle leaves two rotations about
    /// the same axis; they are folded into the first reported angle.
    pub fn wrapped(&self, m: &Matrix3<f64>) -> [f64; 3] {
        let mut angles = self.decompose(m);
        if self.reports_last_first() {
            angles.reverse();
        }
        let [mut first, second, mut third] = angles;
        if self.is_proper() && second == 0.0 {
            first += third;
            third = 0.0;
        }
        [first, second, third].map(|a| {
            let wrapped = wrap_two_pi(collapse_zero(a, EULER_ZERO));
            if TAU - wrapped < EULER_ZERO {
                0.0
            } else {
                wrapped
            }
        })
    }
}

impl FromStr for EulerConvention {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        let unsupported = || GeometryError::UnsupportedConvention(s.to_string());
        let axes = s
            .chars()
            .map(Axis::from_letter)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(unsupported)?;
        match axes.as_slice() {
            [a, b, c] => EulerConvention::new(*a, *b, *c).map_err(|_| unsupported()),
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for EulerConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.axes {
            write!(f, "{}", axis.letter())?;
        }
        Ok(())
    }
}

/// Decomposes `m` into Euler angles for the named convention (e.g. `"ZYZ"`)
///
/// # Errors
///
/// [`GeometryError::UnsupportedConvention`] for anything other than three
/// letters from {X, Y, Z} without consecutive repeats.
pub fn calc_euler(m: &Matrix3<f64>, convention: &str) -> Result<[f64; 3]> {
    let convention: EulerConvention = convention.parse()?;
    Ok(convention.decompose(m))
}

/// Z-Y-Z angles of `m`, each in `[0, 2π)`
///
/// When the middle angle is zero the first and last rotations are about the
/// same axis and are reported as one combined first angle.
///
/// ```rust
/// use nalgebra::Matrix3;
/// use panelgeom::rotation::get_zyz;
///
/// let quarter_turn = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
/// let [a, b, c] = get_zyz(&quarter_turn);
/// assert!((a.to_degrees() - 90.0).abs() < 1e-12);
/// assert_eq!((b, c), (0.0, 0.0));
/// ```
pub fn get_zyz(m: &Matrix3<f64>) -> [f64; 3] {
    EulerConvention::ZYZ.wrapped(m)
}

/// Y-Z-Y angles `(b1, b2, b3)` of `m`, each in `[0, 2π)`, folded like
/// [`get_zyz`]
///
/// The angles satisfy `M = R(Y, b1) · R(Z, b2) · R(Y, b3)`, so `b3` is the
/// first rotation applied.
pub fn get_yzy(m: &Matrix3<f64>) -> [f64; 3] {
    EulerConvention::YZY.wrapped(m)
}

/// Goniometer angles derived from two panel directions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoniometerAngles {
    pub phi: f64,
    pub chi: f64,
    pub omega: f64,
    pub unit: AngleUnit,
}

/// Angles `(phi, chi, omega)` orienting primary direction `u` and secondary
/// direction `v`
///
/// `v` is re-orthogonalized against `u`, so it only needs to be roughly
/// perpendicular. `v.y` of exactly 1 or -1 selects the special cases where
/// only a rotation about the vertical axis remains.
///
/// # Errors
///
/// [`GeometryError::NonOrthogonalBasis`] if `u` and `v` are collinear or the
/// orthogonalized basis fails the tolerance check.
pub fn get_euler<U: IntoVector3, V: IntoVector3>(
    u: U,
    v: V,
    unit: AngleUnit,
) -> Result<GoniometerAngles> {
    let u = u.into_vector3()?.normalize()?;
    let v = v.into_vector3()?;
    let n = u.cross(&v).normalize().map_err(|_| {
        GeometryError::NonOrthogonalBasis(format!("{} and {} are collinear", u, v))
    })?;
    let v = n.cross(&u).normalize()?;

    for (name, value) in [("u.v", u.dot(&v)), ("u.n", u.dot(&n)), ("v.n", v.dot(&n))] {
        if value.abs() >= TOLERANCE {
            return Err(GeometryError::NonOrthogonalBasis(format!(
                "{} = {} exceeds tolerance {}",
                name, value, TOLERANCE
            )));
        }
    }

    let (phi, chi, omega) = if v.y == 1.0 {
        (n.x.atan2(n.z), 0.0, 0.0)
    } else if v.y == -1.0 {
        let mut phi = -n.x.atan2(n.z);
        if phi == -PI {
            phi = PI;
        }
        (phi, PI, 0.0)
    } else {
        (
            n.y.atan2(u.y),
            v.y.clamp(-1.0, 1.0).acos(),
            v.z.atan2(-v.x),
        )
    };

    let convert = |radians: f64| collapse_zero(unit.from_radians(radians), ROUNDS_TO_ZERO);
    Ok(GoniometerAngles {
        phi: convert(phi),
        chi: convert(chi),
        omega: convert(omega),
        unit,
    })
}
