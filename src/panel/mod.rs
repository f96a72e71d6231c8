//! Rectangular detector panels
//!
//! A panel is described by four measured corners. [`RectangleCorners`]
//! checks that the corners form a rectangle and derives the panel center,
//! its local axes and the rotation that takes a flat panel at the origin
//! into the measured pose.
//!
//! ## Winding order
//!
//! Corners are supplied lower-left, upper-left, upper-right, lower-right
//! (clockwise when looking at the detecting face):
//!
//! ```text
//!   p2 ---------- p3
//!   |              |
//!   |              |
//!   p1 ---------- p4
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use panelgeom::panel::RectangleCorners;
//!
//! let panel = RectangleCorners::new(
//!     [0.0, 0.0, 0.0],
//!     [0.0, 0.5, 0.0],
//!     [2.0, 0.5, 0.0],
//!     [2.0, 0.0, 0.0],
//! )
//! .unwrap();
//! assert_eq!(panel.center(), [1.0, 0.25, 0.0]);
//! assert_eq!(panel.width(), 2.0);
//! assert_eq!(panel.height(), 0.5);
//! ```

pub mod survey;

pub use survey::{parse_corner_line, read_panels, PanelRecord};

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::constants::{ANGLE_TOLERANCE, TOLERANCE};
use crate::coordinates::{Angle, AngleUnit, IntoVector3, Vector3};
use crate::errors::{GeometryError, Result};
use crate::location::{make_location, nesting_order, Location};
use crate::rotation::{get_euler, EulerConvention, GoniometerAngles, Rotation};

/// Tolerances used while validating and describing a panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Absolute distance tolerance for the rectangle checks
    pub length: f64,
    /// Rotations smaller than this (degrees) are left out of locations
    pub angle: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            length: TOLERANCE,
            angle: ANGLE_TOLERANCE,
        }
    }
}

impl Tolerances {
    /// Set the length tolerance
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Set the angle tolerance (degrees)
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// Four validated corners of a rectangular panel with its derived geometry
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleCorners {
    points: [Vector3; 4],
    center: Vector3,
    orientation: Matrix3<f64>,
    tolerances: Tolerances,
}

impl RectangleCorners {
    /// Validates the corners with default tolerances
    ///
    /// See [`RectangleCorners::with_tolerances`].
    pub fn new<P: IntoVector3>(p1: P, p2: P, p3: P, p4: P) -> Result<Self> {
        Self::with_tolerances(p1, p2, p3, p4, Tolerances::default())
    }

    /// Validates the corners and computes center and orientation
    ///
    /// # Arguments
    ///
    /// * `p1` - Lower-left corner
    /// * `p2` - Upper-left corner
    /// * `p3` - Upper-right corner
    /// * `p4` - Lower-right corner
    /// * `tolerances` - Length and angle tolerances
    ///
    /// # Errors
    ///
    /// - [`GeometryError::InvalidCornerOrder`] if an edge from `p1` is longer
    ///   than the diagonal `p1`-`p3`
    /// - [`GeometryError::NotAParallelogram`] if opposite sides differ in
    ///   length or do not cancel
    /// - [`GeometryError::NotARectangle`] if the corner at `p1` is not square
    pub fn with_tolerances<P: IntoVector3>(
        p1: P,
        p2: P,
        p3: P,
        p4: P,
        tolerances: Tolerances,
    ) -> Result<Self> {
        let p1 = p1.into_vector3()?;
        let p2 = p2.into_vector3()?;
        let p3 = p3.into_vector3()?;
        let p4 = p4.into_vector3()?;
        let tol = tolerances.length;

        let diagonal = (p1 - p3).length_squared();
        for (comparison, edge) in [
            ("|p1-p2|^2 > |p1-p3|^2", (p1 - p2).length_squared()),
            ("|p1-p4|^2 > |p1-p3|^2", (p1 - p4).length_squared()),
        ] {
            if !(edge <= diagonal) {
                return Err(GeometryError::InvalidCornerOrder {
                    comparison: comparison.to_string(),
                    edge,
                    diagonal,
                });
            }
        }

        let left = p2 - p1;
        let right = p4 - p3;
        let top = p2 - p3;
        let bottom = p4 - p1;

        for (quantity, value) in [
            (
                "|len(left) - len(right)|",
                (left.length() - right.length()).abs(),
            ),
            (
                "|len(top) - len(bottom)|",
                (top.length() - bottom.length()).abs(),
            ),
        ] {
            if !(value <= tol) {
                return Err(GeometryError::NotAParallelogram {
                    quantity: quantity.to_string(),
                    value,
                    tolerance: tol,
                });
            }
        }

        for (i, name) in ["x", "y", "z"].iter().enumerate() {
            let sum = (left[i] + right[i]).abs();
            if !(sum <= tol) {
                return Err(GeometryError::NotAParallelogram {
                    quantity: format!("|left.{} + right.{}|", name, name),
                    value: sum,
                    tolerance: tol,
                });
            }
        }

        let dot = left.dot(&bottom);
        if !(dot.abs() <= tol) {
            return Err(GeometryError::NotARectangle {
                dot,
                tolerance: tol,
            });
        }

        let center = (p1 + p2 + p3 + p4) / 4.0;
        let xvec = (0.5 * (p4 + p3) - center).normalize()?;
        let yvec = (-0.5 * (p1 + p4) + center).normalize()?;
        let zvec = xvec.cross(&yvec).normalize()?;
        let orientation = Matrix3::new(
            xvec.x, xvec.y, xvec.z, yvec.x, yvec.y, yvec.z, zvec.x, zvec.y, zvec.z,
        );

        log::debug!(
            "panel center {} size {} x {} normal {}",
            center,
            bottom.length(),
            left.length(),
            zvec
        );

        Ok(RectangleCorners {
            points: [p1, p2, p3, p4],
            center,
            orientation,
            tolerances,
        })
    }

    /// Length of the bottom edge (`p4 - p1`)
    pub fn width(&self) -> f64 {
        (self.points[3] - self.points[0]).length()
    }

    /// Length of the left edge (`p2 - p1`)
    pub fn height(&self) -> f64 {
        (self.points[1] - self.points[0]).length()
    }

    /// Average of the four corners
    pub fn center(&self) -> Vector3 {
        self.center
    }

    /// Rows are the panel's local x, y and z (normal) unit axes
    pub fn orientation(&self) -> Matrix3<f64> {
        self.orientation
    }

    /// The corners as supplied
    pub fn points(&self) -> [Vector3; 4] {
        self.points
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// Unit vector from the center toward the right edge
    pub fn x_axis(&self) -> Vector3 {
        self.row(0)
    }

    /// Unit vector from the center toward the top edge
    pub fn y_axis(&self) -> Vector3 {
        self.row(1)
    }

    /// Outward normal, `x_axis × y_axis`
    pub fn normal(&self) -> Vector3 {
        self.row(2)
    }

    fn row(&self, r: usize) -> Vector3 {
        Vector3::new(
            self.orientation[(r, 0)],
            self.orientation[(r, 1)],
            self.orientation[(r, 2)],
        )
    }

    /// Euler angles of the orientation in radians, wrapped into `[0, 2π)`
    ///
    /// See [`EulerConvention::wrapped`] for the order of the angles.
    pub fn euler_angles(&self, convention: EulerConvention) -> [f64; 3] {
        convention.wrapped(&self.orientation)
    }

    /// Goniometer angles from the panel's x and y axes
    pub fn goniometer_angles(&self, unit: AngleUnit) -> Result<GoniometerAngles> {
        get_euler(self.x_axis(), self.y_axis(), unit)
    }

    /// Euler rotations in the order of [`euler_angles`](Self::euler_angles)
    ///
    /// This is application order except for `YZY`, which lists the last
    /// rotation first.
    pub fn rotations(&self, convention: EulerConvention) -> Vec<Rotation> {
        self.euler_angles(convention)
            .iter()
            .zip(convention.reported_axes())
            .map(|(angle, axis)| Rotation::new(Angle::from_radians(*angle), axis.unit()))
            .collect()
    }

    /// Location description of the panel for an instrument definition
    pub fn location(&self, convention: EulerConvention) -> Result<Location> {
        let rotations = nesting_order(convention, self.rotations(convention));
        make_location(self.center, &rotations, self.tolerances.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn assert_row(panel: &RectangleCorners, row: usize, expected: [f64; 3]) {
        for (c, e) in expected.iter().enumerate() {
            assert_relative_eq!(panel.orientation()[(row, c)], *e, epsilon = 1e-12);
        }
    }

    fn degrees(angles: [f64; 3]) -> [f64; 3] {
        angles.map(f64::to_degrees)
    }

    #[rstest]
    #[case(1.0, 1.0)]
    #[case(2.5, 0.1)]
    #[case(0.01, 40.0)]
    #[case(1234.5, 678.9)]
    fn test_axis_aligned_rectangle(#[case] w: f64, #[case] h: f64) {
        let panel =
            RectangleCorners::new([0.0, 0.0, 0.0], [0.0, h, 0.0], [w, h, 0.0], [w, 0.0, 0.0])
                .unwrap();
        assert_relative_eq!(panel.center().x, w / 2.0, epsilon = 1e-12);
        assert_relative_eq!(panel.center().y, h / 2.0, epsilon = 1e-12);
        assert_eq!(panel.center().z, 0.0);
        assert_relative_eq!(panel.width(), w, epsilon = 1e-12);
        assert_relative_eq!(panel.height(), h, epsilon = 1e-12);

        assert_eq!(panel.x_axis(), Vector3::X);
        assert_eq!(panel.y_axis(), Vector3::Y);
        assert_eq!(panel.normal(), Vector3::Z);
        assert_eq!(panel.euler_angles(EulerConvention::ZYZ), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scenario_rotated_and_flipped() {
        let panel = RectangleCorners::new(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        )
        .unwrap();
        assert_eq!(panel.center(), [0.5, 0.5, 0.0]);
        assert_row(&panel, 0, [0.0, 1.0, 0.0]);
        assert_row(&panel, 1, [1.0, 0.0, 0.0]);
        assert_row(&panel, 2, [0.0, 0.0, -1.0]);

        let [a, b, c] = degrees(panel.euler_angles(EulerConvention::ZYZ));
        assert_relative_eq!(a, 90.0, epsilon = 1e-9);
        assert_relative_eq!(b, 180.0, epsilon = 1e-9);
        assert_eq!(c, 0.0);
    }

    #[test]
    fn test_scenario_quarter_turn() {
        let panel = RectangleCorners::new(
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        )
        .unwrap();
        assert_eq!(panel.center(), [0.5, 0.5, 0.0]);
        assert_row(&panel, 0, [0.0, -1.0, 0.0]);
        assert_row(&panel, 1, [1.0, 0.0, 0.0]);
        assert_row(&panel, 2, [0.0, 0.0, 1.0]);

        let [a, b, c] = degrees(panel.euler_angles(EulerConvention::ZYZ));
        assert_relative_eq!(a, 90.0, epsilon = 1e-9);
        assert_eq!(b, 0.0);
        assert_eq!(c, 0.0);
    }

    #[test]
    fn test_collinear_points_rejected() {
        let result = RectangleCorners::new(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
        );
        assert!(matches!(result, Err(GeometryError::NotARectangle { .. })));
    }

    #[test]
    fn test_coincident_points_rejected() {
        let result = RectangleCorners::new(
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        );
        assert!(matches!(
            result,
            Err(GeometryError::NotAParallelogram { .. })
        ));
    }

    #[test]
    fn test_sheared_quadrilateral_rejected() {
        let result = RectangleCorners::new(
            [0.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [1.5, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        );
        match result {
            Err(GeometryError::NotARectangle { dot, tolerance }) => {
                assert_relative_eq!(dot, 0.5);
                assert_eq!(tolerance, TOLERANCE);
            }
            other => panic!("expected NotARectangle, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_winding_rejected() {
        // p3 and p4 swapped: the "diagonal" is now an edge
        let result = RectangleCorners::new(
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
        );
        match result {
            Err(GeometryError::InvalidCornerOrder {
                comparison,
                edge,
                diagonal,
            }) => {
                assert!(comparison.starts_with("|p1-p4|"));
                assert_eq!(edge, 2.0);
                assert_eq!(diagonal, 1.0);
            }
            other => panic!("expected InvalidCornerOrder, got {:?}", other),
        }
    }

    #[test]
    fn test_trapezoid_rejected() {
        let result = RectangleCorners::new(
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.8, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        );
        assert!(matches!(
            result,
            Err(GeometryError::NotAParallelogram { .. })
        ));
    }

    #[test]
    fn test_tolerance_accepts_survey_noise() {
        let corners = (
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.00005, 0.0],
            [1.0, 0.0, 0.0],
        );
        assert!(RectangleCorners::new(corners.0, corners.1, corners.2, corners.3).is_ok());

        let strict = Tolerances::default().with_length(1e-6);
        assert!(RectangleCorners::with_tolerances(
            corners.0, corners.1, corners.2, corners.3, strict
        )
        .is_err());
    }

    #[test]
    fn test_points_unmodified() {
        let p = [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(1.0, 3.0, 3.0),
            Vector3::new(2.0, 3.0, 3.0),
            Vector3::new(2.0, 2.0, 3.0),
        ];
        let panel = RectangleCorners::new(p[0], p[1], p[2], p[3]).unwrap();
        assert_eq!(panel.points(), p);
        assert_eq!(panel.tolerances(), Tolerances::default());
    }

    #[test]
    fn test_size_mismatch_propagates() {
        let p1: Vec<f64> = vec![0.0, 0.0];
        let result = RectangleCorners::new(
            p1,
            vec![0.0, 1.0, 0.0],
            vec![1.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
        );
        assert_eq!(result, Err(GeometryError::SizeMismatch { actual: 2 }));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_non_finite_corner_rejected(#[case] bad: f64) {
        let result =
            RectangleCorners::new([bad, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        assert!(matches!(result, Err(GeometryError::NonFinite { .. })));
    }

    #[test]
    fn test_overflowing_corners_rejected() {
        let big = f64::MAX;
        let result =
            RectangleCorners::new([-big, 0.0, 0.0], [-big, 1.0, 0.0], [big, 1.0, 0.0], [big, 0.0, 0.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rotations_follow_convention_axes() {
        let panel = RectangleCorners::new(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        )
        .unwrap();
        let rotations = panel.rotations(EulerConvention::ZYZ);
        let axes: Vec<Vector3> = rotations.iter().map(|r| r.axis).collect();
        assert_eq!(axes, vec![Vector3::Z, Vector3::Y, Vector3::Z]);
        assert_relative_eq!(rotations[0].angle.to_degrees(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_goniometer_angles() {
        let panel =
            RectangleCorners::new([0.0, 0.0, 5.0], [0.0, 1.0, 5.0], [1.0, 1.0, 5.0], [1.0, 0.0, 5.0])
                .unwrap();
        let angles = panel.goniometer_angles(AngleUnit::Degrees).unwrap();
        assert_eq!((angles.phi, angles.chi, angles.omega), (0.0, 0.0, 0.0));
    }
}
