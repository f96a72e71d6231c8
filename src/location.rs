//! Panel location descriptions
//!
//! Instrument definitions place a component with a position and a chain of
//! nested rotations. The outermost rotation is applied first and each nested
//! rotation is applied after its parent.

use serde::{Deserialize, Serialize};

use crate::coordinates::{Angle, IntoVector3, Vector3};
use crate::errors::{GeometryError, Result};
use crate::rotation::{EulerConvention, Rotation};

/// One rotation in a nested chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedRotation {
    pub angle: Angle,
    pub axis: Vector3,
    pub inner: Option<Box<NestedRotation>>,
}

/// Position plus nested rotation chain of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub position: Vector3,
    pub rotation: Option<NestedRotation>,
}

impl Location {
    /// Rotations from outermost to innermost
    pub fn rotations(&self) -> Vec<Rotation> {
        let mut chain = Vec::new();
        let mut current = self.rotation.as_ref();
        while let Some(rot) = current {
            chain.push(Rotation::new(rot.angle, rot.axis));
            current = rot.inner.as_deref();
        }
        chain
    }
}

/// Builds the location of a component at `center` rotated by `rotations`
///
/// `rotations` is ordered outermost first. Rotations within
/// `tolerance_ang` degrees of a whole turn are dropped, so an unrotated
/// component has no rotation chain at all.
///
/// ```rust
/// use panelgeom::coordinates::{Angle, Vector3};
/// use panelgeom::location::make_location;
/// use panelgeom::rotation::Rotation;
///
/// let rotations = [
///     Rotation::new(Angle::from_degrees(90.0), Vector3::Z),
///     Rotation::new(Angle::from_degrees(0.0), Vector3::Y),
/// ];
/// let location = make_location([1.0, 2.0, 3.0], &rotations, 1e-4).unwrap();
/// assert_eq!(location.rotations().len(), 1);
/// ```
pub fn make_location<V: IntoVector3>(
    center: V,
    rotations: &[Rotation],
    tolerance_ang: f64,
) -> Result<Location> {
    let position = center.into_vector3()?;
    if let Some(bad) = rotations.iter().find(|r| !r.angle.to_degrees().is_finite()) {
        return Err(GeometryError::NonFinite {
            quantity: format!("rotation angle about {}", bad.axis),
            value: bad.angle.to_degrees(),
        });
    }

    let rotation = rotations
        .iter()
        .rev()
        .filter(|r| {
            let keep = !r.angle.is_negligible(tolerance_ang);
            if !keep {
                log::trace!("dropping rotation of {} deg about {}", r.angle.to_degrees(), r.axis);
            }
            keep
        })
        .fold(None, |inner, r| {
            Some(NestedRotation {
                angle: r.angle,
                axis: r.axis,
                inner: inner.map(Box::new),
            })
        });

    Ok(Location { position, rotation })
}

/// Puts Euler rotations listed in the order of
/// [`EulerConvention::wrapped`] into application order for nesting
///
/// Conventions that report the last rotation first (`YZY`) are reversed;
/// every other convention is already in application order.
pub fn nesting_order(convention: EulerConvention, mut rotations: Vec<Rotation>) -> Vec<Rotation> {
    if convention.reports_last_first() {
        rotations.reverse();
    }
    rotations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rot(deg: f64, axis: Vector3) -> Rotation {
        Rotation::new(Angle::from_degrees(deg), axis)
    }

    #[test]
    fn test_nesting_outermost_first() {
        let rotations = [rot(10.0, Vector3::Z), rot(20.0, Vector3::Y), rot(30.0, Vector3::Z)];
        let location = make_location(Vector3::ZERO, &rotations, 1e-4).unwrap();

        let outer = location.rotation.as_ref().unwrap();
        assert_eq!(outer.angle.to_degrees(), 10.0);
        let middle = outer.inner.as_ref().unwrap();
        assert_eq!(middle.angle.to_degrees(), 20.0);
        let inner = middle.inner.as_ref().unwrap();
        assert_eq!(inner.angle.to_degrees(), 30.0);
        assert!(inner.inner.is_none());

        assert_eq!(location.rotations(), rotations.to_vec());
    }

    #[test]
    fn test_negligible_rotations_dropped() {
        let rotations = [
            rot(0.0, Vector3::Z),
            rot(45.0, Vector3::Y),
            rot(359.99999, Vector3::Z),
        ];
        let location = make_location([1.0, 2.0, 3.0], &rotations, 1e-4).unwrap();
        assert_eq!(location.position, [1.0, 2.0, 3.0]);
        assert_eq!(location.rotations(), vec![rot(45.0, Vector3::Y)]);

        let none = make_location(Vector3::ZERO, &[rot(0.0, Vector3::Z)], 1e-4).unwrap();
        assert!(none.rotation.is_none());
        assert!(none.rotations().is_empty());
    }

    #[test]
    fn test_non_finite_input_rejected() {
        assert!(matches!(
            make_location([f64::NAN, 0.0, 0.0], &[], 1e-4),
            Err(GeometryError::NonFinite { .. })
        ));
        assert!(matches!(
            make_location(Vector3::ZERO, &[rot(f64::NAN, Vector3::Z)], 1e-4),
            Err(GeometryError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_nesting_order_by_convention() {
        let reported = vec![rot(1.0, Vector3::Y), rot(2.0, Vector3::Z), rot(3.0, Vector3::Y)];
        let applied = nesting_order(EulerConvention::YZY, reported.clone());
        assert_eq!(applied[0], reported[2]);
        assert_eq!(applied[2], reported[0]);

        let applied = vec![rot(1.0, Vector3::Z), rot(2.0, Vector3::Y), rot(3.0, Vector3::Z)];
        assert_eq!(nesting_order(EulerConvention::ZYZ, applied.clone()), applied);

        let yxz: EulerConvention = "YXZ".parse().unwrap();
        let applied = vec![rot(1.0, Vector3::Y), rot(2.0, Vector3::X), rot(3.0, Vector3::Z)];
        assert_eq!(nesting_order(yxz, applied.clone()), applied);
    }
}
