//! Panelgeom: orientation of rectangular detector panels
//!
//! Given the four surveyed corners of a flat rectangular detector panel, this
//! crate validates that they form a rectangle and derives the panel center,
//! its orientation matrix and the Euler rotations that instrument definition
//! files use to place the panel.
//!
//! ```rust
//! use panelgeom::{EulerConvention, RectangleCorners};
//!
//! let panel = RectangleCorners::new(
//!     [0.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [1.0, 1.0, 0.0],
//!     [1.0, 0.0, 0.0],
//! )
//! .unwrap();
//! let location = panel.location(EulerConvention::ZYZ).unwrap();
//! println!("{}", location.to_xml());
//! ```

pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod idf;
pub mod location;
pub mod panel;
pub mod rotation;

// Re-export commonly used types
pub use coordinates::{Angle, AngleUnit, Vector3};
pub use errors::{GeometryError, Result};
pub use location::{make_location, Location, NestedRotation};
pub use panel::{RectangleCorners, Tolerances};
pub use rotation::{
    calc_euler, check_rotation, generate_rotation, get_euler, get_yzy, get_zyz, EulerConvention,
    GoniometerAngles, Rotation,
};
