pub mod angle;
pub mod vector;

pub use angle::{Angle, AngleUnit};
pub use vector::{cross, dot, length, normalize, to_vector3, IntoVector3, Vector3};
