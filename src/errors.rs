//! Error types for panel geometry
//!
//! Every variant describes bad input data. Nothing here is retried or
//! corrected; the error propagates to the caller unchanged.

use thiserror::Error;

/// Main error type for the panelgeom crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A vector-like input does not have exactly three components
    #[error("Expected 3 components, got {actual}")]
    SizeMismatch {
        /// Number of components that were supplied
        actual: usize,
    },

    /// Normalization of a vector with no usable direction
    #[error("Cannot normalize vector ({x}, {y}, {z}): length {length} is below tolerance {tolerance}")]
    DegenerateVector {
        x: f64,
        y: f64,
        z: f64,
        length: f64,
        tolerance: f64,
    },

    /// NaN or infinite input where a real number is required
    #[error("{quantity} = {value} is not finite")]
    NonFinite { quantity: String, value: f64 },

    /// The diagonal from the first corner is shorter than one of its edges
    #[error("Incorrect point order: {comparison} ({edge} > diagonal {diagonal})")]
    InvalidCornerOrder {
        /// Which edge was compared against the diagonal
        comparison: String,
        /// Squared edge length
        edge: f64,
        /// Squared diagonal length
        diagonal: f64,
    },

    /// Opposite sides differ in length or are not antiparallel
    #[error("Not a parallelogram: {quantity} = {value} exceeds tolerance {tolerance}")]
    NotAParallelogram {
        quantity: String,
        value: f64,
        tolerance: f64,
    },

    /// Adjacent sides are not perpendicular
    #[error("Not a rectangle: dot(left, bottom) = {dot} exceeds tolerance {tolerance}")]
    NotARectangle { dot: f64, tolerance: f64 },

    /// Two direction vectors could not be turned into an orthonormal basis
    #[error("Basis is not orthogonal: {0}")]
    NonOrthogonalBasis(String),

    /// Matrix is not a proper rotation
    #[error("Invalid rotation matrix: {0}")]
    InvalidRotationMatrix(String),

    /// Euler sequence outside the supported axis combinations
    #[error("Unsupported Euler convention: {0:?}")]
    UnsupportedConvention(String),

    /// Malformed textual input (corner files, command line values)
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for panel geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;
