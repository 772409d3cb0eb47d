//! Error types for stencil generation.

use crate::float_types::Real;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StencilError>;

/// Rejected configurations, detected before any geometry is generated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A length parameter is zero, negative, or not finite.
    #[error("{parameter} must be a positive length in mm, got {value}")]
    NonPositiveLength { parameter: &'static str, value: Real },

    /// The hex pitch is too large for even one whole hex to fit inside the border.
    #[error(
        "hex_flat_to_flat {hex_flat_to_flat} mm does not fit the usable \
         {usable_width} x {usable_height} mm area inside the border"
    )]
    HexTooLarge {
        hex_flat_to_flat: Real,
        usable_width: Real,
        usable_height: Real,
    },

    /// Lattice generation kept zero whole hexes.
    #[error("no complete hex fits the usable plate area")]
    EmptyLattice,
}

/// Anything that can go wrong between a [`StencilConfig`](crate::StencilConfig)
/// and a finished STL file.
///
/// The fallback backend's globally non-manifold output is a documented
/// limitation, not an error; nothing here is ever swallowed or retried.
#[derive(Debug, Error)]
pub enum StencilError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two slot cuts overlap, so boolean subtraction would receive
    /// self-intersecting input. Reported before the kernel runs, naming
    /// both offending slots.
    #[error("degenerate slot geometry: {first} overlaps {second}")]
    GeometryDegeneracy { first: String, second: String },

    /// The subtraction result failed the watertightness check. Fatal;
    /// retrying the same boolean on the same input cannot succeed.
    #[error("boolean subtraction produced an open mesh: {context}")]
    BooleanFailure { context: String },

    /// The solid backend was explicitly requested on a build without the
    /// `csg` kernel capability.
    #[error("backend '{requested}' requires the csg feature, which this build lacks")]
    BackendUnavailable { requested: &'static str },

    /// Writing the output file failed. Surfaced as-is, not retried.
    #[error("writing STL failed: {0}")]
    Serialization(#[from] std::io::Error),
}
