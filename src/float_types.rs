// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Tolerance for plane classification inside the boolean kernel.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Tolerance for plane classification inside the boolean kernel.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-5;

/// Coordinate quantization step for geometric identity, in millimeters.
///
/// Vertex/edge deduplication, T-junction healing and the watertightness
/// check all key on coordinates rounded to this step. Two features closer
/// than this are the same feature; two further apart are distinct. Looser
/// merges distinct geometry, tighter duplicates shared geometry and breaks
/// boolean subtraction.
pub const SNAP_EPSILON: Real = 1e-4;

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Unit conversion
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
pub const MM: Real = 1.0;
pub const CM: Real = 10.0;
pub const INCH: Real = 25.4;
