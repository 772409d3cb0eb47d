//! Hex-grid drawing stencil generator.
//!
//! Lays out a lattice of flat-top hexagons over a rectangular plate, cuts a
//! dash-shaped slot along every hex edge and a Y-shaped slot around every
//! hex vertex, and serializes the result as STL for printing or machining.
//!
//! With the `csg` feature (on by default) the mesh is a single watertight
//! solid: the plate is extruded and the slot prisms are subtracted with BSP
//! booleans. Without it, a lattice-only fallback emits one independent
//! prism per slot, which previews the cut pattern but is not a manifold
//! plate.
//!
//! ```
//! use hexstencil::{BackendRequest, Stencil, StencilConfig};
//!
//! let config = StencilConfig {
//!     width: 42.0,
//!     height: 38.0,
//!     border: 5.0,
//!     ..StencilConfig::default()
//! };
//! let stencil = Stencil::build(config, BackendRequest::Auto)?;
//! let stl = stencil.to_stl_ascii("hex_stencil");
//! assert!(stl.starts_with("solid hex_stencil"));
//! # Ok::<(), hexstencil::StencilError>(())
//! ```
//!
//! # Features
//! - **f64**: use f64 as Real (default)
//! - **f32**: use f32 as Real, conflicts with f64
//! - **csg**: the boolean solid backend (default)

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod backend;
pub mod config;
pub mod errors;
pub mod float_types;
pub mod io;
#[cfg(feature = "csg")]
pub mod kernel;
pub mod lattice;
pub mod slots;
pub mod stencil;
pub mod triangulated;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use backend::{BackendKind, BackendRequest};
pub use config::StencilConfig;
pub use errors::{ConfigError, Result, StencilError};
pub use io::StlFormat;
pub use stencil::Stencil;
pub use triangulated::{MeshVertex, Triangulated3D};
