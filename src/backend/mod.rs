//! Mesh construction backends and backend selection.
//!
//! The solid backend subtracts the slot cuts from an extruded plate and
//! yields a watertight solid. The lattice backend skips booleans entirely
//! and emits one independent prism per slot rectangle, which previews the
//! cut pattern but is not a manifold plate.
//!
//! Both backends share one coordinate frame: the plate is centered on the
//! XY origin and spans `z = 0` to `z = thickness`, so the part sits on the
//! build plate.

pub mod lattice;
#[cfg(feature = "csg")]
pub mod solid;

use std::fmt;

use crate::config::StencilConfig;
use crate::errors::{Result, StencilError};
use crate::slots::SlotShape;
use crate::triangulated::{MeshVertex, Triangulated3D};

/// What the caller asked for. `Auto` takes the solid backend whenever the
/// kernel is compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendRequest {
    #[default]
    Auto,
    Solid,
    Lattice,
}

/// The backend actually selected for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Solid,
    Lattice,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Solid => f.write_str("solid"),
            BackendKind::Lattice => f.write_str("lattice"),
        }
    }
}

/// Resolves a request against kernel availability.
///
/// Asking for the solid backend in a build without the `csg` feature is an
/// error; `Auto` quietly falls back to the lattice backend instead.
pub fn select(request: BackendRequest) -> Result<BackendKind> {
    let solid_available = cfg!(feature = "csg");
    match request {
        BackendRequest::Auto => Ok(if solid_available {
            BackendKind::Solid
        } else {
            BackendKind::Lattice
        }),
        BackendRequest::Solid if solid_available => Ok(BackendKind::Solid),
        BackendRequest::Solid => Err(StencilError::BackendUnavailable { requested: "solid" }),
        BackendRequest::Lattice => Ok(BackendKind::Lattice),
    }
}

/// A finished stencil mesh from either backend.
#[derive(Debug, Clone)]
pub enum StencilMesh {
    #[cfg(feature = "csg")]
    Solid(crate::kernel::Solid),
    Lattice(lattice::PrismMesh),
}

impl Triangulated3D for StencilMesh {
    fn visit_triangles<F>(&self, visitor: F)
    where
        F: FnMut([MeshVertex; 3]),
    {
        match self {
            #[cfg(feature = "csg")]
            StencilMesh::Solid(solid) => solid.visit_triangles(visitor),
            StencilMesh::Lattice(prisms) => prisms.visit_triangles(visitor),
        }
    }
}

/// Runs the selected backend over the slot layout.
pub fn build_mesh(
    config: &StencilConfig,
    shapes: &[SlotShape],
    kind: BackendKind,
) -> Result<StencilMesh> {
    match kind {
        BackendKind::Solid => {
            #[cfg(feature = "csg")]
            {
                solid::build_solid(config, shapes).map(StencilMesh::Solid)
            }
            #[cfg(not(feature = "csg"))]
            {
                let _ = (config, shapes);
                Err(StencilError::BackendUnavailable { requested: "solid" })
            }
        },
        BackendKind::Lattice => Ok(StencilMesh::Lattice(lattice::build_lattice(config, shapes))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_prefers_the_solid_backend_when_compiled_in() {
        let kind = select(BackendRequest::Auto).unwrap();
        if cfg!(feature = "csg") {
            assert_eq!(kind, BackendKind::Solid);
        } else {
            assert_eq!(kind, BackendKind::Lattice);
        }
    }

    #[test]
    fn lattice_request_always_succeeds() {
        assert_eq!(
            select(BackendRequest::Lattice).unwrap(),
            BackendKind::Lattice
        );
    }

    #[cfg(not(feature = "csg"))]
    #[test]
    fn solid_request_without_kernel_is_rejected() {
        assert!(matches!(
            select(BackendRequest::Solid),
            Err(StencilError::BackendUnavailable { requested: "solid" })
        ));
    }
}
