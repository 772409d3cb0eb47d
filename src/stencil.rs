//! End-to-end stencil construction.

use std::path::Path;

use tracing::info;

use crate::backend::{self, BackendKind, BackendRequest, StencilMesh};
use crate::config::StencilConfig;
use crate::errors::{ConfigError, Result};
use crate::io::{StlFormat, to_stl_ascii, to_stl_binary, write_stl_file};
use crate::lattice::HexLattice;
use crate::slots;
use crate::triangulated::Triangulated3D;

/// A generated stencil: the configuration it came from, the backend that
/// built it and the finished mesh.
#[derive(Debug, Clone)]
pub struct Stencil {
    config: StencilConfig,
    backend: BackendKind,
    hex_count: usize,
    slot_count: usize,
    mesh: StencilMesh,
}

impl Stencil {
    /// Validates the configuration, lays out the hex lattice and its slot
    /// cuts, resolves the backend and builds the mesh.
    pub fn build(config: StencilConfig, request: BackendRequest) -> Result<Stencil> {
        config.validate()?;

        let lattice = HexLattice::generate(&config);
        if lattice.is_empty() {
            return Err(ConfigError::EmptyLattice.into());
        }
        let shapes = slots::slot_shapes(&lattice, &config);
        let backend = backend::select(request)?;
        info!(
            backend = %backend,
            hexes = lattice.hex_count(),
            slots = shapes.len(),
            "building stencil mesh"
        );
        let mesh = backend::build_mesh(&config, &shapes, backend)?;

        Ok(Stencil {
            config,
            backend,
            hex_count: lattice.hex_count(),
            slot_count: shapes.len(),
            mesh,
        })
    }

    pub const fn config(&self) -> &StencilConfig {
        &self.config
    }

    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    pub const fn hex_count(&self) -> usize {
        self.hex_count
    }

    pub const fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub const fn mesh(&self) -> &StencilMesh {
        &self.mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn to_stl_ascii(&self, name: &str) -> String {
        to_stl_ascii(&self.mesh, name)
    }

    pub fn to_stl_binary(&self) -> Result<Vec<u8>> {
        Ok(to_stl_binary(&self.mesh)?)
    }

    /// Writes the mesh to `path`, replacing any existing file, and logs
    /// which backend produced it.
    pub fn write_stl(&self, path: &Path, format: StlFormat, name: &str) -> Result<()> {
        write_stl_file(&self.mesh, path, format, name)?;
        info!(
            path = %path.display(),
            backend = %self.backend,
            triangles = self.triangle_count(),
            "wrote stencil STL"
        );
        Ok(())
    }
}
