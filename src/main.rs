use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use hexstencil::{BackendRequest, Stencil, StencilConfig, StlFormat};
use hexstencil::float_types::Real;

/// Generates a hex-grid drawing stencil and writes it as STL.
///
/// All lengths are millimeters.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Plate width.
    #[arg(long, default_value_t = StencilConfig::default().width)]
    width: Real,

    /// Plate height.
    #[arg(long, default_value_t = StencilConfig::default().height)]
    height: Real,

    /// Plate thickness.
    #[arg(long, default_value_t = StencilConfig::default().thickness)]
    thickness: Real,

    /// Hexagon size, measured across the flats.
    #[arg(long, default_value_t = StencilConfig::default().hex_flat_to_flat)]
    hex_flat_to_flat: Real,

    /// Width of every cut slot.
    #[arg(long, default_value_t = StencilConfig::default().slot_width)]
    slot_width: Real,

    /// Clearance between a hex vertex and the start of each Y arm.
    #[arg(long, default_value_t = StencilConfig::default().edge_gap_from_vertex)]
    edge_gap_from_vertex: Real,

    /// Length of each Y arm.
    #[arg(long, default_value_t = StencilConfig::default().vertex_arm_length)]
    vertex_arm_length: Real,

    /// Hex-free margin inside the plate edge.
    #[arg(long, default_value_t = StencilConfig::default().border)]
    border: Real,

    /// Output STL path.
    #[arg(long, short, default_value = "hex_stencil.stl")]
    output: PathBuf,

    /// Mesh backend to use.
    #[arg(long, value_enum, default_value_t = BackendArg::Auto)]
    backend: BackendArg,

    /// Write ASCII STL instead of binary.
    #[arg(long)]
    ascii: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// Solid when available, lattice otherwise.
    Auto,
    /// Watertight boolean solid; errors out if the kernel is not compiled in.
    Solid,
    /// Independent slot prisms, no booleans.
    Lattice,
}

impl From<BackendArg> for BackendRequest {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => BackendRequest::Auto,
            BackendArg::Solid => BackendRequest::Solid,
            BackendArg::Lattice => BackendRequest::Lattice,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = StencilConfig {
        width: args.width,
        height: args.height,
        thickness: args.thickness,
        hex_flat_to_flat: args.hex_flat_to_flat,
        slot_width: args.slot_width,
        edge_gap_from_vertex: args.edge_gap_from_vertex,
        vertex_arm_length: args.vertex_arm_length,
        border: args.border,
    };

    let stencil =
        Stencil::build(config, args.backend.into()).context("failed to build stencil")?;

    let format = if args.ascii {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    };
    let name = args
        .output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("hex_stencil")
        .to_owned();
    stencil
        .write_stl(&args.output, format, &name)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}
