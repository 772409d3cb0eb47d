//! Stencil plate configuration.

use crate::errors::ConfigError;
use crate::float_types::{INCH, Real};

/// Immutable description of one stencil plate. All lengths are millimeters.
///
/// The configuration is a pure value: every pipeline stage takes it by
/// reference and no stage mutates it. Defaults describe a 170 mm square
/// plate carrying a one-inch hex grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilConfig {
    /// Plate extent along X.
    pub width: Real,
    /// Plate extent along Y.
    pub height: Real,
    /// Plate extent along Z; slots cut through the full thickness.
    pub thickness: Real,
    /// Hex cell pitch, measured flat side to opposite flat side.
    pub hex_flat_to_flat: Real,
    /// Width of every dash and Y-arm cut.
    pub slot_width: Real,
    /// Clearance kept between a hex vertex and the near end of each Y arm,
    /// and between an arm tip and the dash beyond it.
    pub edge_gap_from_vertex: Real,
    /// Length of each Y arm, measured from its gapped start.
    pub vertex_arm_length: Real,
    /// Margin between the plate rim and the hex lattice.
    pub border: Real,
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            width: 170.0,
            height: 170.0,
            thickness: 1.6,
            hex_flat_to_flat: INCH,
            slot_width: 0.75,
            edge_gap_from_vertex: 2.2,
            vertex_arm_length: 2.4,
            border: 6.0,
        }
    }
}

impl StencilConfig {
    /// Lattice area width: plate width minus the border on both sides.
    pub const fn usable_width(&self) -> Real {
        self.width - 2.0 * self.border
    }

    /// Lattice area height: plate height minus the border on both sides.
    pub const fn usable_height(&self) -> Real {
        self.height - 2.0 * self.border
    }

    /// Hex side length (also the corner radius) for a flat-top hex of this
    /// pitch: `hex_flat_to_flat / sqrt(3)`.
    pub fn hex_side(&self) -> Real {
        self.hex_flat_to_flat / (3.0 as Real).sqrt()
    }

    /// Reject configurations before any geometry is generated.
    ///
    /// Checks that every length is finite and positive and that at least
    /// one whole flat-top hex (2·side wide, one pitch tall) fits in the
    /// usable rectangle. Degenerate slot proportions (arms long enough to
    /// collide with the dash or each other) are a documented precondition
    /// checked later by the solid backend, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("width", self.width),
            ("height", self.height),
            ("thickness", self.thickness),
            ("hex_flat_to_flat", self.hex_flat_to_flat),
            ("slot_width", self.slot_width),
            ("edge_gap_from_vertex", self.edge_gap_from_vertex),
            ("vertex_arm_length", self.vertex_arm_length),
            ("border", self.border),
        ];
        for (parameter, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveLength { parameter, value });
            }
        }

        let hex_width = 2.0 * self.hex_side();
        let hex_height = self.hex_flat_to_flat;
        if self.usable_width() < hex_width || self.usable_height() < hex_height {
            return Err(ConfigError::HexTooLarge {
                hex_flat_to_flat: self.hex_flat_to_flat,
                usable_width: self.usable_width(),
                usable_height: self.usable_height(),
            });
        }
        Ok(())
    }
}
