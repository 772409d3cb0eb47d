//! Boolean solid kernel: BSP trees over planar polygons.
//!
//! The contract is small: build a solid by extruding a 2D profile, combine
//! solids with union/difference, read the boundary back as polygons.

pub mod bsp;
pub mod plane;
pub mod polygon;
pub mod solid;

pub use plane::Plane;
pub use polygon::Polygon;
pub use solid::Solid;
