//! Mesh serialization.

mod stl;

pub use stl::{StlFormat, to_stl_ascii, to_stl_binary, write_stl_file};
