//! Procedural jigsaw puzzle generation from raster images
//!
//! A source image is cut into a grid of interlocking pieces. Every interior
//! edge carries a tab on one side and a matching blank on the other, shaped
//! by a small stencil image, and the resulting pieces are positioned in a
//! 2D scene for an assembly controller to consume.

#![forbid(unsafe_code)]

/// Grid assembly, scene placement and generation entry points
pub mod assembly;
/// Input/output operations, configuration and error handling
pub mod io;
/// Pixel extraction, masking and rescaling
pub mod raster;
/// Edge shapes, stencils and mask geometry
pub mod shape;

pub use assembly::{Puzzle, PuzzleGenerator};
pub use io::configuration::GeneratorConfig;
pub use io::error::{PuzzleError, Result};
