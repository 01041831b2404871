//! Grid assembly and scene placement
//!
//! This module contains:
//! - The row-major puzzle grid built in one sweep
//! - Placement of pieces and shadows in scene space
//! - The generation entry points

/// Puzzle generation entry points
pub mod generator;
/// Row-major puzzle grid
pub mod grid;
/// Scene placement of pieces
pub mod placement;

pub use generator::{Puzzle, PuzzleGenerator};
pub use placement::{Anchoring, PieceEntity};
