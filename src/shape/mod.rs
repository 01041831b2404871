//! Piece shape computation
//!
//! This module contains shape-related functionality including:
//! - Edge shape resolution across the grid
//! - Tab stencil orientation
//! - Piece-space mask geometry

/// Edge shape resolution with adjacency consistency
pub mod edges;
/// Mask geometry of individual pieces
pub mod geometry;
/// Tab stencil and its oriented variants
pub mod stencil;

pub use edges::{EdgeGrid, EdgeShape, PieceEdges, Side};
pub use geometry::MaskGeometry;
pub use stencil::Stencil;
