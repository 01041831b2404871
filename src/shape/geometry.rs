//! Piece-space mask geometry
//!
//! A piece occupies a `base_size` square in piece space. Convex edges grow
//! the extraction rectangle outward by the stencil depth; flat and concave
//! edges never do. All coordinates here are relative to the top-left corner
//! of the extraction rectangle.

use crate::io::error::{Result, generation_error};
use crate::shape::edges::{EdgeShape, PieceEdges, Side};
use crate::shape::stencil::{Stencil, TabDirection};

/// How a stencil combines with the piece coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskOperation {
    /// Add a tab outside the nominal boundary
    Union,
    /// Cut a blank inside the nominal boundary
    Subtract,
}

/// One oriented stencil stamped onto the piece mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilPlacement {
    /// Piece side the stencil belongs to
    pub side: Side,
    /// Orientation of the stencil
    pub direction: TabDirection,
    /// Union for tabs, subtraction for blanks
    pub operation: MaskOperation,
    /// Left edge of the stencil in mask coordinates
    pub x: u32,
    /// Top edge of the stencil in mask coordinates
    pub y: u32,
}

/// Extraction rectangle and stencil placements of one piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskGeometry {
    /// Edge shapes the geometry was derived from
    pub edges: PieceEdges,
    /// Nominal piece size
    pub base_size: u32,
    /// Offset of the nominal top-left corner inside the mask
    pub pixel_offset: (u32, u32),
    /// Mask width including protruding tabs
    pub mask_width: u32,
    /// Mask height including protruding tabs
    pub mask_height: u32,
    /// Stencils to stamp, unions first
    pub placements: Vec<StencilPlacement>,
}

impl MaskGeometry {
    /// Compute the mask geometry of a piece
    ///
    /// # Errors
    ///
    /// Returns an error if the stencil does not fit along the piece edge or
    /// protrudes at least a full base size
    pub fn compute(edges: PieceEdges, base_size: u32, stencil: &Stencil) -> Result<Self> {
        let span = stencil.width();
        let depth = stencil.depth();

        if span > base_size {
            return Err(generation_error(&format!(
                "stencil width {span} exceeds base size {base_size}"
            )));
        }
        if depth >= base_size {
            return Err(generation_error(&format!(
                "stencil depth {depth} must be smaller than base size {base_size}"
            )));
        }

        let protrusion = |shape: EdgeShape| if shape == EdgeShape::Convex { depth } else { 0 };
        let extend_top = protrusion(edges.top);
        let extend_left = protrusion(edges.left);
        let extend_bottom = protrusion(edges.bottom);
        let extend_right = protrusion(edges.right);

        let (ox, oy) = (extend_left, extend_top);
        // Tabs sit centred on their edge
        let centered = (base_size - span) / 2;

        let mut placements = Vec::with_capacity(4);
        for side in Side::ALL {
            let shape = edges.get(side);
            if shape.is_flat() {
                continue;
            }
            let convex = shape == EdgeShape::Convex;
            let (direction, x, y) = match side {
                Side::Top if convex => (TabDirection::Up, ox + centered, 0),
                Side::Top => (TabDirection::Down, ox + centered, oy),
                Side::Bottom if convex => (TabDirection::Down, ox + centered, oy + base_size),
                Side::Bottom => (TabDirection::Up, ox + centered, oy + base_size - depth),
                Side::Left if convex => (TabDirection::Left, 0, oy + centered),
                Side::Left => (TabDirection::Right, ox, oy + centered),
                Side::Right if convex => (TabDirection::Right, ox + base_size, oy + centered),
                Side::Right => (TabDirection::Left, ox + base_size - depth, oy + centered),
            };
            placements.push(StencilPlacement {
                side,
                direction,
                operation: if convex {
                    MaskOperation::Union
                } else {
                    MaskOperation::Subtract
                },
                x,
                y,
            });
        }
        placements.sort_by_key(|placement| placement.operation == MaskOperation::Subtract);

        Ok(Self {
            edges,
            base_size,
            pixel_offset: (ox, oy),
            mask_width: base_size + extend_left + extend_right,
            mask_height: base_size + extend_top + extend_bottom,
            placements,
        })
    }

    /// Whether the piece protrudes past its nominal rectangle anywhere
    pub const fn has_tabs(&self) -> bool {
        self.mask_width != self.base_size || self.mask_height != self.base_size
    }
}
