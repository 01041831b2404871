//! Edge shape resolution across the puzzle grid
//!
//! Every interior edge receives exactly one random binary choice which both
//! adjacent pieces observe with opposite sign. Only the bottom and right
//! choices of each cell are stored; top and left are derived by lookup.

use ndarray::Array2;
use rand::Rng;
use serde::Serialize;

use crate::io::error::{Result, invalid_parameter};

/// Shape of one side of a puzzle piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeShape {
    /// Straight border edge
    Flat,
    /// Tab protruding outward into the neighbour's territory
    Convex,
    /// Blank cut inward from the nominal boundary
    Concave,
}

impl EdgeShape {
    /// Numeric shape code: `0` flat, `1` convex, `-1` concave
    pub const fn code(self) -> i8 {
        match self {
            Self::Flat => 0,
            Self::Convex => 1,
            Self::Concave => -1,
        }
    }

    /// Shape seen from the other side of the same edge
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Flat => Self::Flat,
            Self::Convex => Self::Concave,
            Self::Concave => Self::Convex,
        }
    }

    /// Whether the edge carries a tab or a blank
    pub const fn is_flat(self) -> bool {
        matches!(self, Self::Flat)
    }

    /// Pick `Convex` or `Concave` with equal probability
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random::<bool>() {
            Self::Convex
        } else {
            Self::Concave
        }
    }
}

impl std::ops::Neg for EdgeShape {
    type Output = Self;

    fn neg(self) -> Self {
        self.inverse()
    }
}

/// The four sides of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Upper edge
    Top,
    /// Left edge
    Left,
    /// Lower edge
    Bottom,
    /// Right edge
    Right,
}

impl Side {
    /// All sides in mask application order
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Bottom, Self::Right];

    /// Whether the side runs horizontally (top or bottom)
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Edge shapes of a single piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceEdges {
    /// Upper edge
    pub top: EdgeShape,
    /// Left edge
    pub left: EdgeShape,
    /// Lower edge
    pub bottom: EdgeShape,
    /// Right edge
    pub right: EdgeShape,
}

impl PieceEdges {
    /// All four edges flat
    pub const FLAT: Self = Self {
        top: EdgeShape::Flat,
        left: EdgeShape::Flat,
        bottom: EdgeShape::Flat,
        right: EdgeShape::Flat,
    };

    /// Shape of the given side
    pub const fn get(&self, side: Side) -> EdgeShape {
        match side {
            Side::Top => self.top,
            Side::Left => self.left,
            Side::Bottom => self.bottom,
            Side::Right => self.right,
        }
    }
}

/// Resolved edge choices for a `cols × rows` grid
///
/// Arrays are indexed `[row, col]`.
#[derive(Debug, Clone)]
pub struct EdgeGrid {
    bottom: Array2<EdgeShape>,
    right: Array2<EdgeShape>,
    cols: usize,
    rows: usize,
}

impl EdgeGrid {
    /// Resolve every edge in one top-left to bottom-right sweep
    ///
    /// Each cell decides its bottom edge, then its right edge. Border edges
    /// stay flat and consume no randomness.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn resolve<R: Rng>(cols: usize, rows: usize, rng: &mut R) -> Result<Self> {
        if cols == 0 {
            return Err(invalid_parameter("cols", &cols, &"grid needs at least one column"));
        }
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"grid needs at least one row"));
        }

        let mut bottom = Array2::from_elem((rows, cols), EdgeShape::Flat);
        let mut right = Array2::from_elem((rows, cols), EdgeShape::Flat);

        for y in 0..rows {
            for x in 0..cols {
                if y + 1 < rows
                    && let Some(shape) = bottom.get_mut([y, x])
                {
                    *shape = EdgeShape::random(rng);
                }
                if x + 1 < cols
                    && let Some(shape) = right.get_mut([y, x])
                {
                    *shape = EdgeShape::random(rng);
                }
            }
        }

        Ok(Self {
            bottom,
            right,
            cols,
            rows,
        })
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Edge shapes of cell `(x, y)`, or `None` outside the grid
    pub fn edges(&self, x: usize, y: usize) -> Option<PieceEdges> {
        if x >= self.cols || y >= self.rows {
            return None;
        }

        let top = match y.checked_sub(1) {
            Some(above) => -*self.bottom.get([above, x])?,
            None => EdgeShape::Flat,
        };
        let left = match x.checked_sub(1) {
            Some(before) => -*self.right.get([y, before])?,
            None => EdgeShape::Flat,
        };

        Some(PieceEdges {
            top,
            left,
            bottom: *self.bottom.get([y, x])?,
            right: *self.right.get([y, x])?,
        })
    }

    /// Iterate all cells row-major as `(x, y, edges)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, PieceEdges)> + '_ {
        (0..self.rows).flat_map(move |y| {
            (0..self.cols).filter_map(move |x| self.edges(x, y).map(|edges| (x, y, edges)))
        })
    }
}
