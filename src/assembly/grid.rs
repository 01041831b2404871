//! Row-major puzzle grid built in a single sweep

use image::RgbaImage;
use ndarray::Array2;
use rand::Rng;

use crate::io::error::{Result, generation_error};
use crate::raster::extract::{CellLayout, ExtractedPiece, extract_piece};
use crate::shape::{EdgeGrid, MaskGeometry, PieceEdges, Stencil};

/// Fully processed grid cell
#[derive(Debug, Clone)]
pub struct PuzzleElement {
    /// Grid column
    pub x: usize,
    /// Grid row
    pub y: usize,
    /// Piece-space mask geometry
    pub geometry: MaskGeometry,
    /// Masked texture and pivot
    pub piece: ExtractedPiece,
}

impl PuzzleElement {
    /// Edge shapes of this cell
    pub const fn edges(&self) -> PieceEdges {
        self.geometry.edges
    }
}

/// Every element of one generation run, indexed `[row, col]`
#[derive(Debug, Clone)]
pub struct PuzzleGrid {
    elements: Array2<PuzzleElement>,
    layout: CellLayout,
}

impl PuzzleGrid {
    /// Resolve edges, compute geometry and cut every piece
    ///
    /// Cells are processed row-major; `on_piece` receives the number of
    /// finished pieces and the total after each one. The first failing cell
    /// aborts the sweep and no grid is returned.
    ///
    /// # Errors
    ///
    /// Returns an error naming the failing cell if geometry computation or
    /// extraction fails, or if the layout is degenerate
    pub fn generate<R: Rng>(
        source: &RgbaImage,
        stencil: &Stencil,
        cols: usize,
        rows: usize,
        base_size: u32,
        rng: &mut R,
        on_piece: &mut dyn FnMut(usize, usize),
    ) -> Result<Self> {
        let layout = CellLayout::new(cols, rows, base_size, source.width(), source.height())?;
        let edge_grid = EdgeGrid::resolve(cols, rows, rng)?;
        let total = cols * rows;

        let mut elements = Vec::with_capacity(total);
        for (x, y, edges) in edge_grid.iter() {
            let geometry = MaskGeometry::compute(edges, base_size, stencil)
                .map_err(|error| error.at_cell(x, y))?;
            let piece = extract_piece(source, &layout, x, y, &geometry, stencil)
                .map_err(|error| error.at_cell(x, y))?;
            elements.push(PuzzleElement {
                x,
                y,
                geometry,
                piece,
            });
            on_piece(elements.len(), total);
        }

        let elements = Array2::from_shape_vec((rows, cols), elements)
            .map_err(|error| generation_error(&error))?;

        Ok(Self { elements, layout })
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.elements.ncols()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.elements.nrows()
    }

    /// Pixel layout the grid was cut with
    pub const fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// Element at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<&PuzzleElement> {
        self.elements.get([y, x])
    }

    /// Iterate elements row-major
    pub fn iter(&self) -> impl Iterator<Item = &PuzzleElement> {
        self.elements.iter()
    }

    /// Consume the grid, yielding owned elements row-major
    pub fn into_elements(self) -> impl Iterator<Item = PuzzleElement> {
        // Built by from_shape_vec, so storage is already row-major
        let (elements, _) = self.elements.into_raw_vec_and_offset();
        elements.into_iter()
    }
}
