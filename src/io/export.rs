//! PNG export of piece textures with a JSON placement manifest

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assembly::generator::Puzzle;
use crate::assembly::placement::{Anchoring, ShadowRecord};
use crate::io::configuration::{AssemblySettings, MANIFEST_FILE_NAME};
use crate::io::error::{PuzzleError, Result};
use crate::shape::PieceEdges;

/// Placement data of one exported piece
#[derive(Debug, Clone, Serialize)]
pub struct PieceManifest<'a> {
    /// Entity name
    pub name: &'a str,
    /// Texture file name relative to the manifest
    pub file: String,
    /// Grid column
    pub x: usize,
    /// Grid row
    pub y: usize,
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
    /// Normalized pivot, y up
    pub pivot: [f32; 2],
    /// Scene position
    pub position: [f32; 3],
    /// Edge shapes
    pub edges: PieceEdges,
    /// Optional drop shadow
    pub shadow: Option<&'a ShadowRecord>,
}

/// Everything the assembly controller needs besides the textures
#[derive(Debug, Clone, Serialize)]
pub struct PuzzleManifest<'a> {
    /// Puzzle name
    pub name: &'a str,
    /// Grid columns
    pub cols: usize,
    /// Grid rows
    pub rows: usize,
    /// Piece base size
    pub element_base_size: u32,
    /// Texture pixels per scene unit
    pub pixels_per_unit: u32,
    /// Where the puzzle origin sits
    pub anchoring: Anchoring,
    /// Source image size
    pub source_size: (u32, u32),
    /// Settings for the assembly controller
    pub assembly: &'a AssemblySettings,
    /// Pieces in row-major order
    pub pieces: Vec<PieceManifest<'a>>,
}

impl<'a> PuzzleManifest<'a> {
    /// Manifest describing `puzzle`
    pub fn new(puzzle: &'a Puzzle) -> Self {
        let pieces = puzzle
            .pieces
            .iter()
            .map(|piece| PieceManifest {
                name: &piece.name,
                file: texture_file_name(&piece.name),
                x: piece.x,
                y: piece.y,
                width: piece.texture.width(),
                height: piece.texture.height(),
                pivot: piece.pivot,
                position: piece.position,
                edges: piece.edges,
                shadow: piece.shadow.as_ref(),
            })
            .collect();

        Self {
            name: &puzzle.name,
            cols: puzzle.cols,
            rows: puzzle.rows,
            element_base_size: puzzle.element_base_size,
            pixels_per_unit: puzzle.pixels_per_unit,
            anchoring: puzzle.anchoring,
            source_size: puzzle.source_size,
            assembly: &puzzle.assembly,
            pieces,
        }
    }
}

/// File name of a piece texture
pub fn texture_file_name(piece_name: &str) -> String {
    format!("{piece_name}.png")
}

/// Write every piece texture and the manifest under `output_dir/<puzzle name>`
///
/// Returns the directory the puzzle was written to.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, a texture cannot be
/// saved, or the manifest cannot be serialized or written
pub fn export_puzzle(puzzle: &Puzzle, output_dir: &Path) -> Result<PathBuf> {
    let puzzle_dir = output_dir.join(&puzzle.name);
    std::fs::create_dir_all(&puzzle_dir).map_err(|source| PuzzleError::FileSystem {
        path: puzzle_dir.clone(),
        operation: "create directory",
        source,
    })?;

    for piece in &puzzle.pieces {
        let path = puzzle_dir.join(texture_file_name(&piece.name));
        piece
            .texture
            .save(&path)
            .map_err(|source| PuzzleError::ImageExport { path, source })?;
    }

    let manifest_path = puzzle_dir.join(MANIFEST_FILE_NAME);
    let manifest = serde_json::to_string_pretty(&PuzzleManifest::new(puzzle)).map_err(|source| {
        PuzzleError::Serialization {
            path: manifest_path.clone(),
            source,
        }
    })?;
    std::fs::write(&manifest_path, manifest).map_err(|source| PuzzleError::FileSystem {
        path: manifest_path,
        operation: "write manifest",
        source,
    })?;

    Ok(puzzle_dir)
}
