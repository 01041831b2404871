//! Puzzle generation entry points
//!
//! Generation is all-or-nothing: a failing cell abandons the whole attempt
//! and the caller never sees a partially built piece set.

use image::RgbaImage;
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::assembly::grid::{PuzzleElement, PuzzleGrid};
use crate::assembly::placement::{Anchoring, PieceEntity, SceneLayout, ShadowRecord};
use crate::io::acquisition;
use crate::io::configuration::{
    AssemblySettings, DEFAULT_STENCIL_DEPTH, DEFAULT_STENCIL_WIDTH, GeneratorConfig,
    PUZZLE_NAME_PREFIX,
};
use crate::io::error::{PuzzleError, Result};
use crate::io::preferences::{PreferenceStore, remember_grid_size};
use crate::raster::scale::scale_source;
use crate::shape::Stencil;
use crate::shape::stencil::knob_image;

/// Generated piece set handed to the assembly controller
#[derive(Debug, Clone)]
pub struct Puzzle {
    /// `Puzzle_<image-name>_<cols>x<rows>`
    pub name: String,
    /// Grid columns after clamping
    pub cols: usize,
    /// Grid rows after clamping
    pub rows: usize,
    /// Piece base size after clamping
    pub element_base_size: u32,
    /// Texture pixels per scene unit after clamping
    pub pixels_per_unit: u32,
    /// Where the puzzle origin sits
    pub anchoring: Anchoring,
    /// Size of the (rescaled) source image
    pub source_size: (u32, u32),
    /// Pieces in row-major order
    pub pieces: Vec<PieceEntity>,
    /// Settings forwarded to the assembly controller
    pub assembly: AssemblySettings,
}

impl Puzzle {
    /// Name of a puzzle cut from `image_name` into a `cols × rows` grid
    pub fn puzzle_name(image_name: &str, cols: usize, rows: usize) -> String {
        format!("{PUZZLE_NAME_PREFIX}{image_name}_{cols}x{rows}")
    }

    /// Piece at `(x, y)`, or `None` outside the grid
    pub fn piece(&self, x: usize, y: usize) -> Option<&PieceEntity> {
        if x >= self.cols {
            return None;
        }
        self.pieces.get(y * self.cols + x)
    }

    /// Mapping from source pixels to scene positions for this puzzle
    pub fn scene_layout(&self) -> SceneLayout {
        let (width, height) = self.source_size;
        SceneLayout::new(self.anchoring, width, height, self.pixels_per_unit)
    }
}

/// Cuts source images into interlocking pieces
pub struct PuzzleGenerator {
    config: GeneratorConfig,
    stencil_image: RgbaImage,
    image: RgbaImage,
    preferences: Option<Box<dyn PreferenceStore>>,
}

impl PuzzleGenerator {
    /// Create a generator cutting tabs with the given stencil image
    pub fn new(config: GeneratorConfig, stencil_image: RgbaImage) -> Self {
        Self {
            config,
            stencil_image,
            image: placeholder_image(),
            preferences: None,
        }
    }

    /// Create a generator using the procedural knob stencil
    pub fn with_default_stencil(config: GeneratorConfig) -> Self {
        Self::new(
            config,
            knob_image(DEFAULT_STENCIL_WIDTH, DEFAULT_STENCIL_DEPTH),
        )
    }

    /// Persist grid sizes of successful generations to `store`
    #[must_use]
    pub fn with_preferences(mut self, store: Box<dyn PreferenceStore>) -> Self {
        self.preferences = Some(store);
        self
    }

    /// Current configuration, clamped after the first generation
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Mutable access to the configuration for the next generation
    pub const fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    /// Source image used by the last generation, or a 1×1 placeholder
    pub const fn source_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Preference store receiving grid sizes, if any
    pub fn preferences(&self) -> Option<&dyn PreferenceStore> {
        self.preferences.as_deref()
    }

    /// Cut an in-memory image into a puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if the stencil or image is unusable, or a
    /// generation error if any piece cannot be produced
    pub fn create_puzzle_from_image(&mut self, image: RgbaImage, image_name: &str) -> Result<Puzzle> {
        self.create_puzzle_with_progress(image, image_name, &mut |_, _| {})
    }

    /// Cut an in-memory image into a puzzle, reporting each finished piece
    ///
    /// # Errors
    ///
    /// Returns an error if the stencil or image is unusable, or a
    /// generation error if any piece cannot be produced
    pub fn create_puzzle_with_progress(
        &mut self,
        image: RgbaImage,
        image_name: &str,
        on_piece: &mut dyn FnMut(usize, usize),
    ) -> Result<Puzzle> {
        let stencil = Stencil::from_rgba(&self.stencil_image)?;
        let config = self.config.clamped(stencil.width())?;
        self.config = config.clone();
        self.image = scale_source(image, config.image_scale)?;

        let name = Puzzle::puzzle_name(image_name, config.cols, config.rows);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        debug!(
            "Generating '{name}' from {}x{} image, base size {}, stencil {}x{}",
            self.image.width(),
            self.image.height(),
            config.element_base_size,
            stencil.width(),
            stencil.depth()
        );

        let grid = PuzzleGrid::generate(
            &self.image,
            &stencil,
            config.cols,
            config.rows,
            config.element_base_size,
            &mut rng,
            on_piece,
        )
        .map_err(|error| {
            let error = into_generation_failure(error);
            warn!("Generation of '{name}' abandoned: {error}");
            error
        })?;

        let puzzle = build_puzzle(name, &config, grid, self.image.dimensions());
        self.remember_grid_size(&puzzle);

        info!(
            "Generated '{}' with {} pieces",
            puzzle.name,
            puzzle.pieces.len()
        );
        Ok(puzzle)
    }

    /// Fetch an image from a `http(s)://` or `file://` location and cut it
    ///
    /// The source image accessor returns a 1×1 placeholder until the fetch
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an acquisition error if the image cannot be fetched or
    /// decoded, otherwise the same errors as `create_puzzle_from_image`
    pub async fn create_from_external_image(&mut self, location: &str) -> Result<Puzzle> {
        self.image = placeholder_image();

        let acquired = acquisition::acquire(location).await.map_err(|error| {
            warn!("{error}");
            error
        })?;

        self.create_puzzle_from_image(acquired.image, &acquired.name)
    }

    fn remember_grid_size(&mut self, puzzle: &Puzzle) {
        if let Some(store) = self.preferences.as_deref_mut()
            && let Err(error) = remember_grid_size(store, &puzzle.name, puzzle.cols, puzzle.rows)
        {
            warn!("Could not persist grid size of '{}': {error}", puzzle.name);
        }
    }
}

fn placeholder_image() -> RgbaImage {
    RgbaImage::new(1, 1)
}

fn into_generation_failure(error: PuzzleError) -> PuzzleError {
    if error.is_generation() {
        error
    } else {
        PuzzleError::Generation {
            cell: None,
            reason: error.to_string(),
        }
    }
}

fn build_puzzle(
    name: String,
    config: &GeneratorConfig,
    grid: PuzzleGrid,
    source_size: (u32, u32),
) -> Puzzle {
    let scene = SceneLayout::new(
        config.anchoring,
        source_size.0,
        source_size.1,
        config.pixels_per_unit,
    );
    let (cols, rows) = (grid.cols(), grid.rows());

    let pieces = grid
        .into_elements()
        .map(|PuzzleElement { x, y, geometry, piece }| {
            let piece_name = PieceEntity::piece_name(x, y);
            let shadow = ShadowRecord::for_piece(&piece_name, &config.shadow);
            PieceEntity {
                name: piece_name,
                x,
                y,
                edges: geometry.edges,
                texture: piece.texture,
                source_rect: piece.source_rect,
                pivot: piece.pivot,
                position: scene.position(&piece.nominal_rect),
                shadow,
            }
        })
        .collect();

    Puzzle {
        name,
        cols,
        rows,
        element_base_size: config.element_base_size,
        pixels_per_unit: config.pixels_per_unit,
        anchoring: config.anchoring,
        source_size,
        pieces,
        assembly: config.assembly,
    }
}
