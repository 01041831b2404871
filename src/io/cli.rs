//! Command-line interface for cutting one image into puzzle pieces

use std::path::{Path, PathBuf};

use clap::Parser;
use image::RgbaImage;
use log::{info, warn};

use crate::assembly::generator::PuzzleGenerator;
use crate::assembly::placement::Anchoring;
use crate::io::acquisition;
use crate::io::configuration::{
    AssemblySettings, DEFAULT_COLS, DEFAULT_ELEMENT_BASE_SIZE, DEFAULT_IMAGE_SCALE,
    DEFAULT_PIXELS_PER_UNIT, DEFAULT_ROWS, DEFAULT_STENCIL_DEPTH, DEFAULT_STENCIL_WIDTH,
    GeneratorConfig, PREFERENCES_FILE_NAME, ShadowSettings,
};
use crate::io::error::{PuzzleError, Result};
use crate::io::export::export_puzzle;
use crate::io::preferences::FilePreferences;
use crate::io::progress::ProgressManager;
use crate::shape::stencil::knob_image;

#[derive(Parser)]
#[command(name = "jigsaw-cut")]
#[command(
    author,
    version,
    about = "Cut an image into interlocking jigsaw puzzle pieces"
)]
/// Command-line arguments for puzzle generation
// Flags mirror independent generator switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Image path, or a file://, http:// or https:// location
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Tab stencil image (alpha channel shapes one upward tab)
    #[arg(long, value_name = "PATH")]
    pub stencil: Option<PathBuf>,

    /// Grid columns (clamped to 2..=35)
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Grid rows (clamped to 2..=35)
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Piece base size in piece-space pixels (clamped to 2..=4 stencil widths)
    #[arg(short, long, default_value_t = DEFAULT_ELEMENT_BASE_SIZE)]
    pub base_size: u32,

    /// Texture pixels per scene unit (clamped to 10..=1024)
    #[arg(short, long, default_value_t = DEFAULT_PIXELS_PER_UNIT)]
    pub pixels_per_unit: u32,

    /// Source image rescale factor (clamped to 0.2..=5.0)
    #[arg(long, default_value_t = DEFAULT_IMAGE_SCALE)]
    pub scale: f32,

    /// Where the puzzle origin sits
    #[arg(short, long, value_enum, default_value_t = Anchoring::TopLeft)]
    pub anchor: Anchoring,

    /// Generate drop shadows behind pieces
    #[arg(long)]
    pub shadows: bool,

    /// Ask the assembly controller to rotate scattered pieces
    #[arg(long)]
    pub randomize_rotation: bool,

    /// Random seed for reproducible edge shapes
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Directory receiving one sub-directory per puzzle
    #[arg(short, long, default_value = "puzzles")]
    pub output: PathBuf,

    /// Preference file recording grid sizes (defaults inside the output directory)
    #[arg(long, value_name = "PATH")]
    pub preferences: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generator configuration described by the arguments
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            cols: self.cols,
            rows: self.rows,
            element_base_size: self.base_size,
            pixels_per_unit: self.pixels_per_unit,
            image_scale: self.scale,
            anchoring: self.anchor,
            shadow: ShadowSettings {
                enabled: self.shadows,
                ..ShadowSettings::default()
            },
            seed: self.seed,
            assembly: AssemblySettings {
                randomize_rotation: self.randomize_rotation,
                ..AssemblySettings::default()
            },
        }
    }

    /// Preference file location
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences
            .clone()
            .unwrap_or_else(|| self.output.join(PREFERENCES_FILE_NAME))
    }
}

/// Runs acquisition, generation and export for the parsed arguments
pub struct PuzzleProcessor {
    cli: Cli,
    progress: ProgressManager,
}

impl PuzzleProcessor {
    /// Create a processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self { cli, progress }
    }

    /// Cut the source image and write the pieces
    ///
    /// Returns the directory the puzzle was written to.
    ///
    /// # Errors
    ///
    /// Returns an error if the stencil or source cannot be loaded, generation
    /// fails, or the output cannot be written
    pub async fn process(&self) -> Result<PathBuf> {
        let stencil = match &self.cli.stencil {
            Some(path) => load_stencil(path)?,
            None => knob_image(DEFAULT_STENCIL_WIDTH, DEFAULT_STENCIL_DEPTH),
        };
        let mut generator = PuzzleGenerator::new(self.cli.generator_config(), stencil);
        // An unreadable store is left untouched rather than overwritten
        let preferences_path = self.cli.preferences_path();
        match FilePreferences::open(&preferences_path) {
            Ok(preferences) => generator = generator.with_preferences(Box::new(preferences)),
            Err(error) => warn!(
                "Ignoring preferences at '{}': {error}",
                preferences_path.display()
            ),
        }

        let acquired = acquisition::acquire(&self.cli.source).await?;

        self.progress.start(&acquired.name);
        let progress = &self.progress;
        let puzzle = generator
            .create_puzzle_with_progress(acquired.image, &acquired.name, &mut |done, total| {
                progress.update(done, total);
            })
            .inspect_err(|_| progress.abandon())?;

        let puzzle_dir = export_puzzle(&puzzle, &self.cli.output)?;
        self.progress.finish(&puzzle.name);

        info!(
            "Wrote {} pieces to '{}'",
            puzzle.pieces.len(),
            puzzle_dir.display()
        );
        Ok(puzzle_dir)
    }
}

/// Load a stencil image from disk
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_stencil(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|source| PuzzleError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}
