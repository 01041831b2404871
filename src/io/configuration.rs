//! Generation constants and runtime configuration with range clamping

use log::debug;
use serde::Serialize;

use crate::assembly::placement::Anchoring;
use crate::io::error::{Result, invalid_parameter};

// Grid limits
/// Minimum number of columns or rows
pub const MIN_GRID_DIMENSION: usize = 2;
/// Maximum number of columns or rows
pub const MAX_GRID_DIMENSION: usize = 35;

// Element base size is bounded relative to the stencil width
/// Smallest base size as a multiple of the stencil width
pub const MIN_BASE_SIZE_STENCIL_MULTIPLE: u32 = 2;
/// Largest base size as a multiple of the stencil width
pub const MAX_BASE_SIZE_STENCIL_MULTIPLE: u32 = 4;

/// Minimum sprite resolution
pub const MIN_PIXELS_PER_UNIT: u32 = 10;
/// Maximum sprite resolution
pub const MAX_PIXELS_PER_UNIT: u32 = 1024;

/// Smallest source image rescale factor
pub const MIN_IMAGE_SCALE: f32 = 0.2;
/// Largest source image rescale factor
pub const MAX_IMAGE_SCALE: f32 = 5.0;

// Default values for configurable parameters
/// Default number of columns
pub const DEFAULT_COLS: usize = 2;
/// Default number of rows
pub const DEFAULT_ROWS: usize = 2;
/// Default piece base size in piece-space pixels
pub const DEFAULT_ELEMENT_BASE_SIZE: u32 = 200;
/// Default sprite resolution
pub const DEFAULT_PIXELS_PER_UNIT: u32 = 100;
/// Default source image rescale factor
pub const DEFAULT_IMAGE_SCALE: f32 = 1.0;
/// Default shadow offset relative to its piece
pub const DEFAULT_SHADOW_OFFSET: [f32; 3] = [0.1, -0.1, 1.0];
/// Default translucent black shadow tint
pub const DEFAULT_SHADOW_COLOR: [u8; 4] = [0, 0, 0, 128];
/// Shadows render behind their piece
pub const SHADOW_SORTING_ORDER: i32 = -1;

// Assembly controller defaults, forwarded untouched
/// Distance within which a piece counts as placed
pub const DEFAULT_ALLOWED_DISTANCE: f32 = 0.75;
/// Rotation in degrees within which a piece counts as placed
pub const DEFAULT_ALLOWED_ROTATION: f32 = 10.0;
/// Default size of decomposition areas
pub const DEFAULT_DECOMPOSITION_AREA_SIZE: [f32; 3] = [5.0, 5.0, 5.0];
/// Default offset of the left/right decomposition areas
pub const DEFAULT_HORIZONTAL_AREA_OFFSET: [f32; 3] = [1.0, 0.0, 1.0];
/// Default offset of the top/bottom decomposition areas
pub const DEFAULT_VERTICAL_AREA_OFFSET: [f32; 3] = [0.0, 1.0, 1.0];

/// Default procedural stencil width
pub const DEFAULT_STENCIL_WIDTH: u32 = 60;
/// Default procedural stencil depth
pub const DEFAULT_STENCIL_DEPTH: u32 = 45;

// Naming
/// Prefix of every generated puzzle name
pub const PUZZLE_NAME_PREFIX: &str = "Puzzle_";
/// Suffix of persisted column count keys
pub const GRID_COLS_KEY_SUFFIX: &str = "_X";
/// Suffix of persisted row count keys
pub const GRID_ROWS_KEY_SUFFIX: &str = "_Y";
/// File name of the exported piece manifest
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
/// Default preference file name inside the output directory
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Timeout for remote image requests
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Drop shadow duplicated behind every piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowSettings {
    /// Whether shadows are generated
    pub enabled: bool,
    /// Offset of the shadow relative to its piece, in scene units
    pub offset: [f32; 3],
    /// RGBA tint applied to the shadow
    pub color: [u8; 4],
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            offset: DEFAULT_SHADOW_OFFSET,
            color: DEFAULT_SHADOW_COLOR,
        }
    }
}

/// Sides of the puzzle where pieces are scattered before assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecompositionSides {
    /// Scatter to the left of the puzzle
    pub left: bool,
    /// Scatter to the right of the puzzle
    pub right: bool,
    /// Scatter above the puzzle
    pub top: bool,
    /// Scatter below the puzzle
    pub bottom: bool,
}

impl Default for DecompositionSides {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            top: false,
            bottom: false,
        }
    }
}

/// Size and offset of one pair of decomposition areas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecompositionArea {
    /// Area extent in scene units
    pub size: [f32; 3],
    /// Let the controller compute the offset from the puzzle bounds
    pub auto_offset: bool,
    /// Explicit offset used when `auto_offset` is off
    pub offset: [f32; 3],
}

/// Settings consumed by the assembly controller, not by generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssemblySettings {
    /// Distance within which a piece snaps to its origin
    pub allowed_distance: f32,
    /// Rotation in degrees within which a piece snaps to its origin
    pub allowed_rotation: f32,
    /// Rotate pieces randomly when scattering them
    pub randomize_rotation: bool,
    /// Where pieces are scattered
    pub decompose_to: DecompositionSides,
    /// Left/right scatter areas
    pub horizontal_area: DecompositionArea,
    /// Top/bottom scatter areas
    pub vertical_area: DecompositionArea,
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            allowed_distance: DEFAULT_ALLOWED_DISTANCE,
            allowed_rotation: DEFAULT_ALLOWED_ROTATION,
            randomize_rotation: false,
            decompose_to: DecompositionSides::default(),
            horizontal_area: DecompositionArea {
                size: DEFAULT_DECOMPOSITION_AREA_SIZE,
                auto_offset: true,
                offset: DEFAULT_HORIZONTAL_AREA_OFFSET,
            },
            vertical_area: DecompositionArea {
                size: DEFAULT_DECOMPOSITION_AREA_SIZE,
                auto_offset: true,
                offset: DEFAULT_VERTICAL_AREA_OFFSET,
            },
        }
    }
}

/// Parameters of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Grid columns
    pub cols: usize,
    /// Grid rows
    pub rows: usize,
    /// Nominal piece size in piece-space pixels
    pub element_base_size: u32,
    /// Texture pixels per scene unit
    pub pixels_per_unit: u32,
    /// Source image rescale factor applied before cutting
    pub image_scale: f32,
    /// Where the puzzle origin sits
    pub anchoring: Anchoring,
    /// Drop shadow settings
    pub shadow: ShadowSettings,
    /// Fixed seed for reproducible edge shapes, fresh entropy when unset
    pub seed: Option<u64>,
    /// Forwarded to the assembly controller
    pub assembly: AssemblySettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            element_base_size: DEFAULT_ELEMENT_BASE_SIZE,
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
            image_scale: DEFAULT_IMAGE_SCALE,
            anchoring: Anchoring::TopLeft,
            shadow: ShadowSettings::default(),
            seed: None,
            assembly: AssemblySettings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Copy with every numeric setting clamped into its valid range
    ///
    /// Out-of-range values are not an error; they are silently pulled into
    /// range and the adjustment is logged at debug level.
    ///
    /// # Errors
    ///
    /// Returns an error if the stencil width is zero or the image scale is
    /// not a finite number
    pub fn clamped(&self, stencil_width: u32) -> Result<Self> {
        if stencil_width == 0 {
            return Err(invalid_parameter(
                "stencil_width",
                &stencil_width,
                &"stencil must be at least one pixel wide",
            ));
        }
        if !self.image_scale.is_finite() {
            return Err(invalid_parameter(
                "image_scale",
                &self.image_scale,
                &"scale must be a finite number",
            ));
        }

        let clamped = Self {
            cols: num_traits::clamp(self.cols, MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
            rows: num_traits::clamp(self.rows, MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
            element_base_size: num_traits::clamp(
                self.element_base_size,
                stencil_width.saturating_mul(MIN_BASE_SIZE_STENCIL_MULTIPLE),
                stencil_width.saturating_mul(MAX_BASE_SIZE_STENCIL_MULTIPLE),
            ),
            pixels_per_unit: num_traits::clamp(
                self.pixels_per_unit,
                MIN_PIXELS_PER_UNIT,
                MAX_PIXELS_PER_UNIT,
            ),
            image_scale: num_traits::clamp(self.image_scale, MIN_IMAGE_SCALE, MAX_IMAGE_SCALE),
            ..self.clone()
        };

        if clamped != *self {
            debug!(
                "Clamped configuration: grid {}x{} -> {}x{}, base size {} -> {}, pixels per unit {} -> {}, scale {} -> {}",
                self.cols,
                self.rows,
                clamped.cols,
                clamped.rows,
                self.element_base_size,
                clamped.element_base_size,
                self.pixels_per_unit,
                clamped.pixels_per_unit,
                self.image_scale,
                clamped.image_scale,
            );
        }

        Ok(clamped)
    }
}
