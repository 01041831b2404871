//! Scene placement of generated pieces
//!
//! Scene space is y-up and measured in units of `pixels_per_unit` texture
//! pixels. Each piece is positioned at its nominal top-left grid corner and
//! its pivot points at that corner inside the texture, so protrusions never
//! shift a piece.

use image::RgbaImage;
use serde::Serialize;

use crate::io::configuration::{SHADOW_SORTING_ORDER, ShadowSettings};
use crate::raster::PixelRect;
use crate::shape::PieceEdges;

/// Where the puzzle origin sits relative to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Anchoring {
    /// Origin at the grid's top-left corner
    #[default]
    TopLeft,
    /// Origin at the grid's geometric centre
    Center,
}

/// Darkened duplicate rendered behind a piece
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowRecord {
    /// Entity name
    pub name: String,
    /// Offset relative to the parent piece
    pub local_offset: [f32; 3],
    /// RGBA tint
    pub tint: [u8; 4],
    /// Render order relative to the parent piece
    pub sorting_order: i32,
}

impl ShadowRecord {
    /// Shadow for the named piece, if shadows are enabled
    pub fn for_piece(piece_name: &str, settings: &ShadowSettings) -> Option<Self> {
        settings.enabled.then(|| Self {
            name: format!("{piece_name}_Shadow"),
            local_offset: settings.offset,
            tint: settings.color,
            sorting_order: SHADOW_SORTING_ORDER,
        })
    }
}

/// One placed puzzle piece handed to the assembly controller
#[derive(Debug, Clone)]
pub struct PieceEntity {
    /// Entity name, `piece_<x>x<y>`
    pub name: String,
    /// Grid column
    pub x: usize,
    /// Grid row
    pub y: usize,
    /// Edge shapes, for matching neighbours
    pub edges: PieceEdges,
    /// Masked piece texture
    pub texture: RgbaImage,
    /// Region of the source image the texture was copied from
    pub source_rect: PixelRect,
    /// Nominal top-left corner as a fraction of the texture size, y up
    pub pivot: [f32; 2],
    /// Scene position of the pivot
    pub position: [f32; 3],
    /// Optional drop shadow
    pub shadow: Option<ShadowRecord>,
}

impl PieceEntity {
    /// Entity name of the piece at `(x, y)`
    pub fn piece_name(x: usize, y: usize) -> String {
        format!("piece_{x}x{y}")
    }

    /// Scene position of the texture's top-left corner
    pub fn texture_top_left(&self, scene: &SceneLayout) -> [f32; 2] {
        let [left, top, _] = scene.position(&self.source_rect);
        [left, top]
    }

    /// Scene position of the nominal grid corner, reconstructed from the pivot
    pub fn nominal_top_left(&self, scene: &SceneLayout) -> [f32; 2] {
        let [left, top] = self.texture_top_left(scene);
        let [pivot_x, pivot_y] = self.pivot;
        let width = self.texture.width() as f32 / scene.pixels_per_unit();
        let height = self.texture.height() as f32 / scene.pixels_per_unit();
        [
            pivot_x.mul_add(width, left),
            (1.0 - pivot_y).mul_add(-height, top),
        ]
    }
}

/// Maps source image pixels to scene positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pixels_per_unit: f32,
    anchor_offset: [f32; 2],
}

impl SceneLayout {
    /// Layout for an image of the given size
    pub fn new(anchoring: Anchoring, image_width: u32, image_height: u32, pixels_per_unit: u32) -> Self {
        let pixels_per_unit = pixels_per_unit.max(1) as f32;
        let anchor_offset = match anchoring {
            Anchoring::TopLeft => [0.0, 0.0],
            Anchoring::Center => [
                image_width as f32 / pixels_per_unit / 2.0,
                image_height as f32 / pixels_per_unit / 2.0,
            ],
        };
        Self {
            pixels_per_unit,
            anchor_offset,
        }
    }

    /// Texture pixels per scene unit
    pub const fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// Shift applied to every piece so the origin lands on the anchor
    pub const fn anchor_offset(&self) -> [f32; 2] {
        self.anchor_offset
    }

    /// Scene position of the top-left corner of a pixel rectangle
    pub fn position(&self, rect: &PixelRect) -> [f32; 3] {
        let [anchor_x, anchor_y] = self.anchor_offset;
        [
            rect.x as f32 / self.pixels_per_unit - anchor_x,
            anchor_y - rect.y as f32 / self.pixels_per_unit,
            0.0,
        ]
    }
}
