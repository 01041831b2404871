//! Region extraction, silhouette masking and pivot computation
//!
//! Every image pixel samples piece space at its centre, and a piece owns
//! exactly the pixels whose sample falls inside its mask rectangle. Both
//! rectangles and coverage come from that one mapping, so two neighbours
//! reading the same pixel see complementary tab and blank values and the
//! textures tile the image without seams or overlaps.

use image::imageops;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use serde::Serialize;

use crate::io::error::{Result, generation_error};
use crate::shape::geometry::{MaskGeometry, MaskOperation};
use crate::shape::stencil::Stencil;

const OPAQUE: u8 = u8::MAX;

/// Axis-aligned rectangle in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    /// Left column (inclusive)
    pub x: u32,
    /// Top row (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// Column just past the right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Row just past the bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Mapping between piece space and source image pixels for one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    cols: usize,
    rows: usize,
    base_size: u32,
    image_width: u32,
    image_height: u32,
}

impl CellLayout {
    /// Describe a `cols × rows` grid cut from an image of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero or the image has fewer
    /// pixels than the grid has cells along an axis
    pub fn new(
        cols: usize,
        rows: usize,
        base_size: u32,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self> {
        if cols == 0 || rows == 0 || base_size == 0 {
            return Err(generation_error(&format!(
                "degenerate grid {cols}x{rows} with base size {base_size}"
            )));
        }
        if (image_width as usize) < cols || (image_height as usize) < rows {
            return Err(generation_error(&format!(
                "image {image_width}x{image_height} is too small for a {cols}x{rows} grid"
            )));
        }

        Ok(Self {
            cols,
            rows,
            base_size,
            image_width,
            image_height,
        })
    }

    /// Image pixels per piece-space pixel along each axis
    pub fn element_size_ratio(&self) -> (f64, f64) {
        let base = f64::from(self.base_size);
        (
            f64::from(self.image_width) / self.cols as f64 / base,
            f64::from(self.image_height) / self.rows as f64 / base,
        )
    }

    const fn span_x(&self) -> u64 {
        self.cols as u64 * self.base_size as u64
    }

    const fn span_y(&self) -> u64 {
        self.rows as u64 * self.base_size as u64
    }

    // First pixel whose centre samples at or past `piece`
    const fn pixel_start(piece: u64, image: u32, span: u64) -> u32 {
        let doubled = 2 * piece * image as u64;
        if doubled <= span {
            return 0;
        }
        (doubled - span).div_ceil(2 * span) as u32
    }

    // Piece-space coordinate sampled by the centre of pixel `pixel`
    const fn sample(pixel: u32, image: u32, span: u64) -> u64 {
        (2 * pixel as u64 + 1) * span / (2 * image as u64)
    }

    fn pixel_rect(&self, left: u64, top: u64, width: u64, height: u64) -> PixelRect {
        let x0 = Self::pixel_start(left, self.image_width, self.span_x());
        let y0 = Self::pixel_start(top, self.image_height, self.span_y());
        let x1 = Self::pixel_start(left + width, self.image_width, self.span_x());
        let y1 = Self::pixel_start(top + height, self.image_height, self.span_y());
        PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Pixel rectangle of cell `(x, y)` without protrusions
    pub fn nominal_rect(&self, x: usize, y: usize) -> PixelRect {
        let base = u64::from(self.base_size);
        self.pixel_rect(x as u64 * base, y as u64 * base, base, base)
    }

    /// Piece-space top-left corner of the mask of cell `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if a tab would reach past the grid border, which
    /// only happens when a border edge is not flat
    pub fn mask_origin(
        &self,
        x: usize,
        y: usize,
        geometry: &MaskGeometry,
    ) -> Result<(u64, u64)> {
        let base = u64::from(self.base_size);
        let (offset_x, offset_y) = geometry.pixel_offset;

        let left = (x as u64 * base)
            .checked_sub(u64::from(offset_x))
            .ok_or_else(|| generation_error(&"left border edge carries a tab"))?;
        let top = (y as u64 * base)
            .checked_sub(u64::from(offset_y))
            .ok_or_else(|| generation_error(&"top border edge carries a tab"))?;

        if left + u64::from(geometry.mask_width) > self.span_x() {
            return Err(generation_error(&"right border edge carries a tab"));
        }
        if top + u64::from(geometry.mask_height) > self.span_y() {
            return Err(generation_error(&"bottom border edge carries a tab"));
        }

        Ok((left, top))
    }

    /// Pixel rectangle of cell `(x, y)` grown by its protruding tabs
    ///
    /// # Errors
    ///
    /// Returns an error if a tab would reach past the grid border
    pub fn extraction_rect(
        &self,
        x: usize,
        y: usize,
        geometry: &MaskGeometry,
    ) -> Result<PixelRect> {
        let (left, top) = self.mask_origin(x, y, geometry)?;
        Ok(self.pixel_rect(
            left,
            top,
            u64::from(geometry.mask_width),
            u64::from(geometry.mask_height),
        ))
    }

    /// Sample a piece-space coverage mask at the pixels of `rect`
    ///
    /// `origin` is the piece-space corner the mask was rendered at. Pixels
    /// sampling outside the mask are transparent.
    pub fn sample_coverage(
        &self,
        coverage: &GrayImage,
        rect: &PixelRect,
        origin: (u64, u64),
    ) -> GrayImage {
        let (left, top) = origin;
        GrayImage::from_fn(rect.width, rect.height, |px, py| {
            let piece_x = Self::sample(rect.x + px, self.image_width, self.span_x());
            let piece_y = Self::sample(rect.y + py, self.image_height, self.span_y());
            piece_x
                .checked_sub(left)
                .zip(piece_y.checked_sub(top))
                .and_then(|(mask_x, mask_y)| {
                    Some((u32::try_from(mask_x).ok()?, u32::try_from(mask_y).ok()?))
                })
                .and_then(|(mask_x, mask_y)| coverage.get_pixel_checked(mask_x, mask_y))
                .copied()
                .unwrap_or(Luma([0]))
        })
    }
}

/// Masked texture of one piece together with its placement pivot
#[derive(Debug, Clone)]
pub struct ExtractedPiece {
    /// Source pixels with everything outside the silhouette transparent
    pub texture: RgbaImage,
    /// Nominal top-left corner as a fraction of the texture size, y up
    pub pivot: [f32; 2],
    /// Nominal top-left corner in texture pixels, y down
    pub pixel_offset: (u32, u32),
    /// Region of the source image the texture was copied from
    pub source_rect: PixelRect,
    /// Region of the source image the piece nominally covers
    pub nominal_rect: PixelRect,
}

/// Copy, mask and pivot one piece of the source image
///
/// # Errors
///
/// Returns an error if the extraction rectangle is empty, reaches past the
/// grid border, or falls outside the source image
pub fn extract_piece(
    source: &RgbaImage,
    layout: &CellLayout,
    x: usize,
    y: usize,
    geometry: &MaskGeometry,
    stencil: &Stencil,
) -> Result<ExtractedPiece> {
    let origin = layout.mask_origin(x, y, geometry)?;
    let source_rect = layout.extraction_rect(x, y, geometry)?;
    let nominal_rect = layout.nominal_rect(x, y);

    if source_rect.width == 0 || source_rect.height == 0 {
        return Err(generation_error(&format!(
            "empty extraction rectangle {}x{}",
            source_rect.width, source_rect.height
        )));
    }
    if source_rect.right() > source.width() || source_rect.bottom() > source.height() {
        return Err(generation_error(&format!(
            "extraction rectangle {source_rect:?} exceeds source image {}x{}",
            source.width(),
            source.height()
        )));
    }

    let mut texture = imageops::crop_imm(
        source,
        source_rect.x,
        source_rect.y,
        source_rect.width,
        source_rect.height,
    )
    .to_image();

    let coverage = render_coverage(geometry, stencil)?;
    let coverage = layout.sample_coverage(&coverage, &source_rect, origin);
    apply_coverage(&mut texture, &coverage);

    let pixel_offset = (
        nominal_rect.x - source_rect.x,
        nominal_rect.y - source_rect.y,
    );
    let pivot = [
        pixel_offset.0 as f32 / texture.width() as f32,
        1.0 - pixel_offset.1 as f32 / texture.height() as f32,
    ];

    Ok(ExtractedPiece {
        texture,
        pivot,
        pixel_offset,
        source_rect,
        nominal_rect,
    })
}

/// Render the piece silhouette in piece space
///
/// The nominal square starts opaque, tabs are unioned on and blanks are
/// subtracted.
///
/// # Errors
///
/// Returns an error if a stencil placement falls outside the mask
pub fn render_coverage(geometry: &MaskGeometry, stencil: &Stencil) -> Result<GrayImage> {
    let (offset_x, offset_y) = geometry.pixel_offset;
    let base = geometry.base_size;

    let mut coverage = GrayImage::from_fn(geometry.mask_width, geometry.mask_height, |x, y| {
        let inside = (offset_x..offset_x + base).contains(&x)
            && (offset_y..offset_y + base).contains(&y);
        Luma([if inside { OPAQUE } else { 0 }])
    });

    for placement in &geometry.placements {
        let mask = stencil.mask(placement.direction);
        for (sx, sy, &Luma([stencil_alpha])) in mask.enumerate_pixels() {
            let target = coverage
                .get_pixel_mut_checked(placement.x + sx, placement.y + sy)
                .ok_or_else(|| {
                    generation_error(&format!(
                        "{:?} stencil at ({}, {}) exceeds mask {}x{}",
                        placement.side,
                        placement.x,
                        placement.y,
                        geometry.mask_width,
                        geometry.mask_height
                    ))
                })?;
            let Luma([value]) = target;
            *value = match placement.operation {
                MaskOperation::Union => (*value).max(stencil_alpha),
                MaskOperation::Subtract => scale_alpha(*value, OPAQUE - stencil_alpha),
            };
        }
    }

    Ok(coverage)
}

/// Multiply texture alpha by a coverage mask of the same size
pub fn apply_coverage(texture: &mut RgbaImage, coverage: &GrayImage) {
    for (pixel, &Luma([covered])) in texture.pixels_mut().zip(coverage.pixels()) {
        let Rgba([_, _, _, alpha]) = pixel;
        *alpha = scale_alpha(*alpha, covered);
    }
}

const fn scale_alpha(value: u8, factor: u8) -> u8 {
    ((value as u16 * factor as u16) / OPAQUE as u16) as u8
}

/// Count texture pixels that are not fully transparent
pub fn opaque_pixel_count(texture: &RgbaImage) -> usize {
    texture
        .pixels()
        .filter(|&&Rgba([_, _, _, alpha])| alpha > 0)
        .count()
}
