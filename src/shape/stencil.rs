//! Tab stencil and its oriented variants
//!
//! The source stencil describes one tab pointing up: its base sits on the
//! bottom row and its alpha channel is the tab silhouette. Vertical edges use
//! the copy rotated 90° clockwise; mirrored copies point the other way.

use image::{GrayImage, Luma, Rgba, RgbaImage, imageops};

use crate::io::error::{Result, invalid_parameter};

/// Direction a tab points once placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabDirection {
    /// Original stencil
    Up,
    /// Original stencil mirrored vertically
    Down,
    /// Rotated 90° clockwise
    Right,
    /// Rotated 90° clockwise and mirrored horizontally
    Left,
}

impl TabDirection {
    /// Whether the rotated stencil is used
    pub const fn is_rotated(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Whether the base variant is mirrored
    pub const fn is_mirrored(self) -> bool {
        matches!(self, Self::Down | Self::Left)
    }
}

/// Alpha masks of one tab shape in all four directions
#[derive(Debug, Clone)]
pub struct Stencil {
    up: GrayImage,
    down: GrayImage,
    right: GrayImage,
    left: GrayImage,
}

impl Stencil {
    /// Derive the oriented variants from an RGBA stencil image
    ///
    /// # Errors
    ///
    /// Returns an error if the stencil has no pixels
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "stencil",
                &format!("{width}x{height}"),
                &"stencil image must not be empty",
            ));
        }

        let up = GrayImage::from_fn(width, height, |x, y| {
            let Rgba([_, _, _, alpha]) = *image.get_pixel(x, y);
            Luma([alpha])
        });
        let down = imageops::flip_vertical(&up);
        let right = imageops::rotate90(&up);
        let left = imageops::flip_horizontal(&right);

        Ok(Self {
            up,
            down,
            right,
            left,
        })
    }

    /// Procedural round knob used when no stencil image is supplied
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn knob(width: u32, height: u32) -> Result<Self> {
        Self::from_rgba(&knob_image(width, height))
    }

    /// Width of the original stencil (span along a horizontal edge)
    pub fn width(&self) -> u32 {
        self.up.width()
    }

    /// Height of the original stencil (how far a tab protrudes)
    pub fn depth(&self) -> u32 {
        self.up.height()
    }

    /// Alpha mask for the given direction
    pub const fn mask(&self, direction: TabDirection) -> &GrayImage {
        match direction {
            TabDirection::Up => &self.up,
            TabDirection::Down => &self.down,
            TabDirection::Right => &self.right,
            TabDirection::Left => &self.left,
        }
    }
}

/// Render the default knob stencil as an RGBA image
///
/// A disc sits on a neck that reaches the bottom row, so the tab joins the
/// piece body without a gap.
pub fn knob_image(width: u32, height: u32) -> RgbaImage {
    let w = f64::from(width);
    let h = f64::from(height);
    let radius = (w * 0.35).min(h * 0.45);
    let center_x = w / 2.0;
    let center_y = radius.max(h - radius * 1.6);
    let neck_half_width = w * 0.15;

    RgbaImage::from_fn(width, height, |x, y| {
        let px = f64::from(x) + 0.5;
        let py = f64::from(y) + 0.5;
        let dx = px - center_x;
        let dy = py - center_y;
        let in_disc = dx.hypot(dy) <= radius;
        let in_neck = dx.abs() <= neck_half_width && py >= center_y;

        if in_disc || in_neck {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
