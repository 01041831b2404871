//! Source image rescaling

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::io::error::{Result, invalid_parameter};

/// Dimensions of a `width × height` image after scaling by `scale`
///
/// Rounds to the nearest pixel and never returns an empty dimension.
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let scale = f64::from(scale);
    let scaled = |value: u32| ((f64::from(value) * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Rescale the source image by `scale`, passing it through untouched at `1.0`
///
/// # Errors
///
/// Returns an error if the image is empty or the scale is not positive
pub fn scale_source(image: RgbaImage, scale: f32) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(invalid_parameter(
            "image",
            &format!("{width}x{height}"),
            &"source image must not be empty",
        ));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(invalid_parameter(
            "image_scale",
            &scale,
            &"scale must be a positive number",
        ));
    }

    if (scale - 1.0).abs() <= f32::EPSILON {
        return Ok(image);
    }

    let (new_width, new_height) = scaled_dimensions(width, height, scale);
    Ok(imageops::resize(
        &image,
        new_width,
        new_height,
        FilterType::Triangle,
    ))
}
