//! Tests for source image rescaling

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use jigsaw_cut::raster::scale::{scale_source, scaled_dimensions};

    // Tests rounding and the one-pixel floor
    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(100, 50, 0.5), (50, 25));
        assert_eq!(scaled_dimensions(100, 50, 2.0), (200, 100));
        assert_eq!(scaled_dimensions(3, 3, 0.2), (1, 1));
        assert_eq!(scaled_dimensions(1, 1, 0.2), (1, 1));
        assert_eq!(scaled_dimensions(7, 9, 1.5), (11, 14));
    }

    // Tests a unit scale returns the image untouched
    #[test]
    fn test_unit_scale_passthrough() {
        let image = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let scaled = scale_source(image.clone(), 1.0)
            .unwrap_or_else(|error| unreachable!("scale should succeed: {error}"));
        assert_eq!(scaled, image);
    }

    // Tests non-unit scales resize both axes
    // Verified by swapping width and height in the resize call
    #[test]
    fn test_scale_resizes() {
        let image = RgbaImage::from_pixel(40, 20, Rgba([50, 60, 70, 255]));

        let larger = scale_source(image.clone(), 2.0)
            .unwrap_or_else(|error| unreachable!("scale should succeed: {error}"));
        assert_eq!(larger.dimensions(), (80, 40));

        let smaller = scale_source(image, 0.25)
            .unwrap_or_else(|error| unreachable!("scale should succeed: {error}"));
        assert_eq!(smaller.dimensions(), (10, 5));
    }

    // Tests unusable inputs are rejected
    #[test]
    fn test_invalid_scale_inputs() {
        let image = RgbaImage::new(4, 4);
        assert!(scale_source(image.clone(), 0.0).is_err());
        assert!(scale_source(image.clone(), -1.0).is_err());
        assert!(scale_source(image, f32::NAN).is_err());
        assert!(scale_source(RgbaImage::new(0, 4), 2.0).is_err());
    }
}
