//! Tests for the row-major generation sweep

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use jigsaw_cut::PuzzleError;
    use jigsaw_cut::assembly::grid::PuzzleGrid;
    use jigsaw_cut::shape::Stencil;
    use rand::{SeedableRng, rngs::StdRng};

    fn knob() -> Stencil {
        Stencil::knob(60, 45).unwrap_or_else(|error| unreachable!("knob should load: {error}"))
    }

    fn source() -> RgbaImage {
        RgbaImage::from_pixel(300, 200, Rgba([120, 80, 40, 255]))
    }

    // Tests every cell is produced in row-major order with progress reports
    // Verified by reporting progress before pushing the element
    #[test]
    fn test_generate_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut reports = Vec::new();
        let grid = PuzzleGrid::generate(
            &source(),
            &knob(),
            3,
            2,
            150,
            &mut rng,
            &mut |done, total| reports.push((done, total)),
        )
        .unwrap_or_else(|error| unreachable!("grid should generate: {error}"));

        assert_eq!((grid.cols(), grid.rows()), (3, 2));
        let order: Vec<_> = grid.iter().map(|element| (element.x, element.y)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(reports, (1..=6).map(|done| (done, 6)).collect::<Vec<_>>());
    }

    // Tests consuming the grid hands over every element row-major
    // Verified by collecting elements column-major
    #[test]
    fn test_into_elements_row_major() {
        let mut rng = StdRng::seed_from_u64(6);
        let grid = PuzzleGrid::generate(&source(), &knob(), 3, 2, 150, &mut rng, &mut |_, _| {})
            .unwrap_or_else(|error| unreachable!("grid should generate: {error}"));
        let sizes: Vec<_> = grid
            .iter()
            .map(|element| element.piece.texture.dimensions())
            .collect();

        let elements: Vec<_> = grid.into_elements().collect();

        let order: Vec<_> = elements.iter().map(|element| (element.x, element.y)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        let owned: Vec<_> = elements
            .iter()
            .map(|element| element.piece.texture.dimensions())
            .collect();
        assert_eq!(owned, sizes);
    }

    // Tests neighbouring elements carry inverse edges
    #[test]
    fn test_grid_edges_match() {
        let mut rng = StdRng::seed_from_u64(2);
        let grid = PuzzleGrid::generate(&source(), &knob(), 3, 2, 150, &mut rng, &mut |_, _| {})
            .unwrap_or_else(|error| unreachable!("grid should generate: {error}"));

        for y in 0..2 {
            for x in 0..2 {
                let here = grid.get(x, y).map(|element| element.edges().right);
                let next = grid.get(x + 1, y).map(|element| -element.edges().left);
                assert_eq!(here, next);
            }
        }
        for x in 0..3 {
            let here = grid.get(x, 0).map(|element| element.edges().bottom);
            let below = grid.get(x, 1).map(|element| -element.edges().top);
            assert_eq!(here, below);
        }
        assert!(grid.get(3, 0).is_none());
    }

    // Tests texture size follows the geometry and pixel layout
    #[test]
    fn test_textures_follow_geometry() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = PuzzleGrid::generate(&source(), &knob(), 3, 2, 150, &mut rng, &mut |_, _| {})
            .unwrap_or_else(|error| unreachable!("grid should generate: {error}"));

        // One piece-space pixel is 100/150 image pixels on both axes
        for element in grid.iter() {
            let (width, height) = element.piece.texture.dimensions();
            let expected_width = f64::from(element.geometry.mask_width) * 100.0 / 150.0;
            let expected_height = f64::from(element.geometry.mask_height) * 100.0 / 150.0;
            assert!((f64::from(width) - expected_width).abs() <= 1.0);
            assert!((f64::from(height) - expected_height).abs() <= 1.0);
        }
        assert_eq!(grid.layout().nominal_rect(2, 1).right(), 300);
    }

    // Tests the failing cell is named in the error
    // Verified by dropping the at_cell call
    #[test]
    fn test_failure_names_cell() {
        let mut rng = StdRng::seed_from_u64(4);
        let result = PuzzleGrid::generate(&source(), &knob(), 3, 2, 50, &mut rng, &mut |_, _| {});

        match result {
            Err(PuzzleError::Generation { cell, .. }) => assert_eq!(cell, Some((0, 0))),
            Err(other) => unreachable!("Expected Generation error, got {other}"),
            Ok(_) => unreachable!("Expected generation to fail"),
        }
    }

    // Tests an image smaller than the grid is rejected before any cell
    #[test]
    fn test_image_too_small() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut reports = 0;
        let tiny = RgbaImage::new(1, 1);
        let result =
            PuzzleGrid::generate(&tiny, &knob(), 2, 2, 150, &mut rng, &mut |_, _| reports += 1);

        assert!(result.is_err());
        assert_eq!(reports, 0);
    }
}
