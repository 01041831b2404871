//! Tests for command-line parsing and end-to-end processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use jigsaw_cut::PuzzleError;
    use jigsaw_cut::assembly::placement::Anchoring;
    use jigsaw_cut::io::cli::{Cli, PuzzleProcessor, load_stencil};
    use jigsaw_cut::io::configuration::{
        DEFAULT_COLS, DEFAULT_ELEMENT_BASE_SIZE, DEFAULT_PIXELS_PER_UNIT, DEFAULT_ROWS,
        MANIFEST_FILE_NAME, PREFERENCES_FILE_NAME,
    };
    use jigsaw_cut::io::preferences::{FilePreferences, recall_grid_size};
    use std::path::{Path, PathBuf};

    // Tests CLI parsing with only the required source argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "photo.png"]);

        assert_eq!(cli.source, "photo.png");
        assert_eq!(cli.cols, DEFAULT_COLS);
        assert_eq!(cli.rows, DEFAULT_ROWS);
        assert_eq!(cli.base_size, DEFAULT_ELEMENT_BASE_SIZE);
        assert_eq!(cli.pixels_per_unit, DEFAULT_PIXELS_PER_UNIT);
        assert_eq!(cli.anchor, Anchoring::TopLeft);
        assert_eq!(cli.output, PathBuf::from("puzzles"));
        assert!(cli.stencil.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.shadows);
        assert!(!cli.quiet);
    }

    // Tests CLI parsing with all available arguments
    // Verified by dropping the value_enum attribute from the anchor
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "https://example.com/cat.jpg",
            "--stencil",
            "tab.png",
            "--cols",
            "6",
            "--rows",
            "4",
            "--base-size",
            "180",
            "--pixels-per-unit",
            "64",
            "--scale",
            "0.5",
            "--anchor",
            "center",
            "--shadows",
            "--randomize-rotation",
            "--seed",
            "99",
            "--output",
            "out",
            "--preferences",
            "prefs.json",
            "--quiet",
        ]);

        assert_eq!(cli.stencil, Some(PathBuf::from("tab.png")));
        assert_eq!(cli.anchor, Anchoring::Center);
        assert!(!cli.should_show_progress());

        let config = cli.generator_config();
        assert_eq!((config.cols, config.rows), (6, 4));
        assert_eq!(config.element_base_size, 180);
        assert_eq!(config.pixels_per_unit, 64);
        assert!((config.image_scale - 0.5).abs() < f32::EPSILON);
        assert!(config.shadow.enabled);
        assert!(config.assembly.randomize_rotation);
        assert_eq!(config.seed, Some(99));
        assert_eq!(cli.preferences_path(), PathBuf::from("prefs.json"));
    }

    // Tests the preference file defaults to the output directory
    #[test]
    fn test_default_preferences_path() {
        let cli = Cli::parse_from(["program", "photo.png", "--output", "generated"]);
        assert_eq!(
            cli.preferences_path(),
            Path::new("generated").join(PREFERENCES_FILE_NAME)
        );
    }

    // Tests a missing source argument is rejected
    #[test]
    fn test_cli_requires_source() {
        assert!(Cli::try_parse_from(["program"]).is_err());
        assert!(Cli::try_parse_from(["program", "a.png", "--anchor", "middle"]).is_err());
    }

    // Tests a missing stencil file is an image load error
    #[test]
    fn test_load_stencil_missing() {
        let result = load_stencil(Path::new("/definitely/missing/stencil.png"));
        assert!(matches!(result, Err(PuzzleError::ImageLoad { .. })));
    }

    // Tests the processor acquires, cuts, exports and remembers a local image
    // Verified by exporting into the source directory
    #[tokio::test]
    async fn test_process_local_image() {
        let dir = tempfile::tempdir()
            .unwrap_or_else(|error| unreachable!("tempdir should be created: {error}"));
        let source = dir.path().join("valley.png");
        RgbaImage::from_pixel(160, 120, Rgba([90, 140, 60, 255]))
            .save(&source)
            .unwrap_or_else(|error| unreachable!("image should save: {error}"));
        let output = dir.path().join("out");
        let source_arg = source.display().to_string();
        let output_arg = output.display().to_string();

        let cli = Cli::parse_from([
            "program",
            source_arg.as_str(),
            "--cols",
            "3",
            "--rows",
            "2",
            "--seed",
            "4",
            "--output",
            output_arg.as_str(),
            "--quiet",
        ]);
        let puzzle_dir = PuzzleProcessor::new(cli)
            .process()
            .await
            .unwrap_or_else(|error| unreachable!("processing should succeed: {error}"));

        assert_eq!(puzzle_dir, output.join("Puzzle_valley_3x2"));
        assert!(puzzle_dir.join(MANIFEST_FILE_NAME).exists());
        assert!(puzzle_dir.join("piece_2x1.png").exists());

        let preferences = FilePreferences::open(output.join(PREFERENCES_FILE_NAME))
            .unwrap_or_else(|error| unreachable!("preferences should load: {error}"));
        assert_eq!(
            recall_grid_size(&preferences, "Puzzle_valley_3x2"),
            Some((3, 2))
        );
    }

    // Tests a corrupt preference file is ignored and left as it was
    // Verified by propagating the preference load error
    #[tokio::test]
    async fn test_process_ignores_malformed_preferences() {
        let dir = tempfile::tempdir()
            .unwrap_or_else(|error| unreachable!("tempdir should be created: {error}"));
        let source = dir.path().join("dunes.png");
        RgbaImage::from_pixel(150, 100, Rgba([200, 170, 110, 255]))
            .save(&source)
            .unwrap_or_else(|error| unreachable!("image should save: {error}"));
        let output = dir.path().join("out");
        std::fs::create_dir_all(&output)
            .unwrap_or_else(|error| unreachable!("output should be created: {error}"));
        let preferences_file = output.join(PREFERENCES_FILE_NAME);
        std::fs::write(&preferences_file, "{ not json")
            .unwrap_or_else(|error| unreachable!("preferences should be written: {error}"));
        let source_arg = source.display().to_string();
        let output_arg = output.display().to_string();

        let cli = Cli::parse_from([
            "program",
            source_arg.as_str(),
            "--seed",
            "6",
            "--output",
            output_arg.as_str(),
            "--quiet",
        ]);
        let puzzle_dir = PuzzleProcessor::new(cli)
            .process()
            .await
            .unwrap_or_else(|error| unreachable!("processing should succeed: {error}"));

        assert!(puzzle_dir.join(MANIFEST_FILE_NAME).exists());
        let content = std::fs::read_to_string(&preferences_file)
            .unwrap_or_else(|error| unreachable!("preferences should remain: {error}"));
        assert_eq!(content, "{ not json");
    }

    // Tests a missing source fails before anything is written
    #[tokio::test]
    async fn test_process_missing_source() {
        let dir = tempfile::tempdir()
            .unwrap_or_else(|error| unreachable!("tempdir should be created: {error}"));
        let output = dir.path().join("out");
        let output_arg = output.display().to_string();

        let cli = Cli::parse_from([
            "program",
            "/definitely/missing/source.png",
            "--output",
            output_arg.as_str(),
            "--quiet",
        ]);
        let result = PuzzleProcessor::new(cli).process().await;

        assert!(matches!(result, Err(error) if error.is_acquisition()));
        assert!(!output.join("Puzzle_source_2x2").exists());
    }
}
