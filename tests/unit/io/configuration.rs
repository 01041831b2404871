//! Tests for generation constants, defaults and range clamping

#[cfg(test)]
mod tests {
    use jigsaw_cut::assembly::placement::Anchoring;
    use jigsaw_cut::io::configuration::{
        AssemblySettings, DEFAULT_ALLOWED_DISTANCE, DEFAULT_ALLOWED_ROTATION, DEFAULT_COLS,
        DEFAULT_ELEMENT_BASE_SIZE, DEFAULT_ROWS, DEFAULT_SHADOW_COLOR, GeneratorConfig,
        MAX_GRID_DIMENSION, MAX_IMAGE_SCALE, MAX_PIXELS_PER_UNIT, MIN_GRID_DIMENSION,
        MIN_IMAGE_SCALE, MIN_PIXELS_PER_UNIT, SHADOW_SORTING_ORDER, ShadowSettings,
    };

    // Tests grid and resolution limits
    // Verified by changing constant values
    #[test]
    fn test_limits() {
        assert_eq!(MIN_GRID_DIMENSION, 2);
        assert_eq!(MAX_GRID_DIMENSION, 35);
        assert_eq!(MIN_PIXELS_PER_UNIT, 10);
        assert_eq!(MAX_PIXELS_PER_UNIT, 1024);
        assert!((MIN_IMAGE_SCALE - 0.2).abs() < f32::EPSILON);
        assert!((MAX_IMAGE_SCALE - 5.0).abs() < f32::EPSILON);
    }

    // Tests defaults already sit inside their ranges
    #[test]
    fn test_defaults_are_stable_under_clamping() {
        let config = GeneratorConfig::default();
        assert_eq!(config.cols, DEFAULT_COLS);
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.element_base_size, DEFAULT_ELEMENT_BASE_SIZE);
        assert_eq!(config.anchoring, Anchoring::TopLeft);
        assert!(config.seed.is_none());

        let clamped = config
            .clamped(60)
            .unwrap_or_else(|error| unreachable!("defaults should clamp: {error}"));
        assert_eq!(clamped, config);
    }

    // Tests every numeric setting is pulled into range
    // Verified by swapping the bounds of the base size clamp
    #[test]
    fn test_clamping() {
        let low = GeneratorConfig {
            cols: 0,
            rows: 1,
            element_base_size: 10,
            pixels_per_unit: 1,
            image_scale: 0.01,
            ..GeneratorConfig::default()
        }
        .clamped(60)
        .unwrap_or_else(|error| unreachable!("config should clamp: {error}"));

        assert_eq!((low.cols, low.rows), (2, 2));
        assert_eq!(low.element_base_size, 120);
        assert_eq!(low.pixels_per_unit, 10);
        assert!((low.image_scale - 0.2).abs() < f32::EPSILON);

        let high = GeneratorConfig {
            cols: 100,
            rows: 36,
            element_base_size: 10_000,
            pixels_per_unit: 4096,
            image_scale: 12.0,
            ..GeneratorConfig::default()
        }
        .clamped(60)
        .unwrap_or_else(|error| unreachable!("config should clamp: {error}"));

        assert_eq!((high.cols, high.rows), (35, 35));
        assert_eq!(high.element_base_size, 240);
        assert_eq!(high.pixels_per_unit, 1024);
        assert!((high.image_scale - 5.0).abs() < f32::EPSILON);
    }

    // Tests clamping leaves non-numeric settings alone and is idempotent
    #[test]
    fn test_clamping_preserves_other_settings() {
        let config = GeneratorConfig {
            cols: 99,
            anchoring: Anchoring::Center,
            seed: Some(5),
            shadow: ShadowSettings {
                enabled: true,
                ..ShadowSettings::default()
            },
            ..GeneratorConfig::default()
        };
        let once = config
            .clamped(50)
            .unwrap_or_else(|error| unreachable!("config should clamp: {error}"));
        let twice = once
            .clamped(50)
            .unwrap_or_else(|error| unreachable!("config should clamp: {error}"));

        assert_eq!(once.anchoring, Anchoring::Center);
        assert_eq!(once.seed, Some(5));
        assert!(once.shadow.enabled);
        assert_eq!(once, twice);
    }

    // Tests unusable inputs are rejected
    #[test]
    fn test_clamping_errors() {
        let config = GeneratorConfig::default();
        assert!(config.clamped(0).is_err());

        let nan = GeneratorConfig {
            image_scale: f32::NAN,
            ..GeneratorConfig::default()
        };
        assert!(nan.clamped(60).is_err());
    }

    // Tests shadow and assembly defaults
    #[test]
    fn test_passthrough_defaults() {
        let shadow = ShadowSettings::default();
        assert!(!shadow.enabled);
        assert_eq!(shadow.color, DEFAULT_SHADOW_COLOR);
        assert_eq!(SHADOW_SORTING_ORDER, -1);

        let assembly = AssemblySettings::default();
        assert!((assembly.allowed_distance - DEFAULT_ALLOWED_DISTANCE).abs() < f32::EPSILON);
        assert!((assembly.allowed_rotation - DEFAULT_ALLOWED_ROTATION).abs() < f32::EPSILON);
        assert!(!assembly.randomize_rotation);
        assert!(assembly.decompose_to.left && assembly.decompose_to.right);
        assert!(!assembly.decompose_to.top && !assembly.decompose_to.bottom);
        assert!(assembly.horizontal_area.auto_offset);
    }
}
