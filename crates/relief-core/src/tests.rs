#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::ViewerConfig;
    use crate::constants::*;
    use crate::error::{ReliefError, ShaderStage};
    use crate::types::{GridResolution, TerrainVertex, Viewport};

    fn named_config() -> ViewerConfig {
        ViewerConfig {
            shader_name: "terrain".into(),
            map_name: "hills".into(),
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn test_index_count_formula() {
        for x in 2..12u32 {
            for y in 2..12u32 {
                let grid = GridResolution::new(x, y);
                let expected = 3 * 2 * (x as usize - 1) * (y as usize - 1) + (y as usize - 1);
                assert_eq!(grid.index_count(), expected, "grid {x}x{y}");
                assert_eq!(grid.indices_per_row() * (y as usize - 1), expected);
            }
        }
    }

    #[test]
    fn test_degenerate_grid_counts() {
        let grid = GridResolution::new(1, 5);
        assert!(!grid.is_triangulable());
        assert_eq!(grid.triangle_count(), 0);
        assert_eq!(grid.index_count(), 0);
        assert_eq!(grid.vertex_count(), 5);
    }

    #[test]
    fn test_vertex_index_is_row_major_in_y() {
        let grid = GridResolution::new(4, 3);
        assert_eq!(grid.vertex_index(0, 0), 0);
        assert_eq!(grid.vertex_index(3, 0), 3);
        assert_eq!(grid.vertex_index(0, 1), 4);
        assert_eq!(grid.vertex_index(3, 2), 11);
    }

    #[test]
    fn test_terrain_vertex_layout() {
        assert_eq!(std::mem::size_of::<TerrainVertex>(), 24);
        let v = TerrainVertex::new([1.0, 2.0, 3.0]);
        assert_eq!(v.normal, [0.0; 3]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 24);
    }

    #[test]
    fn test_viewport_fit_to_aspect() {
        // Too wide: width shrinks to height * aspect.
        let fitted = Viewport::new(2000.0, 720.0).fit_to_aspect(16.0 / 9.0);
        assert!((fitted.width - 1280.0).abs() < 1e-3);
        assert!((fitted.height - 720.0).abs() < 1e-3);

        // Too tall: height shrinks to width / aspect.
        let fitted = Viewport::new(1280.0, 1000.0).fit_to_aspect(16.0 / 9.0);
        assert!((fitted.width - 1280.0).abs() < 1e-3);
        assert!((fitted.height - 720.0).abs() < 1e-3);
    }

    #[test]
    fn test_config_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.height_scale, DEFAULT_HEIGHT_SCALE);
        assert!(config.grid.is_none());
        assert!(config.sea_level.is_none());
        assert_eq!(config.projection.fov_y_deg, DEFAULT_FOV_Y_DEG);
        assert_eq!(config.frame_rate, DEFAULT_FRAME_RATE);
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{
            "shader_name": "terrain",
            "map_name": "alps",
            "sea_level": 23.0,
            "grid": { "x_range": 200, "y_range": 150 },
            "textures": [ { "name": "rock", "unit": 2, "path": "rock.png" } ]
        }"#;
        let config = ViewerConfig::from_json_str(json).unwrap();
        assert_eq!(config.map_name, "alps");
        assert_eq!(config.sea_level, Some(23.0));
        assert_eq!(config.grid, Some(GridResolution::new(200, 150)));
        assert_eq!(config.textures.len(), 1);
        assert_eq!(config.textures[0].unit, 2);
        // Unspecified fields keep their defaults.
        assert_eq!(config.height_scale, DEFAULT_HEIGHT_SCALE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_bad_json() {
        let err = ViewerConfig::from_json_str("{ \"height_scale\": \"tall\" }").unwrap_err();
        assert!(matches!(err, ReliefError::Config(_)));
    }

    #[test]
    fn test_config_validation() {
        assert!(named_config().validate().is_ok());

        let missing_shader = ViewerConfig {
            shader_name: String::new(),
            ..named_config()
        };
        assert!(matches!(
            missing_shader.validate(),
            Err(ReliefError::Config(_))
        ));

        let flat = ViewerConfig {
            height_scale: 0.0,
            ..named_config()
        };
        assert!(flat.validate().is_err());

        let thin = ViewerConfig {
            grid: Some(GridResolution::new(1, 100)),
            ..named_config()
        };
        assert!(matches!(
            thin.validate(),
            Err(ReliefError::InvalidDimensions {
                x_range: 1,
                y_range: 100
            })
        ));

        let mut inverted = named_config();
        inverted.projection.near = 10.0;
        inverted.projection.far = 1.0;
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_sea_level_must_be_non_negative() {
        for level in [-4.0, f32::NAN, f32::INFINITY] {
            let config = ViewerConfig {
                sea_level: Some(level),
                ..named_config()
            };
            assert!(
                matches!(config.validate(), Err(ReliefError::Config(_))),
                "sea level {level}"
            );
        }
        let at_zero = ViewerConfig {
            sea_level: Some(0.0),
            ..named_config()
        };
        assert!(at_zero.validate().is_ok());
    }

    #[test]
    fn test_asset_paths() {
        let config = ViewerConfig {
            resources_dir: PathBuf::from("/data/res"),
            ..named_config()
        };
        assert_eq!(
            config.heightmap_path(),
            PathBuf::from("/data/res/heightmaps/hills.png")
        );
        assert_eq!(config.shader_dir(), PathBuf::from("/data/res/shaders"));
        assert_eq!(config.texture_dir(), PathBuf::from("/data/res/textures"));
    }

    #[test]
    fn test_error_messages_name_the_resource() {
        let err = ReliefError::MissingShaderStage {
            name: "terrain".into(),
            stage: ShaderStage::Fragment,
        };
        assert_eq!(err.to_string(), "shader 'terrain' is missing its fragment stage");

        let err = ReliefError::image_load("maps/alps.png", "file not found");
        assert!(err.to_string().contains("maps/alps.png"));
    }
}
