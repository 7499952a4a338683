//! Scene description and run configuration files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use scribble_extrude::ExtrudeParams;
use scribble_path::ContourPath;
use scribble_quad::{DetectionRegion, MapperConfig, PlaneRayCaster};
use serde::Deserialize;

/// Everything one capture needs: the screen, the tracked floor, the drawing.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    /// Detection square on the viewport.
    pub region: DetectionRegion,
    /// Camera and tracked plane used for ray casting.
    pub tracking: PlaneRayCaster,
    /// Detected contour in the unit square.
    pub contour: ContourPath,
}

impl SceneFile {
    /// Read and validate a JSON scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        let scene: SceneFile = serde_json::from_str(&json)
            .with_context(|| format!("parsing scene {}", path.display()))?;
        scene
            .contour
            .validate()
            .with_context(|| format!("invalid contour in {}", path.display()))?;
        Ok(scene)
    }
}

/// Settings read from an optional TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Quad mapper settings.
    pub mapper: MapperConfig,
    /// Solid settings. Its geometry scale always follows the mapper's.
    pub extrude: ExtrudeParams,
    /// How far above the viewport centre the drop point sits, in screen points.
    pub drop_offset: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mapper: MapperConfig::default(),
            extrude: ExtrudeParams::default(),
            drop_offset: 150.0,
        }
    }
}

impl RunConfig {
    /// Load from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                toml::from_str::<RunConfig>(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RunConfig::default(),
        };
        config.sync_scale();
        Ok(config)
    }

    /// Make the extrusion scale match the mapper's.
    pub fn sync_scale(&mut self) {
        self.extrude.geometry_scale = self.mapper.geometry_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use scribble_quad::ContourFrame;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut config: RunConfig = toml::from_str(
            r#"
            [mapper]
            geometry_scale = 20.0
            frame = "bottom_left"

            [extrude]
            depth = 0.02
            "#,
        )
        .unwrap();
        config.sync_scale();
        assert_eq!(config.mapper.frame, ContourFrame::BottomLeft);
        assert_abs_diff_eq!(config.extrude.geometry_scale, 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(config.extrude.depth, 0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(config.extrude.drop_height, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(config.drop_offset, 150.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scene_json() {
        let json = r#"{
            "region": { "viewport_width": 640.0, "viewport_height": 480.0 },
            "tracking": {
                "camera": {
                    "position": [0.0, 1.0, 0.0],
                    "yaw": 0.0,
                    "pitch": -1.5707963267948966,
                    "focal_length": 500.0,
                    "viewport_width": 640.0,
                    "viewport_height": 480.0
                },
                "plane_y": 0.0
            },
            "contour": { "elements": [
                { "op": "move_to", "to": [0.2, 0.2] },
                { "op": "line_to", "to": [0.8, 0.2] },
                { "op": "line_to", "to": [0.5, 0.8] },
                { "op": "close" }
            ] }
        }"#;
        let scene: SceneFile = serde_json::from_str(json).unwrap();
        assert_eq!(scene.region.size, 320.0);
        assert_eq!(scene.tracking.half_extent, None);
        assert_eq!(scene.contour.len(), 4);
    }
}
