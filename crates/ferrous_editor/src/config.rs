//! The editor's TOML configuration.
//!
//! ```toml
//! [app]
//! title = "Ferrous Map Editor"
//!
//! [editor]
//! grid_size = 20.0
//! grid_step = 1.0
//! slot = "mapData"
//! storage_dir = "saves"
//!
//! [editor.layers]
//! min = 0
//! max = 4
//!
//! [camera]
//! eye = [10.0, 10.0, 20.0]
//! fov_degrees = 75.0
//!
//! [assets.models.pikachu]
//! path = "models/pikachu.glb"
//! ```
//!
//! Every table and field is optional.

use std::path::PathBuf;

use ferrous_app::AppConfig;
use ferrous_assets::AssetManifest;
use ferrous_core::{Camera, GroundPlane};
use glam::Vec3;
use serde::Deserialize;

use crate::persistence::DEFAULT_SLOT;
use crate::state::LayerRange;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side length of the square ground grid.
    pub grid_size: f32,
    /// Cell size cube placements snap to.
    pub grid_step: f32,
    /// Storage slot `save`/`load` use.
    pub slot: String,
    pub storage_dir: PathBuf,
    pub layers: LayerRange,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            grid_step: 1.0,
            slot: DEFAULT_SLOT.to_string(),
            storage_dir: PathBuf::from("saves"),
            layers: LayerRange::default(),
        }
    }
}

impl EditorConfig {
    pub fn ground(&self) -> GroundPlane {
        GroundPlane::from_grid_size(self.grid_size)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [10.0, 10.0, 20.0],
            target: [0.0; 3],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Camera with the given viewport aspect.
    pub fn to_camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: Vec3::from(self.eye),
            target: Vec3::from(self.target),
            up: Vec3::Y,
            fovy: self.fov_degrees.to_radians(),
            aspect,
            znear: self.near,
            zfar: self.far,
        }
    }
}

/// The whole `editor.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct EditorSettings {
    pub app: AppConfig,
    pub editor: EditorConfig,
    pub camera: CameraConfig,
    pub assets: AssetManifest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_app::parse_toml;

    #[test]
    fn empty_file_gives_defaults() {
        let s: EditorSettings = parse_toml("").unwrap();
        assert_eq!(s, EditorSettings::default());
        assert_eq!(s.editor.slot, "mapData");
        assert_eq!(s.editor.layers, LayerRange { min: 0, max: 4 });
        assert!(s.assets.models.contains_key("pikachu"));
    }

    #[test]
    fn default_camera_matches_core_default() {
        let cam = CameraConfig::default().to_camera(1.0);
        assert_eq!(cam, Camera::default());
    }

    #[test]
    fn tables_override_fields() {
        let s: EditorSettings = parse_toml(
            r#"
            [app]
            width = 640
            [editor]
            grid_step = 0.5
            slot = "level2"
            [editor.layers]
            max = 9
            [camera]
            eye = [0.0, 30.0, 0.0]
            [assets]
            timeout_secs = 0
            [assets.models.mew]
            path = "models/mew.glb"
            half_extent = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(s.app.width, 640);
        assert_eq!(s.editor.grid_step, 0.5);
        assert_eq!(s.editor.slot, "level2");
        assert_eq!(s.editor.layers, LayerRange { min: 0, max: 9 });
        assert_eq!(s.camera.eye, [0.0, 30.0, 0.0]);
        assert_eq!(s.camera.far, 1000.0);
        assert!(s.assets.timeout().is_none());
        assert_eq!(s.assets.models["mew"].half_extent, 1.5);
    }
}
