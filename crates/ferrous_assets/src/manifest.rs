//! The `[assets]` section of the editor configuration.
//!
//! ```toml
//! [assets]
//! root = "assets"
//! timeout_secs = 30
//!
//! [assets.models.pikachu]
//! path = "models/pikachu.glb"
//! half_extent = 0.5
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

fn default_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_half_extent() -> f32 {
    0.5
}

/// One model the editor should fetch at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelEntry {
    /// Path relative to [`AssetManifest::root`].
    pub path: PathBuf,
    /// Half-size of the bounding box used when the file carries no bounds of
    /// its own, in world units.
    #[serde(default = "default_half_extent")]
    pub half_extent: f32,
}

impl ModelEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            half_extent: default_half_extent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetManifest {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Seconds before a pending load is reported as failed.  `0` disables
    /// the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Keyed by the name the asset is placed and saved under.
    #[serde(default)]
    pub models: BTreeMap<String, ModelEntry>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let mut models = BTreeMap::new();
        models.insert("pikachu".to_string(), ModelEntry::new("models/pikachu.glb"));
        models.insert("eevee".to_string(), ModelEntry::new("models/eevee.glb"));
        Self {
            root: default_root(),
            timeout_secs: default_timeout_secs(),
            models,
        }
    }
}

impl AssetManifest {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
