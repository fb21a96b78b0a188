//! Placed-object records and the rules for creating them.
//!
//! Records are the durable source of truth; the scene nodes that show them
//! are derived by [`crate::realize`].

pub mod engine;
pub mod store;

use std::fmt;

use ferrous_assets::RESERVED_CUBE;
use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use engine::{place_at, relocate, snap_to_grid, PlacementError};
pub use store::{PlacementId, PlacementStore};

/// Largest absolute coordinate a placed object may have.  Anything beyond
/// it, or non-finite, is refused when placing and when loading.
pub const MAX_COORD: f32 = 1_000_000.0;

/// `true` when every component is finite and within [`MAX_COORD`].
pub fn in_bounds(position: Vec3) -> bool {
    position
        .to_array()
        .iter()
        .all(|c| c.is_finite() && c.abs() <= MAX_COORD)
}

/// What a placement shows: the primitive cube or a registry asset.
///
/// Serialised as a bare string; `"cube"` is the primitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetRef {
    Cube,
    Named(String),
}

impl AssetRef {
    pub fn as_str(&self) -> &str {
        match self {
            AssetRef::Cube => RESERVED_CUBE,
            AssetRef::Named(name) => name,
        }
    }

    pub fn is_cube(&self) -> bool {
        matches!(self, AssetRef::Cube)
    }
}

impl From<String> for AssetRef {
    fn from(s: String) -> Self {
        if s == RESERVED_CUBE {
            AssetRef::Cube
        } else {
            AssetRef::Named(s)
        }
    }
}

impl From<&str> for AssetRef {
    fn from(s: &str) -> Self {
        AssetRef::from(s.to_string())
    }
}

impl From<AssetRef> for String {
    fn from(a: AssetRef) -> Self {
        match a {
            AssetRef::Cube => RESERVED_CUBE.to_string(),
            AssetRef::Named(name) => name,
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One object placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub asset: AssetRef,
    /// World position; `y` equals `layer` for everything the engine creates.
    pub position: Vec3,
    pub layer: i32,
}

impl PlacedObject {
    pub fn new(asset: impl Into<AssetRef>, position: Vec3, layer: i32) -> Self {
        Self {
            asset: asset.into(),
            position,
            layer,
        }
    }
}

/// The editor's placement mode.  Being an enum, at most one tool is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    None,
    Cube,
    Asset(String),
}
