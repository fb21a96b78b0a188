//! Editor mode (active layer and tool) and the commands that drive it.
//!
//! Every user action is a [`Command`].  Mode changes are computed by the
//! pure [`reduce`]; everything that touches placements, storage or the scene
//! is handled by [`crate::Editor::dispatch`].

use ferrous_assets::AssetEvent;
use glam::{Vec2, Vec3};
use serde::Deserialize;

use crate::placement::Tool;

/// Inclusive range of selectable layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayerRange {
    pub min: i32,
    pub max: i32,
}

impl Default for LayerRange {
    fn default() -> Self {
        Self { min: 0, max: 4 }
    }
}

impl LayerRange {
    pub fn clamp(&self, layer: i32) -> i32 {
        layer.clamp(self.min, self.max.max(self.min))
    }

    pub fn contains(&self, layer: i32) -> bool {
        (self.min..=self.max).contains(&layer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    pub layer: i32,
    pub tool: Tool,
}

impl EditorState {
    pub fn is_placing_cube(&self) -> bool {
        self.tool == Tool::Cube
    }

    pub fn selected_asset(&self) -> Option<&str> {
        match &self.tool {
            Tool::Asset(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Command {
    SetLayer(i32),
    SelectAsset(String),
    /// Cube placement on if it was off (whatever else was selected), off
    /// otherwise.
    ToggleCubePlacement,
    ClearTool,
    /// Pointer press, already converted to normalised device coordinates.
    Click { ndc: Vec2 },
    /// Place at an already-picked world point.
    PlaceAt { point: Vec3 },
    /// Remove the `index`-th placed object (insertion order).
    Remove { index: usize },
    /// Move the `index`-th placed object to `point` on the active layer.
    Move { index: usize, point: Vec3 },
    Save,
    Load,
    /// A background asset load finished.
    Asset(AssetEvent),
}

impl Command {
    /// `true` for commands [`reduce`] handles.
    pub fn is_mode_change(&self) -> bool {
        matches!(
            self,
            Command::SetLayer(_)
                | Command::SelectAsset(_)
                | Command::ToggleCubePlacement
                | Command::ClearTool
        )
    }
}

/// Computes the next mode.  Commands that are not mode changes return the
/// state unchanged.
pub fn reduce(state: &EditorState, command: &Command, layers: &LayerRange) -> EditorState {
    match command {
        Command::SetLayer(layer) => EditorState {
            layer: layers.clamp(*layer),
            ..state.clone()
        },
        Command::SelectAsset(name) => EditorState {
            tool: Tool::Asset(name.clone()),
            ..state.clone()
        },
        Command::ToggleCubePlacement => EditorState {
            tool: if state.tool == Tool::Cube {
                Tool::None
            } else {
                Tool::Cube
            },
            ..state.clone()
        },
        Command::ClearTool => EditorState {
            tool: Tool::None,
            ..state.clone()
        },
        _ => state.clone(),
    }
}
