//! Ferrous map editor.
//!
//! Objects are placed on a layered grid, kept in a [`PlacementStore`],
//! mirrored into a `ferrous_core::World` for display and picking, and saved
//! to named storage slots as RON.
//!
//! ```rust,ignore
//! use ferrous_editor::{Command, Editor, EditorConfig, MemoryStorage};
//! use ferrous_core::{Camera, ScenePicker, World};
//! use glam::Vec3;
//!
//! let mut editor = Editor::new(EditorConfig::default(), MemoryStorage::new());
//! let (mut world, camera, picker) = (World::new(), Camera::default(), ScenePicker::default());
//!
//! for cmd in [
//!     Command::SetLayer(3),
//!     Command::ToggleCubePlacement,
//!     Command::PlaceAt { point: Vec3::new(1.4, 0.0, 2.6) },
//!     Command::Save,
//! ] {
//!     editor.dispatch(cmd, &mut world, &camera, &picker);
//! }
//! ```

pub mod app;
pub mod config;
pub mod editor;
pub mod notice;
pub mod persistence;
pub mod placement;
pub mod realize;
pub mod script;
pub mod state;

pub use app::EditorApp;
pub use config::{CameraConfig, EditorConfig, EditorSettings};
pub use editor::Editor;
pub use notice::{Notice, NoticeLevel};
pub use persistence::{FileStorage, LayoutStorage, MemoryStorage, PersistError};
pub use placement::{AssetRef, PlacedObject, PlacementError, PlacementId, PlacementStore, Tool};
pub use realize::{RealizeError, RealizeReport, Realizer, SkippedObject};
pub use script::{parse_script, ScriptError};
pub use state::{reduce, Command, EditorState, LayerRange};
