// ferrous_core: tipos básicos y utilidades compartidas por el editor

// pointer → normalised device coordinates
pub mod input;

// rays, bounding boxes and the scene picker
pub mod picking;

// headless scene graph + camera
pub mod scene;

pub use input::{MouseButton, PointerEvent, Viewport};
pub use picking::{Aabb, GroundPlane, Picker, Ray, ScenePicker};
pub use scene::{Camera, Element, ElementKind, Handle, World};

// re-export glam so downstream crates agree on the math types
pub use glam;
