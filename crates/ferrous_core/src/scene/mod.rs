//! Lightweight scene helpers: the headless node graph and the camera.

pub mod camera;
pub mod world;

pub use camera::Camera;
pub use world::{Element, ElementKind, World};
// also expose the handle type so callers don't need to reach into the
// submodule.
pub use world::Handle;
