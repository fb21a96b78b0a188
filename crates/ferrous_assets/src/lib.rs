//! Asset utilities for the Ferrous map editor.
//!
//! Models are fetched in the background by an [`AssetLoader`]; each finished
//! (or failed) fetch comes back as an [`AssetEvent`] that the host folds into
//! its [`AssetRegistry`] on its own thread.  Model bytes are kept opaque; only
//! the glTF document is read to find the bounds used for picking.

pub mod bounds;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod prototype;
pub mod registry;
pub mod source;

pub use bounds::gltf_bounds;
pub use error::AssetError;
pub use loader::AssetLoader;
pub use manifest::{AssetManifest, ModelEntry};
pub use prototype::ModelPrototype;
pub use registry::{AssetEvent, AssetRegistry, AssetStatus, RESERVED_CUBE};
pub use source::{AssetSource, FsSource};
