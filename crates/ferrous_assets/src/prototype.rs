use std::path::PathBuf;
use std::sync::Arc;

use ferrous_core::Aabb;

/// A loaded model that placements clone when they are realized.
///
/// The bytes are kept as-is; only the registry key and the bounds matter to
/// the editor.
#[derive(Debug, Clone)]
pub struct ModelPrototype {
    pub name: String,
    /// Where the bytes came from, relative to the asset root.
    pub source: PathBuf,
    pub bytes: Arc<[u8]>,
    /// Object-space bounds, used for picking against placed instances.
    pub bounds: Aabb,
}

impl ModelPrototype {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        bytes: impl Into<Arc<[u8]>>,
        bounds: Aabb,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            bytes: bytes.into(),
            bounds,
        }
    }

    /// Size of the raw model data in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}
