use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// Where model bytes come from.  Implementations are called from loader
/// worker threads.
pub trait AssetSource: Send + Sync {
    fn fetch(&self, path: &Path) -> Result<Vec<u8>, AssetError>;
}

/// Reads model files relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FsSource {
    fn fetch(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        let full = self.root.join(path);
        let bytes = std::fs::read(&full).map_err(|source| match source.kind() {
            ErrorKind::NotFound => AssetError::NotFound(full.clone()),
            _ => AssetError::Io {
                path: full.clone(),
                source,
            },
        })?;
        if bytes.is_empty() {
            return Err(AssetError::Empty(full));
        }
        Ok(bytes)
    }
}
