use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("`{0}` is reserved for the primitive cube and cannot name an asset")]
    ReservedName(String),
    #[error("asset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("asset file {} is empty", .0.display())]
    Empty(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no loader worker could be started: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("load did not finish within {0:?}")]
    TimedOut(Duration),
}
