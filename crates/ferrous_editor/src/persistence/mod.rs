//! Saving and restoring the placement store.
//!
//! Layouts are RON documents kept in named slots of a [`LayoutStorage`]:
//!
//! ```ron
//! (
//!   schemaVersion: 1,
//!   objects: [
//!     (assetId: "cube", position: (1.0, 3.0, 3.0), layer: 3),
//!     (assetId: "pikachu", position: (1.4, 3.0, 2.6), layer: 3),
//!   ],
//! )
//! ```
//!
//! Decoding never consults the asset registry; unknown asset names are
//! resolved (or skipped) later, object by object, when the layout is
//! realized.

pub mod codec;
pub mod storage;

use thiserror::Error;

pub use codec::{decode, encode, load_layout, save_layout, SCHEMA_VERSION};
pub use storage::{FileStorage, LayoutStorage, MemoryStorage};

/// Slot name used when the configuration does not pick one.
pub const DEFAULT_SLOT: &str = "mapData";

#[derive(Debug, Error)]
pub enum PersistError {
    /// Nothing has been saved yet.  Not an error from the user's point of
    /// view.
    #[error("no saved layout")]
    NotFound,
    #[error("malformed layout data: {0}")]
    Malformed(String),
    #[error("layout schema version {found} is newer than the supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("could not encode layout: {0}")]
    Encode(#[from] ron::Error),
    #[error("layout storage failed: {0}")]
    Storage(#[from] std::io::Error),
}
