use glam::Vec3;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use super::storage::LayoutStorage;
use super::PersistError;
use crate::placement::{in_bounds, AssetRef, PlacedObject, PlacementStore};

/// Version written into every saved document.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementRecord {
    asset_id: AssetRef,
    /// `(x, y, z)`
    position: [f32; 3],
    layer: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutDocument {
    schema_version: u32,
    objects: Vec<PlacementRecord>,
}

impl From<&PlacedObject> for PlacementRecord {
    fn from(o: &PlacedObject) -> Self {
        Self {
            asset_id: o.asset.clone(),
            position: o.position.to_array(),
            layer: o.layer,
        }
    }
}

impl PlacementRecord {
    fn into_object(self, index: usize) -> Result<PlacedObject, PersistError> {
        let position = Vec3::from(self.position);
        if !in_bounds(position) {
            return Err(PersistError::Malformed(format!(
                "object {index}: position {position} out of range"
            )));
        }
        if let AssetRef::Named(name) = &self.asset_id {
            if name.is_empty() {
                return Err(PersistError::Malformed(format!(
                    "object {index}: empty assetId"
                )));
            }
        }
        Ok(PlacedObject {
            asset: self.asset_id,
            position,
            layer: self.layer,
        })
    }
}

/// Serialises the store, in insertion order.
pub fn encode(store: &PlacementStore) -> Result<String, PersistError> {
    let doc = LayoutDocument {
        schema_version: SCHEMA_VERSION,
        objects: store.iter().map(|(_, o)| PlacementRecord::from(o)).collect(),
    };
    let config = PrettyConfig::new()
        .depth_limit(2)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(&doc, config)?)
}

/// Parses a saved layout.
///
/// Empty text means nothing was saved (`NotFound`).  Anything unparsable,
/// a record missing `assetId`/`position`/`layer`, or a non-finite
/// coordinate is `Malformed`.  A bare record list, as written before
/// documents carried a version, is read as version 0.
pub fn decode(text: &str) -> Result<Vec<PlacedObject>, PersistError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PersistError::NotFound);
    }

    let records = if trimmed.starts_with('[') {
        ron::from_str::<Vec<PlacementRecord>>(trimmed)
            .map_err(|e| PersistError::Malformed(e.to_string()))?
    } else {
        let doc: LayoutDocument =
            ron::from_str(trimmed).map_err(|e| PersistError::Malformed(e.to_string()))?;
        if doc.schema_version > SCHEMA_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: doc.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        doc.objects
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_object(i))
        .collect()
}

/// Encodes `store` into `slot`.  Returns the number of objects written.
pub fn save_layout<S: LayoutStorage + ?Sized>(
    storage: &mut S,
    slot: &str,
    store: &PlacementStore,
) -> Result<usize, PersistError> {
    let text = encode(store)?;
    storage.write(slot, &text)?;
    log::info!("saved {} objects to slot `{slot}`", store.len());
    Ok(store.len())
}

/// Reads and decodes `slot`.  An absent slot is `NotFound`.
pub fn load_layout<S: LayoutStorage + ?Sized>(
    storage: &S,
    slot: &str,
) -> Result<Vec<PlacedObject>, PersistError> {
    let text = storage.read(slot)?.ok_or(PersistError::NotFound)?;
    let objects = decode(&text)?;
    log::debug!("decoded {} objects from slot `{slot}`", objects.len());
    Ok(objects)
}
