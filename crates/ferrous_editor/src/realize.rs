//! Mirrors placement records into the scene `World`.
//!
//! The index maps each record to the node showing it.  It is derived state:
//! dropping it and calling [`Realizer::sync`] on an empty world rebuilds
//! the same picture.
//!
//! ## Three-phase reconciliation
//!
//! 1. **Remove** nodes whose record is gone from the store.
//! 2. **Spawn** nodes for records that have none yet.
//! 3. **Update** the position of every surviving node.
//!
//! A record whose asset is not in the registry is skipped and stays
//! unrealized; the next `sync` after the asset arrives picks it up.

use std::collections::HashMap;

use ferrous_assets::AssetRegistry;
use ferrous_core::{ElementKind, Handle, World};
use thiserror::Error;

use crate::placement::{AssetRef, PlacementId, PlacementStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RealizeError {
    #[error("placement no longer exists")]
    UnknownPlacement,
    #[error("asset `{0}` is not loaded")]
    UnresolvedAsset(String),
}

/// A record `sync` could not show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedObject {
    pub id: PlacementId,
    pub asset: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RealizeReport {
    /// Nodes spawned by this pass.
    pub realized: usize,
    pub removed: usize,
    pub skipped: Vec<SkippedObject>,
}

impl RealizeReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Realizer {
    nodes: HashMap<PlacementId, Handle>,
}

impl Realizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self, id: PlacementId) -> Option<Handle> {
        self.nodes.get(&id).copied()
    }

    pub fn is_realized(&self, id: PlacementId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of records currently shown.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Spawns the node for one record, or returns the existing one.
    pub fn realize(
        &mut self,
        id: PlacementId,
        store: &PlacementStore,
        registry: &AssetRegistry,
        world: &mut World,
    ) -> Result<Handle, RealizeError> {
        let object = store.get(id).ok_or(RealizeError::UnknownPlacement)?;
        if let Some(handle) = self.handle(id) {
            if world.contains(handle) {
                return Ok(handle);
            }
        }

        let handle = match &object.asset {
            AssetRef::Cube => world.spawn_cube(object.asset.as_str(), object.position),
            AssetRef::Named(name) => {
                let proto = registry
                    .get(name)
                    .ok_or_else(|| RealizeError::UnresolvedAsset(name.clone()))?;
                world
                    .spawn(name.as_str())
                    .with_kind(ElementKind::Mesh {
                        asset_key: proto.name.clone(),
                        bounds: proto.bounds,
                    })
                    .with_position(object.position)
                    .build()
            }
        };
        self.nodes.insert(id, handle);
        Ok(handle)
    }

    /// Despawns the node for `id`, if any.
    pub fn unrealize(&mut self, id: PlacementId, world: &mut World) -> bool {
        match self.nodes.remove(&id) {
            Some(handle) => world.despawn(handle),
            None => false,
        }
    }

    /// Brings `world` in line with `store`.  Calling it twice in a row
    /// changes nothing the second time.
    pub fn sync(
        &mut self,
        store: &PlacementStore,
        registry: &AssetRegistry,
        world: &mut World,
    ) -> RealizeReport {
        let mut report = RealizeReport::default();

        // ── Phase 1: remove nodes of deleted records ───────────────────────
        let stale: Vec<PlacementId> = self
            .nodes
            .keys()
            .filter(|id| !store.contains(**id))
            .copied()
            .collect();
        for id in stale {
            self.unrealize(id, world);
            report.removed += 1;
        }

        for (id, object) in store.iter() {
            // ── Phase 3: update survivors ──────────────────────────────────
            if let Some(handle) = self.handle(id).filter(|h| world.contains(*h)) {
                if world.position(handle) != Some(object.position) {
                    world.set_position(handle, object.position);
                }
                // a reloaded model may come with different bounds
                if let (AssetRef::Named(name), Some(node)) = (&object.asset, world.get_mut(handle)) {
                    if let (ElementKind::Mesh { bounds, .. }, Some(proto)) =
                        (&mut node.kind, registry.get(name))
                    {
                        *bounds = proto.bounds;
                    }
                }
                continue;
            }

            // ── Phase 2: spawn missing ─────────────────────────────────────
            match self.realize(id, store, registry, world) {
                Ok(_) => report.realized += 1,
                Err(RealizeError::UnresolvedAsset(asset)) => {
                    report.skipped.push(SkippedObject { id, asset });
                }
                Err(RealizeError::UnknownPlacement) => {}
            }
        }

        if report.realized > 0 || report.removed > 0 {
            log::debug!(
                "sync: {} spawned, {} removed, {} skipped",
                report.realized,
                report.removed,
                report.skipped.len()
            );
        }
        report
    }

    /// Despawns every node this realizer created.
    pub fn clear(&mut self, world: &mut World) {
        for (_, handle) in self.nodes.drain() {
            world.despawn(handle);
        }
    }
}
