//! Turns a picked point into a placed object.
//!
//! Cubes snap to the grid horizontally; assets keep the picked `x`/`z`.
//! Either way the height is forced to the active layer.

use ferrous_assets::AssetRegistry;
use glam::Vec3;
use thiserror::Error;

use super::store::{PlacementId, PlacementStore};
use super::{in_bounds, AssetRef, PlacedObject, Tool, MAX_COORD};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("asset `{0}` is not loaded")]
    UnknownAsset(String),
    #[error("no placed object with that id")]
    UnknownPlacement,
    #[error("position is not finite or lies beyond ±{MAX_COORD}")]
    OutOfBounds,
}

/// Rounds `value` to the nearest multiple of `step`; halves go up
/// (`-1.5 → -1`, `2.5 → 3`).  A non-positive `step` leaves `value` as is.
pub fn snap_to_grid(value: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    let q = value / step;
    let f = q.floor();
    // `q - f` is exact; adding 0.5 to `q` first is not
    (if q - f >= 0.5 { f + 1.0 } else { f }) * step
}

fn placement_position(asset: &AssetRef, point: Vec3, layer: i32, grid_step: f32) -> Vec3 {
    let (x, z) = if asset.is_cube() {
        (snap_to_grid(point.x, grid_step), snap_to_grid(point.z, grid_step))
    } else {
        (point.x, point.z)
    };
    Vec3::new(x, layer as f32, z)
}

/// Places an object for `tool` at the picked `point` on `layer`.
///
/// Returns `Ok(None)` when no tool is active.  Named assets must already be
/// in `registry`, and the resulting position must be [`in_bounds`];
/// otherwise the store is left untouched.
pub fn place_at(
    point: Vec3,
    layer: i32,
    tool: &Tool,
    registry: &AssetRegistry,
    store: &mut PlacementStore,
    grid_step: f32,
) -> Result<Option<PlacementId>, PlacementError> {
    let asset = match tool {
        Tool::None => return Ok(None),
        Tool::Cube => AssetRef::Cube,
        Tool::Asset(name) => {
            if !registry.contains(name) {
                return Err(PlacementError::UnknownAsset(name.clone()));
            }
            AssetRef::Named(name.clone())
        }
    };

    let position = placement_position(&asset, point, layer, grid_step);
    if !in_bounds(position) {
        return Err(PlacementError::OutOfBounds);
    }
    log::debug!("placing {asset} at {position} on layer {layer}");
    Ok(Some(store.insert(PlacedObject {
        asset,
        position,
        layer,
    })))
}

/// Moves an existing object to `point` on `layer`, with the same snapping
/// rules it was placed with.
pub fn relocate(
    store: &mut PlacementStore,
    id: PlacementId,
    point: Vec3,
    layer: i32,
    grid_step: f32,
) -> Result<Vec3, PlacementError> {
    let record = store.get_mut(id).ok_or(PlacementError::UnknownPlacement)?;
    let position = placement_position(&record.asset, point, layer, grid_step);
    if !in_bounds(position) {
        return Err(PlacementError::OutOfBounds);
    }
    record.position = position;
    record.layer = layer;
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_assets::ModelPrototype;
    use ferrous_core::Aabb;
    use std::sync::Arc;

    fn registry_with(names: &[&str]) -> AssetRegistry {
        let mut reg = AssetRegistry::new();
        for name in names {
            reg.insert(Arc::new(ModelPrototype::new(
                *name,
                format!("{name}.glb"),
                vec![0u8],
                Aabb::unit_cube(),
            )))
            .unwrap();
        }
        reg
    }

    #[test]
    fn snapping_rounds_halves_up() {
        assert_eq!(snap_to_grid(1.4, 1.0), 1.0);
        assert_eq!(snap_to_grid(2.6, 1.0), 3.0);
        assert_eq!(snap_to_grid(2.5, 1.0), 3.0);
        assert_eq!(snap_to_grid(-1.5, 1.0), -1.0);
        assert_eq!(snap_to_grid(-1.6, 1.0), -2.0);
        assert_eq!(snap_to_grid(1.3, 0.5), 1.5);
        assert_eq!(snap_to_grid(1.3, 0.0), 1.3);
        // just below a half must not round up
        assert_eq!(snap_to_grid(0.49999997, 1.0), 0.0);
        assert_eq!(snap_to_grid(-0.50000006, 1.0), -1.0);
    }

    #[test]
    fn out_of_bounds_points_are_refused() {
        let mut store = PlacementStore::new();
        for point in [
            Vec3::new(2e6, 0.0, 0.0),
            Vec3::new(1.0, 0.0, f32::NAN),
            Vec3::new(f32::INFINITY, 0.0, 0.0),
        ] {
            let err = place_at(point, 0, &Tool::Cube, &AssetRegistry::new(), &mut store, 1.0)
                .unwrap_err();
            assert_eq!(err, PlacementError::OutOfBounds);
        }
        assert!(store.is_empty());

        let id = store.insert(PlacedObject::new("cube", Vec3::ONE, 1));
        let err = relocate(&mut store, id, Vec3::new(0.0, 0.0, -3e6), 1, 1.0).unwrap_err();
        assert_eq!(err, PlacementError::OutOfBounds);
        assert_eq!(store.get(id).unwrap().position, Vec3::ONE);
    }

    #[test]
    fn cube_snaps_and_takes_layer_height() {
        let mut store = PlacementStore::new();
        let id = place_at(
            Vec3::new(1.4, 7.2, 2.6),
            3,
            &Tool::Cube,
            &AssetRegistry::new(),
            &mut store,
            1.0,
        )
        .unwrap()
        .unwrap();
        let obj = store.get(id).unwrap();
        assert_eq!(obj.asset, AssetRef::Cube);
        assert_eq!(obj.position, Vec3::new(1.0, 3.0, 3.0));
        assert_eq!(obj.layer, 3);
    }

    #[test]
    fn asset_keeps_horizontal_point() {
        let reg = registry_with(&["pikachu"]);
        let mut store = PlacementStore::new();
        let id = place_at(
            Vec3::new(1.4, 0.25, 2.6),
            3,
            &Tool::Asset("pikachu".into()),
            &reg,
            &mut store,
            1.0,
        )
        .unwrap()
        .unwrap();
        let obj = store.get(id).unwrap();
        assert_eq!(obj.asset, AssetRef::Named("pikachu".into()));
        assert_eq!(obj.position, Vec3::new(1.4, 3.0, 2.6));
    }

    #[test]
    fn unknown_asset_leaves_store_unchanged() {
        let reg = registry_with(&["pikachu"]);
        let mut store = PlacementStore::new();
        store.insert(PlacedObject::new("cube", Vec3::ZERO, 0));

        let err = place_at(
            Vec3::ZERO,
            0,
            &Tool::Asset("eevee".into()),
            &reg,
            &mut store,
            1.0,
        )
        .unwrap_err();
        assert_eq!(err, PlacementError::UnknownAsset("eevee".into()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn no_tool_is_a_no_op() {
        let mut store = PlacementStore::new();
        let placed = place_at(
            Vec3::ONE,
            1,
            &Tool::None,
            &AssetRegistry::new(),
            &mut store,
            1.0,
        )
        .unwrap();
        assert!(placed.is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn relocate_reapplies_snapping_rules() {
        let mut store = PlacementStore::new();
        let cube = store.insert(PlacedObject::new("cube", Vec3::ZERO, 0));
        let model = store.insert(PlacedObject::new("eevee", Vec3::ZERO, 0));

        let p = relocate(&mut store, cube, Vec3::new(4.6, 9.0, -0.2), 2, 1.0).unwrap();
        assert_eq!(p, Vec3::new(5.0, 2.0, 0.0));
        let p = relocate(&mut store, model, Vec3::new(4.6, 9.0, -0.2), 1, 1.0).unwrap();
        assert_eq!(p, Vec3::new(4.6, 1.0, -0.2));
        assert_eq!(store.get(model).unwrap().layer, 1);

        store.remove(cube);
        assert_eq!(
            relocate(&mut store, cube, Vec3::ZERO, 0, 1.0),
            Err(PlacementError::UnknownPlacement)
        );
    }
}
