//! Ordered arena of placed-object records.
//!
//! Records live in a `SlotMap` so ids stay valid across unrelated removals;
//! a separate id list keeps insertion order, which is the order objects are
//! listed, saved and restored in.

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};

use super::PlacedObject;

new_key_type! {
    /// Stable identity of a placed object.
    pub struct PlacementId;
}

#[derive(Debug, Default, Clone)]
pub struct PlacementStore {
    records: SlotMap<PlacementId, PlacedObject>,
    order: Vec<PlacementId>,
}

impl PlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns its id.
    pub fn insert(&mut self, object: PlacedObject) -> PlacementId {
        let id = self.records.insert(object);
        self.order.push(id);
        id
    }

    pub fn get(&self, id: PlacementId) -> Option<&PlacedObject> {
        self.records.get(id)
    }

    pub fn contains(&self, id: PlacementId) -> bool {
        self.records.contains_key(id)
    }

    /// Removes one record; later records keep their relative order.
    pub fn remove(&mut self, id: PlacementId) -> Option<PlacedObject> {
        let removed = self.records.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(removed)
    }

    /// Overwrites a record's position.  Returns `false` for unknown ids.
    pub fn set_position(&mut self, id: PlacementId, position: Vec3) -> bool {
        match self.records.get_mut(id) {
            Some(record) => {
                record.position = position;
                true
            }
            None => false,
        }
    }

    pub(crate) fn get_mut(&mut self, id: PlacementId) -> Option<&mut PlacedObject> {
        self.records.get_mut(id)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PlacementId, &PlacedObject)> + '_ {
        self.order.iter().map(move |&id| (id, &self.records[id]))
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[PlacementId] {
        &self.order
    }

    /// Id of the `index`-th record in insertion order.
    pub fn id_at(&self, index: usize) -> Option<PlacementId> {
        self.order.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    /// Clears the store and refills it with `objects`, keeping their order.
    pub fn replace_all(&mut self, objects: impl IntoIterator<Item = PlacedObject>) -> Vec<PlacementId> {
        self.clear();
        objects.into_iter().map(|o| self.insert(o)).collect()
    }

    /// Plain copies of the records, in order.
    pub fn to_vec(&self) -> Vec<PlacedObject> {
        self.iter().map(|(_, o)| o.clone()).collect()
    }
}
