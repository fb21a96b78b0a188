//! Name → model mapping, filled in as loads complete.
//!
//! Loads finish in no particular order, so every reader must be ready for a
//! name that is not (yet) present.  [`AssetRegistry::status`] tells "still
//! loading" apart from "failed" and "never requested".

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AssetError;
use crate::prototype::ModelPrototype;

/// Asset name reserved for the primitive cube tool.
pub const RESERVED_CUBE: &str = "cube";

/// Completion of one background load.
#[derive(Debug, Clone)]
pub enum AssetEvent {
    Loaded(Arc<ModelPrototype>),
    LoadFailed { name: String, reason: String },
}

impl AssetEvent {
    pub fn name(&self) -> &str {
        match self {
            AssetEvent::Loaded(proto) => &proto.name,
            AssetEvent::LoadFailed { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    /// Never requested nor inserted.
    Unknown,
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct AssetRegistry {
    models: HashMap<String, Arc<ModelPrototype>>,
    status: HashMap<String, AssetStatus>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loaded model, replacing any earlier one under the same
    /// name.
    pub fn insert(&mut self, prototype: Arc<ModelPrototype>) -> Result<(), AssetError> {
        if prototype.name == RESERVED_CUBE {
            return Err(AssetError::ReservedName(prototype.name.clone()));
        }
        let name = prototype.name.clone();
        if self.models.insert(name.clone(), prototype).is_some() {
            log::debug!("asset `{name}` replaced");
        }
        self.status.insert(name, AssetStatus::Ready);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<ModelPrototype>> {
        self.models.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Names of every ready model, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn status(&self, name: &str) -> AssetStatus {
        self.status
            .get(name)
            .cloned()
            .unwrap_or(AssetStatus::Unknown)
    }

    /// Records that a load for `name` is in flight.  A model already present
    /// stays usable until its replacement arrives.
    pub fn mark_pending(&mut self, name: &str) {
        if !self.models.contains_key(name) {
            self.status.insert(name.to_string(), AssetStatus::Pending);
        }
    }

    pub fn mark_failed(&mut self, name: &str, reason: impl Into<String>) {
        self.status
            .insert(name.to_string(), AssetStatus::Failed(reason.into()));
    }

    /// Folds a load completion into the registry.
    pub fn apply(&mut self, event: AssetEvent) -> Result<(), AssetError> {
        match event {
            AssetEvent::Loaded(proto) => self.insert(proto),
            AssetEvent::LoadFailed { name, reason } => {
                if self.models.contains_key(&name) {
                    // a reload failed; keep serving the previous model
                    log::warn!("reload of `{name}` failed: {reason}");
                } else {
                    self.mark_failed(&name, reason);
                }
                Ok(())
            }
        }
    }
}
