//! Scene world: the headless node graph placed objects are mirrored into.
//!
//! `World` uses a `HashMap` keyed by a monotonically-increasing `u64` ID so
//! that handles remain stable across insertions and removals.  Nodes here are
//! disposable projections: the editor can always rebuild them from its own
//! records, so nothing in `World` is ever persisted.
//!
//! # Quick start
//! ```rust,ignore
//! use ferrous_core::{World, ElementKind, Aabb};
//! use glam::Vec3;
//!
//! let mut world = World::new();
//!
//! let h = world.spawn("pikachu")
//!     .with_kind(ElementKind::Mesh { asset_key: "pikachu".into(), bounds: Aabb::unit_cube() })
//!     .with_position(Vec3::new(1.4, 3.0, 2.6))
//!     .build();
//!
//! world.set_position(h, Vec3::new(1.0, 0.0, 0.0));
//! world.despawn(h);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;

use crate::picking::Aabb;

// ─── ID generation ─────────────────────────────────────────────────────────

static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

// ─── Handle ────────────────────────────────────────────────────────────────

/// Opaque handle referencing a node inside a [`World`].
///
/// Handles are stable: removing other nodes does not invalidate existing
/// handles.  A handle becomes invalid only after the node it refers to is
/// despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub u64);

// ─── Element kinds ─────────────────────────────────────────────────────────

/// What a node draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A solid box defined by a half-extent in world units.
    Cube { half_extent: f32 },
    /// An instance of a loaded model, identified by its registry key.
    Mesh { asset_key: String, bounds: Aabb },
}

impl Default for ElementKind {
    fn default() -> Self {
        ElementKind::Cube { half_extent: 0.5 }
    }
}

impl ElementKind {
    /// Object-space bounds.
    pub fn local_bounds(&self) -> Aabb {
        match self {
            ElementKind::Cube { half_extent } => Aabb::centered(*half_extent),
            ElementKind::Mesh { bounds, .. } => *bounds,
        }
    }
}

// ─── Node entry ────────────────────────────────────────────────────────────

/// Complete data for one scene node.
#[derive(Debug, Clone)]
pub struct Element {
    /// Unique, stable identifier (mirrors the HashMap key for convenience).
    pub id: u64,
    /// Human-readable label.
    pub name: String,
    /// World-space position of the node origin.
    pub position: Vec3,
    /// Packed `0xRRGGBB` tint.
    pub color: u32,
    pub kind: ElementKind,
    /// Whether the node is drawn (and pickable).
    pub visible: bool,
}

impl Element {
    fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: Vec3::ZERO,
            color: 0xFFFFFF,
            kind: ElementKind::default(),
            visible: true,
        }
    }

    /// Bounds in world space.
    pub fn world_bounds(&self) -> Aabb {
        self.kind.local_bounds().translated(self.position)
    }
}

// ─── Node builder ──────────────────────────────────────────────────────────

/// Fluent builder returned by [`World::spawn`].
///
/// Call `.build()` to insert the node and receive its [`Handle`].
pub struct EntityBuilder<'a> {
    world: &'a mut World,
    element: Element,
}

impl<'a> EntityBuilder<'a> {
    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.element.position = pos;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.element.color = color;
        self
    }

    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.element.kind = kind;
        self
    }

    /// Finalise the builder, insert the node, and return its handle.
    pub fn build(self) -> Handle {
        let id = self.element.id;
        self.world.entities.insert(id, self.element);
        Handle(id)
    }
}

// ─── World ─────────────────────────────────────────────────────────────────

/// The node container the editor realizes its placements into.
#[derive(Debug, Default)]
pub struct World {
    entities: HashMap<u64, Element>,
}

impl World {
    /// Tint used for primitive cubes.
    pub const CUBE_COLOR: u32 = 0x00FF00;

    /// Creates an empty world.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    // ── Spawning ───────────────────────────────────────────────────────────

    /// Begin building a new node with the given name.
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityBuilder<'_> {
        let id = next_id();
        EntityBuilder {
            world: self,
            element: Element::new(id, name),
        }
    }

    /// Convenience: spawn a green unit cube at the given position.
    pub fn spawn_cube(&mut self, name: impl Into<String>, position: Vec3) -> Handle {
        self.spawn(name)
            .with_kind(ElementKind::Cube { half_extent: 0.5 })
            .with_color(Self::CUBE_COLOR)
            .with_position(position)
            .build()
    }

    // ── Despawn ────────────────────────────────────────────────────────────

    /// Remove the node from the world.  Returns `true` if it existed.
    pub fn despawn(&mut self, handle: Handle) -> bool {
        self.entities.remove(&handle.0).is_some()
    }

    // ── Position ───────────────────────────────────────────────────────────

    /// Overwrite the world-space position.
    pub fn set_position(&mut self, handle: Handle, pos: Vec3) {
        if let Some(e) = self.entities.get_mut(&handle.0) {
            e.position = pos;
        }
    }

    /// Read the world-space position.
    pub fn position(&self, handle: Handle) -> Option<Vec3> {
        self.entities.get(&handle.0).map(|e| e.position)
    }

    // ── Visibility ─────────────────────────────────────────────────────────

    pub fn set_visible(&mut self, handle: Handle, visible: bool) {
        if let Some(e) = self.entities.get_mut(&handle.0) {
            e.visible = visible;
        }
    }

    // ── Raw element access ─────────────────────────────────────────────────

    pub fn get(&self, handle: Handle) -> Option<&Element> {
        self.entities.get(&handle.0)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Element> {
        self.entities.get_mut(&handle.0)
    }

    /// Returns `true` if the world contains this handle.
    pub fn contains(&self, handle: Handle) -> bool {
        self.entities.contains_key(&handle.0)
    }

    // ── Iteration ──────────────────────────────────────────────────────────

    /// Iterate over all nodes (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.entities.values()
    }

    /// Total number of nodes currently alive.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────
