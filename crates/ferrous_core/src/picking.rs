//! # Picking
//!
//! Converts a pointer position into a world-space point by casting a ray
//! from the camera and intersecting it with the scene.
//!
//! ## How it works
//!
//! 1. **Pointer to ray**: [`Camera::ray_from_ndc`] unprojects the NDC
//!    position through the inverse view-projection.
//! 2. **Ray-scene intersection**: every visible [`World`] node is tested
//!    through its world-space [`Aabb`], plus the bounded ground plane the
//!    grid is drawn on.
//! 3. **Nearest hit**: the closest intersection along the ray wins.
//!
//! The editor only consumes the resulting point; hosts with a real renderer
//! can implement [`Picker`] on top of their own intersection code.

use glam::{Vec2, Vec3};

use crate::scene::{Camera, World};

const PARALLEL_EPSILON: f32 = 1e-8;

// ── Ray ──────────────────────────────────────────────────────────────────────

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray; `direction` is normalised.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

// ── AABB ─────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Creates an AABB from `min`/`max` corners.
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of half-size `half_extent` centred at the origin.
    #[inline]
    pub fn centered(half_extent: f32) -> Self {
        Self {
            min: Vec3::splat(-half_extent),
            max: Vec3::splat(half_extent),
        }
    }

    /// Unit box centred at the origin (fits the primitive cube).
    #[inline]
    pub fn unit_cube() -> Self {
        Self::centered(0.5)
    }

    /// Returns the box moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Slab test.  Returns the distance to the nearest intersection in front
    /// of the ray origin (0 when the origin is inside the box).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPSILON {
                // parallel to this slab: must already be between the planes
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

// ── Ground plane ─────────────────────────────────────────────────────────────

/// The horizontal square the placement grid is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// World-space `y` of the plane.
    pub height: f32,
    /// Half the side length; the plane spans `[-half_size, half_size]` on x and z.
    pub half_size: f32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        // 20 × 20 grid centred at the origin
        Self {
            height: 0.0,
            half_size: 10.0,
        }
    }
}

impl GroundPlane {
    /// Plane matching a square grid of side `grid_size`.
    pub fn from_grid_size(grid_size: f32) -> Self {
        Self {
            height: 0.0,
            half_size: grid_size * 0.5,
        }
    }

    /// Distance along `ray` to the plane, if the hit lies inside the square.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if ray.direction.y.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.height - ray.origin.y) / ray.direction.y;
        if t < 0.0 {
            return None;
        }
        let p = ray.point_at(t);
        if p.x.abs() <= self.half_size && p.z.abs() <= self.half_size {
            Some(t)
        } else {
            None
        }
    }
}

// ── Picker ───────────────────────────────────────────────────────────────────

/// Converts a ray into the nearest world-space intersection point.
pub trait Picker {
    /// Nearest hit along `ray`, or `None` when nothing is hit.
    fn pick(&self, ray: &Ray, world: &World) -> Option<Vec3>;

    /// Convenience: cast from `camera` through `ndc` and pick.
    fn pick_ndc(&self, ndc: Vec2, camera: &Camera, world: &World) -> Option<Vec3> {
        let ray = camera.ray_from_ndc(ndc)?;
        self.pick(&ray, world)
    }
}

/// CPU picker over node bounding boxes and the ground plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenePicker {
    pub ground: GroundPlane,
}

impl ScenePicker {
    pub fn new(ground: GroundPlane) -> Self {
        Self { ground }
    }
}

impl Picker for ScenePicker {
    fn pick(&self, ray: &Ray, world: &World) -> Option<Vec3> {
        let mut closest = self.ground.intersect_ray(ray);

        for element in world.iter().filter(|e| e.visible) {
            if let Some(t) = element.world_bounds().intersect_ray(ray) {
                if closest.map_or(true, |best| t < best) {
                    closest = Some(t);
                }
            }
        }

        closest.map(|t| ray.point_at(t))
    }
}
