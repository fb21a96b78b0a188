//! Model bounds read from glTF accessor metadata.
//!
//! Only the document is parsed; vertex buffers are never touched.  Every
//! mesh primitive's `POSITION` accessor carries `min`/`max`, and their union
//! is the model's object-space box.  Node transforms are ignored.

use ferrous_core::Aabb;
use glam::Vec3;
use gltf::json::Value;

fn vec3(value: &Value) -> Option<Vec3> {
    let arr = value.as_array()?;
    if arr.len() != 3 {
        return None;
    }
    let mut out = [0.0f32; 3];
    for (slot, v) in out.iter_mut().zip(arr) {
        *slot = v.as_f64()? as f32;
    }
    Some(Vec3::from(out))
}

/// Bounds of a `.glb` / `.gltf` blob, or `None` if it is not glTF or has no
/// positioned geometry.
pub fn gltf_bounds(bytes: &[u8]) -> Option<Aabb> {
    let gltf = gltf::Gltf::from_slice(bytes).ok()?;

    let mut acc: Option<Aabb> = None;
    for mesh in gltf.meshes() {
        for primitive in mesh.primitives() {
            let Some(positions) = primitive.get(&gltf::Semantic::Positions) else {
                continue;
            };
            let (Some(min), Some(max)) = (positions.min(), positions.max()) else {
                continue;
            };
            let (Some(min), Some(max)) = (vec3(&min), vec3(&max)) else {
                continue;
            };
            acc = Some(match acc {
                Some(b) => Aabb::new(b.min.min(min), b.max.max(max)),
                None => Aabb::new(min, max),
            });
        }
    }
    acc
}
