//! CPU ray picking against scene spheres.
//!
//! Screen coordinates are mapped to NDC, unprojected into a world-space ray
//! and tested against every visible, pickable mesh's bounding sphere.

mod ray;

use glam::{Vec2, Vec3};
pub use ray::Ray;

use crate::scene::{NodeId, SceneGraph};

/// Map a pixel position (origin top-left) to normalized device coordinates
/// (origin center, +Y up).
#[must_use]
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let (w, h) = (width.max(1.0), height.max(1.0));
    Vec2::new(x / w * 2.0 - 1.0, (h - y) / h * 2.0 - 1.0)
}

/// A ray/object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// The node that was hit.
    pub node: NodeId,
    /// Distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// All hits of `ray` against the scene, nearest first.
#[must_use]
pub fn pick(scene: &SceneGraph, ray: &Ray) -> Vec<Hit> {
    let mut hits: Vec<Hit> = scene
        .meshes()
        .filter(|(node, _)| node.pickable)
        .filter_map(|(node, mesh)| {
            let radius = mesh.shape.bounding_radius()
                * node.transform.scale.abs().max_element();
            let distance =
                ray.intersect_sphere(node.transform.position, radius)?;
            Some(Hit {
                node: node.id(),
                distance,
                point: ray.at(distance),
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest hit of `ray` against the scene.
#[must_use]
pub fn pick_nearest(scene: &SceneGraph, ray: &Ray) -> Option<Hit> {
    pick(scene, ray).into_iter().next()
}
