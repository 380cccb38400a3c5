//! Instance data for starfield sprites.

use crate::scene::{NodeKind, SceneGraph};
use crate::util::lighting::srgb_to_linear;

/// Per-instance data for a glowing star sprite.
/// Must match the WGSL StarInstance struct layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    /// xyz = world position, w = sprite size
    pub center: [f32; 4],
    /// xyz = linear RGB tint, w unused
    pub color: [f32; 4],
}

/// One instance per point of every visible point-cloud node, transformed
/// into world space.
#[must_use]
pub fn star_instances(scene: &SceneGraph) -> Vec<StarInstance> {
    scene
        .iter()
        .filter(|node| node.visible)
        .filter_map(|node| match &node.kind {
            NodeKind::Points(cloud) => Some((node.transform.matrix(), cloud)),
            _ => None,
        })
        .flat_map(|(model, cloud)| {
            let [r, g, b] = srgb_to_linear(cloud.color);
            cloud.points.iter().map(move |&p| StarInstance {
                center: model.transform_point3(p).extend(cloud.size).to_array(),
                color: [r, g, b, 1.0],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::PointCloud;

    #[test]
    fn points_follow_node_transform() {
        let mut scene = SceneGraph::new();
        let id = scene.add(
            "stars",
            NodeKind::Points(PointCloud {
                points: vec![Vec3::X, Vec3::Y],
                size: 0.25,
                color: [1.0; 3],
            }),
        );
        scene.node_mut(id).unwrap().transform.position = Vec3::new(0.0, 0.0, 10.0);
        let stars = star_instances(&scene);
        assert_eq!(stars.len(), 2);
        assert_eq!(stars[0].center, [1.0, 0.0, 10.0, 0.25]);
        assert_eq!(stars[1].center, [0.0, 1.0, 10.0, 0.25]);

        scene.node_mut(id).unwrap().visible = false;
        assert!(star_instances(&scene).is_empty());
    }
}
