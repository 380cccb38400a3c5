//! Instance data for the planet sphere impostor.

use crate::scene::SceneGraph;
use crate::util::lighting::srgb_to_linear;

/// Per-instance data for a ray-cast planet sphere.
/// Must match the WGSL PlanetInstance struct layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlanetInstance {
    /// xyz = world position, w = world radius
    pub center: [f32; 4],
    /// xyz = linear RGB albedo, w = roughness
    pub color: [f32; 4],
}

/// One instance per visible mesh node.
///
/// The world radius is the shape's bounding radius times the node's largest
/// scale component, matching what picking tests against.
#[must_use]
pub fn planet_instances(scene: &SceneGraph) -> Vec<PlanetInstance> {
    scene
        .meshes()
        .map(|(node, mesh)| {
            let t = &node.transform;
            let radius =
                mesh.shape.bounding_radius() * t.scale.abs().max_element();
            let [r, g, b] = srgb_to_linear(mesh.material.color);
            PlanetInstance {
                center: t.position.extend(radius).to_array(),
                color: [r, g, b, mesh.material.roughness],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::scene::LandingScene;

    #[test]
    fn landing_scene_yields_two_planets() {
        let (scene, _) = LandingScene::build(&Options::default()).unwrap();
        let instances = planet_instances(&scene);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].center, [0.0, 0.0, 3.0, 1.0]);
        assert!((instances[1].center[3] - 0.2).abs() < 1e-6);
        assert!((instances[0].color[3] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn instance_is_32_bytes() {
        assert_eq!(size_of::<PlanetInstance>(), 32);
    }
}
