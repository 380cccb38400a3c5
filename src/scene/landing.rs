//! Assembles the landing vignette (planets, their labels and the starfield)
//! from [`SceneOptions`](crate::options::SceneOptions).

use std::sync::Arc;

use glam::Vec3;

use super::graph::{NodeId, NodeKind, PointCloud, SceneGraph};
use super::label::Label;
use super::planet::{MaterialDescriptor, PlanetBuilder, ShapeDescriptor};
use super::starfield::StarfieldGenerator;
use super::SceneError;
use crate::camera::focus::anchor_point;
use crate::options::{Options, PlanetOptions};

const LABEL_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const STAR_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Node ids of the landing scene, in the order they were configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingScene {
    planets: Vec<NodeId>,
    home: Option<NodeId>,
    labels: Vec<NodeId>,
    starfield: Option<NodeId>,
}

impl LandingScene {
    /// Build a scene graph containing every configured planet, one label per
    /// non-empty label string, and the starfield.
    ///
    /// The home planet is the first one flagged `home`, falling back to the
    /// first planet.
    ///
    /// # Errors
    ///
    /// Propagates [`SceneError`] from attaching planet meshes.
    pub fn build(options: &Options) -> Result<(SceneGraph, Self), SceneError> {
        let mut scene = SceneGraph::new();
        let mut landing = Self {
            planets: Vec::with_capacity(options.scene.planets.len()),
            home: None,
            labels: Vec::new(),
            starfield: None,
        };

        for planet in &options.scene.planets {
            let id = add_planet(&mut scene, planet)?;
            landing.planets.push(id);
            if planet.home && landing.home.is_none() {
                landing.home = Some(id);
            }
            if !planet.label.is_empty() {
                landing.labels.push(add_label(&mut scene, planet, options));
            }
        }
        if landing.home.is_none() {
            landing.home = landing.planets.first().copied();
        }

        let stars = &options.scene.starfield;
        if stars.count > 0 {
            let points =
                StarfieldGenerator::new(stars.seed, stars.count, stars.range)
                    .generate();
            landing.starfield = Some(scene.add(
                "starfield",
                NodeKind::Points(PointCloud {
                    points,
                    size: stars.size,
                    color: STAR_COLOR,
                }),
            ));
        }

        log::debug!(
            "landing scene built: {} planets, {} labels, {} stars",
            landing.planets.len(),
            landing.labels.len(),
            stars.count
        );
        Ok((scene, landing))
    }

    /// Planet ids in focus-cycling order.
    #[must_use]
    pub fn planets(&self) -> &[NodeId] {
        &self.planets
    }

    /// The planet focused at startup and on reset.
    #[must_use]
    pub fn home(&self) -> Option<NodeId> {
        self.home
    }

    /// Label node ids.
    #[must_use]
    pub fn labels(&self) -> &[NodeId] {
        &self.labels
    }

    /// Starfield node id, if any stars were generated.
    #[must_use]
    pub fn starfield(&self) -> Option<NodeId> {
        self.starfield
    }

    /// The planet after `current` in cycling order, wrapping around.
    /// Starts from the first planet when `current` is not a planet.
    #[must_use]
    pub fn next_planet(&self, current: Option<NodeId>) -> Option<NodeId> {
        let next = current
            .and_then(|id| self.planets.iter().position(|&p| p == id))
            .map_or(0, |i| (i + 1) % self.planets.len());
        self.planets.get(next).copied()
    }
}

fn add_planet(
    scene: &mut SceneGraph,
    planet: &PlanetOptions,
) -> Result<NodeId, SceneError> {
    let builder = PlanetBuilder::new()
        .with_shape(Arc::new(ShapeDescriptor::sphere(1.0, planet.segments)))
        .with_material(Arc::new(MaterialDescriptor {
            color: planet.color,
            roughness: planet.roughness,
        }));
    let handle = builder
        .build()
        .add_to_scene(scene)?
        .named(planet.name.clone())
        .with_position(Vec3::from_array(planet.position))
        .with_uniform_scale(planet.scale);
    Ok(handle.id())
}

fn add_label(
    scene: &mut SceneGraph,
    planet: &PlanetOptions,
    options: &Options,
) -> NodeId {
    let labels = &options.labels;
    let id = scene.add(
        format!("{}-label", planet.name),
        NodeKind::Label(Label {
            text: planet.label.clone(),
            font_size: labels.base_font_size * planet.scale,
            depth: labels.base_font_depth * planet.scale,
            color: LABEL_COLOR,
        }),
    );
    if let Some(node) = scene.node_mut(id) {
        node.transform.position = anchor_point(
            Vec3::from_array(planet.position),
            planet.scale,
            options.focus.label_offset,
        );
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_landing_scene() {
        let (scene, landing) = LandingScene::build(&Options::default()).unwrap();
        assert_eq!(landing.planets().len(), 2);
        assert_eq!(landing.labels().len(), 2);
        assert!(landing.starfield().is_some());
        // 2 planets + 2 labels + starfield
        assert_eq!(scene.len(), 5);

        let earth = scene.node(landing.home().unwrap()).unwrap();
        assert_eq!(earth.name, "earth");
        assert_eq!(earth.transform.position, Vec3::new(0.0, 0.0, 3.0));
        assert!(earth.pickable);
    }

    #[test]
    fn labels_sit_above_their_planet() {
        let (scene, landing) = LandingScene::build(&Options::default()).unwrap();
        let home = scene.node(landing.labels()[0]).unwrap();
        assert!(home.transform.position.abs_diff_eq(Vec3::new(0.0, 1.75, 3.0), 1e-6));
        let NodeKind::Label(label) = &home.kind else {
            panic!("expected label node");
        };
        assert_eq!(label.text, "Home");
        assert!((label.font_size - 0.25).abs() < 1e-6);

        let about = scene.node(landing.labels()[1]).unwrap();
        let NodeKind::Label(label) = &about.kind else {
            panic!("expected label node");
        };
        assert_eq!(label.text, "About");
        assert!((label.font_size - 0.05).abs() < 1e-6);
        assert!((about.transform.position.y - (4.5 + 0.2 * 1.75)).abs() < 1e-5);
    }

    #[test]
    fn starfield_uses_configured_count() {
        let (scene, landing) = LandingScene::build(&Options::default()).unwrap();
        let node = scene.node(landing.starfield().unwrap()).unwrap();
        let NodeKind::Points(cloud) = &node.kind else {
            panic!("expected point cloud");
        };
        assert_eq!(cloud.points.len(), 512);
        assert!(!node.pickable);
    }

    #[test]
    fn home_falls_back_to_first_planet() {
        let mut options = Options::default();
        for planet in &mut options.scene.planets {
            planet.home = false;
        }
        let (_, landing) = LandingScene::build(&options).unwrap();
        assert_eq!(landing.home(), landing.planets().first().copied());
    }

    #[test]
    fn next_planet_wraps() {
        let (_, landing) = LandingScene::build(&Options::default()).unwrap();
        let [earth, moon] = landing.planets() else {
            panic!("expected two planets");
        };
        assert_eq!(landing.next_planet(Some(*earth)), Some(*moon));
        assert_eq!(landing.next_planet(Some(*moon)), Some(*earth));
        assert_eq!(landing.next_planet(None), Some(*earth));
    }

    #[test]
    fn empty_scene_has_no_home() {
        let mut options = Options::default();
        options.scene.planets.clear();
        options.scene.starfield.count = 0;
        let (scene, landing) = LandingScene::build(&options).unwrap();
        assert!(scene.is_empty());
        assert_eq!(landing.home(), None);
        assert_eq!(landing.next_planet(None), None);
    }
}
