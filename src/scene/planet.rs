//! Planet wrapper: a shape descriptor paired with a material descriptor.

use std::sync::Arc;

use glam::Vec3;

use super::graph::{NodeId, SceneGraph};
use super::SceneError;

/// Geometry of a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDescriptor {
    /// UV sphere centered on the origin.
    Sphere {
        /// Radius before node scaling.
        radius: f32,
        /// Segments around the equator.
        width_segments: u32,
        /// Segments from pole to pole.
        height_segments: u32,
    },
}

impl ShapeDescriptor {
    /// A sphere with the same tessellation in both directions.
    #[must_use]
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
        }
    }

    /// Radius of the smallest origin-centered sphere enclosing the shape.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere { radius, .. } => *radius,
        }
    }
}

/// Surface appearance of a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDescriptor {
    /// Base color (sRGB, 0-1).
    pub color: [f32; 3],
    /// Microfacet roughness (0 = mirror, 1 = fully diffuse).
    pub roughness: f32,
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self {
            color: [1.0; 3],
            roughness: 1.0,
        }
    }
}

/// Fluent builder for [`Planet`].
///
/// Setters never validate. A planet built without a shape or material is
/// rejected by the scene graph when it is attached.
#[derive(Debug, Clone, Default)]
pub struct PlanetBuilder {
    shape: Option<Arc<ShapeDescriptor>>,
    material: Option<Arc<MaterialDescriptor>>,
}

impl PlanetBuilder {
    /// Start a builder with no shape and no material.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shape.
    #[must_use]
    pub fn with_shape(mut self, shape: impl Into<Arc<ShapeDescriptor>>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    /// Set the material.
    #[must_use]
    pub fn with_material(
        mut self,
        material: impl Into<Arc<MaterialDescriptor>>,
    ) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Produce a planet from the last shape and material set.
    ///
    /// Every planet built from the same builder shares the same descriptor
    /// allocations.
    #[must_use]
    pub fn build(&self) -> Planet {
        Planet {
            shape: self.shape.clone(),
            material: self.material.clone(),
        }
    }
}

/// An immutable shape/material pair ready to be placed in a scene.
#[derive(Debug, Clone)]
pub struct Planet {
    shape: Option<Arc<ShapeDescriptor>>,
    material: Option<Arc<MaterialDescriptor>>,
}

impl Planet {
    /// Start building a planet.
    #[must_use]
    pub fn builder() -> PlanetBuilder {
        PlanetBuilder::new()
    }

    /// The shape, if one was set.
    #[must_use]
    pub fn shape(&self) -> Option<&Arc<ShapeDescriptor>> {
        self.shape.as_ref()
    }

    /// The material, if one was set.
    #[must_use]
    pub fn material(&self) -> Option<&Arc<MaterialDescriptor>> {
        self.material.as_ref()
    }

    /// Attach this planet's mesh to `scene`, returning a handle for further
    /// placement.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MissingShape`] or
    /// [`SceneError::MissingMaterial`] if the planet was built without one.
    pub fn add_to_scene<'s>(
        &self,
        scene: &'s mut SceneGraph,
    ) -> Result<PlanetHandle<'s>, SceneError> {
        let id = scene.attach_mesh(
            "planet",
            self.shape.clone(),
            self.material.clone(),
        )?;
        Ok(PlanetHandle { scene, id })
    }
}

/// Chained placement of a freshly attached planet.
pub struct PlanetHandle<'s> {
    scene: &'s mut SceneGraph,
    id: NodeId,
}

impl PlanetHandle<'_> {
    /// Node id of the attached mesh.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Rename the node.
    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        if let Some(node) = self.scene.node_mut(self.id) {
            node.name = name.into();
        }
        self
    }

    /// Set the world position.
    #[must_use]
    pub fn with_position(self, position: Vec3) -> Self {
        if let Some(node) = self.scene.node_mut(self.id) {
            node.transform.position = position;
        }
        self
    }

    /// Set the same scale on all three axes.
    #[must_use]
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        if let Some(node) = self.scene.node_mut(self.id) {
            node.transform.scale = Vec3::splat(scale);
        }
        self
    }
}
