//! Flat scene storage with generation-based dirty tracking.

use std::fmt;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use super::label::Label;
use super::planet::{MaterialDescriptor, ShapeDescriptor};

/// Stable identifier of a node within one [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position, orientation and scale of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space translation.
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Model matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.position,
        )
    }
}

/// A shape/material pair. Descriptors are shared, never copied.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Geometry description.
    pub shape: Arc<ShapeDescriptor>,
    /// Surface description.
    pub material: Arc<MaterialDescriptor>,
}

/// Sprites drawn at fixed world positions.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    /// Sprite centers relative to the node transform.
    pub points: Vec<Vec3>,
    /// Sprite size in world units.
    pub size: f32,
    /// Sprite tint (sRGB, 0-1).
    pub color: [f32; 3],
}

/// What a node draws.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A shaded shape.
    Mesh(Mesh),
    /// Point sprites.
    Points(PointCloud),
    /// Floating text.
    Label(Label),
}

/// A single element of the scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    id: NodeId,
    /// Human-readable name.
    pub name: String,
    /// What the node draws.
    pub kind: NodeKind,
    /// Placement in world space.
    pub transform: Transform,
    /// Hidden nodes are neither drawn nor picked.
    pub visible: bool,
    /// Whether pointer picks may select this node.
    pub pickable: bool,
}

impl SceneNode {
    /// The node's identifier.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The mesh payload, if this is a mesh node.
    #[must_use]
    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// The authoritative scene. Owns all nodes in a flat list.
#[derive(Debug, Default)]
pub struct SceneGraph {
    /// Nodes in insertion order.
    nodes: Vec<SceneNode>,
    next_id: u32,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl SceneGraph {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered (call after updating renderers).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Add a visible, non-pickable node and return its id.
    pub fn add(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(SceneNode {
            id,
            name: name.into(),
            kind,
            transform: Transform::default(),
            visible: true,
            pickable: false,
        });
        self.invalidate();
        id
    }

    /// Attach a shape/material pair as a pickable mesh node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MissingShape`](super::SceneError::MissingShape)
    /// or [`SceneError::MissingMaterial`](super::SceneError::MissingMaterial)
    /// when either descriptor is absent.
    pub fn attach_mesh(
        &mut self,
        name: impl Into<String>,
        shape: Option<Arc<ShapeDescriptor>>,
        material: Option<Arc<MaterialDescriptor>>,
    ) -> Result<NodeId, super::SceneError> {
        let shape = shape.ok_or(super::SceneError::MissingShape)?;
        let material = material.ok_or(super::SceneError::MissingMaterial)?;
        let id = self.add(name, NodeKind::Mesh(Mesh { shape, material }));
        if let Some(node) = self.nodes.last_mut() {
            node.pickable = true;
        }
        Ok(id)
    }

    /// Remove a node by ID. Returns the removed node, if any.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(idx);
        self.invalidate();
        Some(node)
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Mutable access to a node. Marks the scene dirty.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        self.invalidate();
        self.nodes.get_mut(idx)
    }

    /// First node with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// Visible mesh nodes.
    pub fn meshes(&self) -> impl Iterator<Item = (&SceneNode, &Mesh)> {
        self.nodes
            .iter()
            .filter(|n| n.visible)
            .filter_map(|n| n.mesh().map(|m| (n, m)))
    }

    /// Mutable access to every label node.
    ///
    /// Labels feed no GPU instance data, so reorienting them leaves the
    /// scene clean.
    pub fn labels_mut(
        &mut self,
    ) -> impl Iterator<Item = (&mut Transform, &Label)> {
        self.nodes.iter_mut().filter_map(|n| match &n.kind {
            NodeKind::Label(label) => Some((&mut n.transform, label)),
            _ => None,
        })
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneError;

    fn sphere() -> Arc<ShapeDescriptor> {
        Arc::new(ShapeDescriptor::sphere(1.0, 16))
    }

    fn material() -> Arc<MaterialDescriptor> {
        Arc::new(MaterialDescriptor::default())
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let mut scene = SceneGraph::new();
        let a = scene.attach_mesh("a", Some(sphere()), Some(material())).unwrap();
        let b = scene.attach_mesh("b", Some(sphere()), Some(material())).unwrap();
        assert_ne!(a, b);
        let _ = scene.remove(a);
        assert!(scene.node(a).is_none());
        assert_eq!(scene.node(b).unwrap().name, "b");
        let c = scene.add(
            "stars",
            NodeKind::Points(PointCloud {
                points: vec![],
                size: 0.1,
                color: [1.0; 3],
            }),
        );
        assert_ne!(c, a);
    }

    #[test]
    fn attach_requires_shape_and_material() {
        let mut scene = SceneGraph::new();
        assert_eq!(
            scene.attach_mesh("x", None, Some(material())).unwrap_err(),
            SceneError::MissingShape
        );
        assert_eq!(
            scene.attach_mesh("x", Some(sphere()), None).unwrap_err(),
            SceneError::MissingMaterial
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn mutation_marks_dirty() {
        let mut scene = SceneGraph::new();
        let id = scene.attach_mesh("a", Some(sphere()), Some(material())).unwrap();
        assert!(scene.is_dirty());
        scene.mark_rendered();
        assert!(!scene.is_dirty());
        scene.node_mut(id).unwrap().transform.position = Vec3::X;
        assert!(scene.is_dirty());
    }

    #[test]
    fn label_reorientation_keeps_scene_clean() {
        let mut scene = SceneGraph::new();
        let _ = scene.add(
            "home-label",
            NodeKind::Label(Label {
                text: "Home".into(),
                font_size: 0.25,
                depth: 0.05,
                color: [1.0; 3],
            }),
        );
        scene.mark_rendered();
        for (transform, _) in scene.labels_mut() {
            transform.rotation = Quat::from_rotation_y(1.0);
        }
        assert!(!scene.is_dirty());
        let rotation = scene.iter().next().unwrap().transform.rotation;
        assert!(rotation.abs_diff_eq(Quat::from_rotation_y(1.0), 1e-6));
    }

    #[test]
    fn meshes_skip_hidden_nodes() {
        let mut scene = SceneGraph::new();
        let a = scene.attach_mesh("a", Some(sphere()), Some(material())).unwrap();
        let _ = scene.attach_mesh("b", Some(sphere()), Some(material())).unwrap();
        scene.node_mut(a).unwrap().visible = false;
        let names: Vec<_> = scene.meshes().map(|(n, _)| n.name.as_str()).collect();
        assert_eq!(names, vec!["b"]);
    }
}
