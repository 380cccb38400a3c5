//! Authoritative scene: flat node storage, planet construction, labels and
//! the starfield.
//!
//! Every visual element is a [`SceneNode`] in a [`SceneGraph`]. Planets are
//! built through [`PlanetBuilder`] and attached with
//! [`Planet::add_to_scene`]; [`landing::LandingScene`] assembles the default
//! Earth/Moon/starfield vignette from [`crate::options::SceneOptions`].

mod graph;
mod label;
pub mod landing;
mod planet;
mod starfield;

use std::fmt;

pub use graph::{
    Mesh, NodeId, NodeKind, PointCloud, SceneGraph, SceneNode, Transform,
};
pub use label::{Label, LabelTracker};
pub use landing::LandingScene;
pub use planet::{
    MaterialDescriptor, Planet, PlanetBuilder, PlanetHandle, ShapeDescriptor,
};
pub use starfield::StarfieldGenerator;

/// Errors raised when attaching objects to a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// A planet was attached without a shape descriptor.
    MissingShape,
    /// A planet was attached without a material descriptor.
    MissingMaterial,
    /// A node id did not resolve to a node in this graph.
    UnknownNode(NodeId),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingShape => write!(f, "planet has no shape"),
            Self::MissingMaterial => write!(f, "planet has no material"),
            Self::UnknownNode(id) => write!(f, "unknown scene node {id}"),
        }
    }
}

impl std::error::Error for SceneError {}
