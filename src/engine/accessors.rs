use super::SceneEngine;
use crate::camera::controller::CameraController;
use crate::camera::focus::FocusController;
use crate::camera::{Camera, CameraUniform};
use crate::options::Options;
use crate::scene::{LabelTracker, LandingScene, NodeId, SceneGraph};

impl SceneEngine {
    /// The scene graph.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable scene graph, for callers that add or move nodes.
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// Node ids of the landing scene.
    #[must_use]
    pub fn landing(&self) -> &LandingScene {
        &self.landing
    }

    /// The camera as it will be rendered this frame.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera_controller.camera
    }

    /// Orbit controller state.
    #[must_use]
    pub fn camera_controller(&self) -> &CameraController {
        &self.camera_controller
    }

    /// GPU-ready camera uniform for the current frame.
    #[must_use]
    pub fn camera_uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera_controller.camera);
        uniform
    }

    /// Focus transition state.
    #[must_use]
    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    /// The node the camera is focused (or heading) on.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// The damped point labels turn toward.
    #[must_use]
    pub fn label_tracker(&self) -> &LabelTracker {
        &self.label_tracker
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current viewport size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}
