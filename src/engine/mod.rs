//! The scene engine: explicit owner of all per-frame state.
//!
//! [`SceneEngine`] holds the scene graph, the orbit camera, the focus
//! controller, the label tracker and the input processor. The window layer
//! feeds it events and calls [`tick`](SceneEngine::tick) once per frame; the
//! renderer reads it back through the accessors.

mod accessors;
pub mod command;

use std::time::Duration;

pub use command::Command;
use glam::Vec2;

use crate::camera::controller::CameraController;
use crate::camera::focus::{FocusController, FocusTarget};
use crate::error::OrreryError;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::picking::{self, Ray};
use crate::scene::{LabelTracker, LandingScene, NodeId, SceneError, SceneGraph};

/// Owns the scene and everything that animates it.
pub struct SceneEngine {
    scene: SceneGraph,
    landing: LandingScene,
    camera_controller: CameraController,
    focus: FocusController,
    label_tracker: LabelTracker,
    input: InputProcessor,
    options: Options,
    /// Node the camera is (or is heading) focused on.
    focused: Option<NodeId>,
    /// Surface size in physical pixels.
    viewport: (u32, u32),
}

impl SceneEngine {
    /// Build the landing scene from `options` and aim the camera at the home
    /// planet without animating.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Scene`] if a configured planet cannot be
    /// attached.
    pub fn new(options: Options, viewport: (u32, u32)) -> Result<Self, OrreryError> {
        let (mut scene, landing) = LandingScene::build(&options)?;

        let mut focus = FocusController::new(&options.focus);
        let home = landing
            .home()
            .and_then(|id| focus_target_of(&scene, id).ok());
        let initial_target = home.map_or(glam::Vec3::ZERO, |t| focus.focus_point(t));
        let mut camera_controller =
            CameraController::new(&options.camera, viewport, initial_target);
        if let Some(target) = home {
            focus.jump_to(target, &mut camera_controller);
        }
        let _ = camera_controller.update();

        let label_tracker =
            LabelTracker::new(camera_controller.camera.eye, options.labels.track_damping);
        label_tracker.apply(&mut scene);

        let input = InputProcessor::with_key_bindings(options.keybindings.clone());

        log::info!(
            "scene engine ready: {} nodes, viewport {}x{}",
            scene.len(),
            viewport.0,
            viewport.1
        );

        Ok(Self {
            scene,
            focused: landing.home(),
            landing,
            camera_controller,
            focus,
            label_tracker,
            input,
            options,
            viewport,
        })
    }

    /// Run one command.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::RotateCamera { delta } => self.camera_controller.rotate(delta),
            Command::Zoom { delta } => self.camera_controller.zoom(delta),
            Command::Resize { width, height } => self.resize(width, height),
            Command::Pick { x, y } => {
                let ndc = picking::screen_to_ndc(
                    x,
                    y,
                    self.viewport.0 as f32,
                    self.viewport.1 as f32,
                );
                let _ = self.pick(ndc);
            }
            Command::FocusOn { node } => {
                if let Err(e) = self.focus_on_node(node) {
                    log::warn!("focus request ignored: {e}");
                }
            }
            Command::CycleFocus => {
                if let Some(next) = self.landing.next_planet(self.focused) {
                    let _ = self.focus_on_node(next);
                }
            }
            Command::ResetFocus => {
                if let Some(home) = self.landing.home() {
                    let _ = self.focus_on_node(home);
                }
            }
        }
    }

    /// Feed a raw input event through the input processor and execute the
    /// resulting command, if any.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.execute(command);
        }
    }

    /// Execute the command bound to `key`, if any. Returns whether the key
    /// was bound.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        match self.input.handle_key_press(key) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Pick at a normalized-device-coordinate position and focus the nearest
    /// hit.
    ///
    /// A miss changes nothing: any running transition keeps going and the
    /// committed target and scale stay as they were.
    pub fn pick(&mut self, ndc: Vec2) -> Option<NodeId> {
        let hit = Ray::from_ndc(ndc, &self.camera_controller.camera)
            .and_then(|ray| picking::pick_nearest(&self.scene, &ray));
        let Some(hit) = hit else {
            log::debug!("pick at {ndc} hit nothing");
            return None;
        };
        log::debug!("picked {} at distance {:.3}", hit.node, hit.distance);
        // The hit came from this scene, so the node exists.
        let _ = self.focus_on_node(hit.node);
        Some(hit.node)
    }

    /// Start a focus transition toward `node`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if `node` is not in the scene.
    pub fn focus_on_node(&mut self, node: NodeId) -> Result<(), SceneError> {
        let target = focus_target_of(&self.scene, node)?;
        self.focus.focus_on(target, &self.camera_controller);
        self.focused = Some(node);
        Ok(())
    }

    /// Advance every animated piece of state by `dt`: the focus transition,
    /// then camera damping, then label tracking.
    ///
    /// Returns `true` while anything is still in motion.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let focusing = self.focus.tick(dt, &mut self.camera_controller);
        let settling = self.camera_controller.update();
        self.label_tracker
            .update(self.camera_controller.camera.eye, dt.as_secs_f32());
        self.label_tracker.apply(&mut self.scene);
        focusing || settling
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera_controller.resize(width, height);
    }
}

fn focus_target_of(scene: &SceneGraph, node: NodeId) -> Result<FocusTarget, SceneError> {
    let node = scene.node(node).ok_or(SceneError::UnknownNode(node))?;
    Ok(FocusTarget::from_transform(
        node.transform.position,
        node.transform.scale,
    ))
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::input::MouseButton;

    fn engine() -> SceneEngine {
        SceneEngine::new(Options::default(), (800, 600)).unwrap()
    }

    fn planet(engine: &SceneEngine, name: &str) -> NodeId {
        engine.scene().find_by_name(name).unwrap().id()
    }

    fn ndc_of(engine: &SceneEngine, world: Vec3) -> Vec2 {
        engine
            .camera()
            .build_matrix()
            .project_point3(world)
            .truncate()
    }

    fn run(engine: &mut SceneEngine, total: Duration) {
        let step = Duration::from_millis(16);
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            let _ = engine.tick(step);
            elapsed += step;
        }
    }

    #[test]
    fn starts_focused_on_home() {
        let engine = engine();
        let target = engine.camera_controller().target;
        assert!(target.abs_diff_eq(Vec3::new(0.0, 1.75, 3.0), 1e-5));
        assert_eq!(engine.focused(), Some(planet(&engine, "earth")));
        assert!(!engine.focus().is_animating());
        assert!((engine.camera_controller().distance() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn missed_pick_changes_nothing() {
        let mut engine = engine();
        let target = engine.camera_controller().target;
        let scale = engine.focus().scale();
        assert_eq!(engine.pick(Vec2::ZERO), None);
        assert_eq!(engine.camera_controller().target.to_array(), target.to_array());
        assert_eq!(engine.focus().scale().to_bits(), scale.to_bits());
        assert!(!engine.focus().is_animating());
    }

    #[test]
    fn pick_on_moon_starts_transition() {
        let mut engine = engine();
        let moon = planet(&engine, "moon");
        let ndc = ndc_of(&engine, Vec3::new(1.5, 4.5, -5.0));
        assert_eq!(engine.pick(ndc), Some(moon));
        assert!(engine.focus().is_animating());
        assert_eq!(engine.focused(), Some(moon));

        run(&mut engine, Duration::from_millis(1600));
        assert!(!engine.focus().is_animating());
        let target = engine.camera_controller().target;
        assert!(target.abs_diff_eq(Vec3::new(1.5, 4.85, -5.0), 1e-5));
        assert!((engine.camera_controller().min_distance - 0.6).abs() < 1e-5);
        assert!((engine.camera_controller().distance() - 0.6).abs() < 1e-3);
    }

    #[test]
    fn renderer_sees_eased_target_mid_transition() {
        let mut engine = engine();
        let start = engine.camera_controller().target;
        let moon = planet(&engine, "moon");
        engine.focus_on_node(moon).unwrap();
        let _ = engine.tick(Duration::from_millis(750));

        let end = Vec3::new(1.5, 4.85, -5.0);
        let expected = start + (end - start) * 0.75;
        assert_eq!(engine.camera().target, engine.camera_controller().target);
        assert!(engine.camera().target.abs_diff_eq(expected, 1e-5));
        assert!((engine.focus().scale() - (1.0 + (0.2 - 1.0) * 0.75)).abs() < 1e-5);
    }

    #[test]
    fn missed_pick_mid_transition_keeps_transition() {
        let mut engine = engine();
        let moon = planet(&engine, "moon");
        engine.focus_on_node(moon).unwrap();
        let _ = engine.tick(Duration::from_millis(300));

        let miss = [
            Vec2::new(0.0, 0.95),
            Vec2::ZERO,
            Vec2::new(0.95, 0.95),
            Vec2::new(-0.95, -0.95),
            Vec2::new(0.95, -0.95),
            Vec2::new(-0.95, 0.95),
        ]
        .into_iter()
        .find(|&ndc| {
            Ray::from_ndc(ndc, engine.camera())
                .and_then(|ray| picking::pick_nearest(engine.scene(), &ray))
                .is_none()
        })
        .unwrap();

        let target = engine.camera_controller().target;
        let scale = engine.focus().scale();
        let transition = engine.focus().transition().copied();
        assert_eq!(engine.pick(miss), None);
        assert_eq!(engine.camera_controller().target.to_array(), target.to_array());
        assert_eq!(engine.focus().scale().to_bits(), scale.to_bits());
        assert_eq!(engine.focus().transition().copied(), transition);
        assert_eq!(engine.focused(), Some(moon));
    }

    #[test]
    fn idle_tick_leaves_scene_clean() {
        let mut engine = engine();
        let mut frames = 0;
        while engine.tick(Duration::from_millis(16)) {
            frames += 1;
            assert!(frames < 1000);
        }
        engine.scene_mut().mark_rendered();
        assert!(!engine.tick(Duration::from_millis(16)));
        assert!(!engine.scene().is_dirty());
    }

    #[test]
    fn click_through_input_picks() {
        let mut engine = engine();
        let earth = planet(&engine, "earth");
        let ndc = ndc_of(&engine, Vec3::new(0.0, 0.0, 3.0));
        let x = (ndc.x + 1.0) * 0.5 * 800.0;
        let y = 600.0 - (ndc.y + 1.0) * 0.5 * 600.0;
        engine.handle_input(InputEvent::CursorMoved { x, y });
        engine.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        engine.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert!(engine.focus().is_animating());
        assert_eq!(engine.focused(), Some(earth));
    }

    #[test]
    fn cycle_and_reset_focus() {
        let mut engine = engine();
        let earth = planet(&engine, "earth");
        let moon = planet(&engine, "moon");
        assert!(engine.handle_key_press("Tab"));
        assert_eq!(engine.focused(), Some(moon));
        run(&mut engine, Duration::from_millis(300));
        assert!(engine.handle_key_press("KeyH"));
        assert_eq!(engine.focused(), Some(earth));
        assert!(!engine.handle_key_press("KeyZ"));
    }

    #[test]
    fn unknown_node_is_rejected() {
        let mut engine = engine();
        let moon = planet(&engine, "moon");
        let _ = engine.scene_mut().remove(moon);
        assert_eq!(
            engine.focus_on_node(moon),
            Err(SceneError::UnknownNode(moon))
        );
        assert!(!engine.focus().is_animating());
    }

    #[test]
    fn tick_turns_labels_toward_camera() {
        let mut engine = engine();
        engine.execute(Command::RotateCamera {
            delta: Vec2::new(200.0, 0.0),
        });
        run(&mut engine, Duration::from_secs(2));
        let eye = engine.camera().eye;
        let tracked = engine.label_tracker().position();
        assert!(tracked.distance(eye) < 0.05);
        let label = engine.scene().node(engine.landing().labels()[0]).unwrap();
        let facing = label.transform.rotation * Vec3::Z;
        let expected = (tracked - label.transform.position).normalize();
        assert!(facing.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut engine = engine();
        engine.execute(Command::Resize {
            width: 1000,
            height: 500,
        });
        assert_eq!(engine.viewport(), (1000, 500));
        assert!((engine.camera().aspect - 2.0).abs() < 1e-6);
        engine.execute(Command::Resize { width: 0, height: 0 });
        assert_eq!(engine.viewport(), (1000, 500));
    }
}
