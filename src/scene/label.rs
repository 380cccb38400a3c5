//! Floating text labels that keep facing the camera.

use glam::{Mat3, Quat, Vec3};

use super::graph::SceneGraph;

/// Extruded text anchored above a planet.
///
/// Glyph geometry is not generated; the renderer only needs the text and
/// its dimensions to lay the label out.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Displayed text.
    pub text: String,
    /// Glyph height in world units.
    pub font_size: f32,
    /// Extrusion depth in world units.
    pub depth: f32,
    /// Text color (sRGB, 0-1).
    pub color: [f32; 3],
}

/// Smoothed point that labels turn toward.
///
/// The tracked point chases the camera eye with exponential damping, so
/// labels swing around lazily instead of snapping while the view orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelTracker {
    position: Vec3,
    damping: f32,
}

impl LabelTracker {
    /// Start tracking from `initial` with the given damping rate (1/s).
    #[must_use]
    pub fn new(initial: Vec3, damping: f32) -> Self {
        Self {
            position: initial,
            damping,
        }
    }

    /// Current tracked point.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the tracked point toward `eye` by `damping * dt` of the
    /// remaining distance (clamped to at most the full distance).
    pub fn update(&mut self, eye: Vec3, dt: f32) {
        let t = (self.damping * dt).clamp(0.0, 1.0);
        self.position = self.position.lerp(eye, t);
    }

    /// Rotation that points a label's +Z axis from `from` toward the
    /// tracked point, keeping world +Y as up where possible.
    #[must_use]
    pub fn facing(&self, from: Vec3) -> Quat {
        let forward = (self.position - from).normalize_or_zero();
        if forward == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let right = up.cross(forward).normalize();
        let up = forward.cross(right);
        Quat::from_mat3(&Mat3::from_cols(right, up, forward))
    }

    /// Orient every label node in `scene` toward the tracked point.
    pub fn apply(&self, scene: &mut SceneGraph) {
        for (transform, _) in scene.labels_mut() {
            transform.rotation = self.facing(transform.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    fn label() -> Label {
        Label {
            text: "Home".into(),
            font_size: 0.25,
            depth: 0.05,
            color: [1.0; 3],
        }
    }

    #[test]
    fn update_moves_fraction_of_remaining_distance() {
        let mut tracker = LabelTracker::new(Vec3::ZERO, 5.0);
        tracker.update(Vec3::new(10.0, 0.0, 0.0), 0.1);
        assert!((tracker.position().x - 5.0).abs() < 1e-5);
        tracker.update(Vec3::new(10.0, 0.0, 0.0), 0.1);
        assert!((tracker.position().x - 7.5).abs() < 1e-5);
    }

    #[test]
    fn large_step_does_not_overshoot() {
        let mut tracker = LabelTracker::new(Vec3::ZERO, 5.0);
        tracker.update(Vec3::ONE, 10.0);
        assert_eq!(tracker.position(), Vec3::ONE);
    }

    #[test]
    fn facing_points_z_at_target() {
        let tracker = LabelTracker::new(Vec3::new(3.0, 1.0, -2.0), 5.0);
        let from = Vec3::new(0.0, 1.0, 0.0);
        let rot = tracker.facing(from);
        let z = rot * Vec3::Z;
        let expected = (tracker.position() - from).normalize();
        assert!(z.abs_diff_eq(expected, 1e-5));
        // Up stays in the plane of world Y.
        let x = rot * Vec3::X;
        assert!(x.y.abs() < 1e-5);
    }

    #[test]
    fn facing_straight_up_is_finite() {
        let tracker = LabelTracker::new(Vec3::new(0.0, 5.0, 0.0), 5.0);
        let rot = tracker.facing(Vec3::ZERO);
        assert!(rot.is_finite());
        assert!((rot * Vec3::Z).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn apply_rotates_labels_only() {
        let mut scene = SceneGraph::new();
        let id = scene.add("label", NodeKind::Label(label()));
        scene.node_mut(id).unwrap().transform.position = Vec3::ZERO;
        let tracker = LabelTracker::new(Vec3::new(1.0, 0.0, 0.0), 5.0);
        tracker.apply(&mut scene);
        let rot = scene.node(id).unwrap().transform.rotation;
        assert!((rot * Vec3::Z).abs_diff_eq(Vec3::X, 1e-5));
    }
}
