//! Pick-to-focus camera animation.
//!
//! Selecting an object retargets the orbit camera onto a point just above
//! the object's surface and rescales the allowed orbit distance to the
//! object's size. Both move together along an eased curve over a fixed
//! duration.
//!
//! The camera controller's `target` field is the only source of truth for
//! the look-at point: while a transition runs it is overwritten every tick
//! with the interpolated value, and a new transition always snapshots its
//! start from that field. Picking again mid-flight therefore continues from
//! wherever the camera currently is, with no visible jump.

use std::time::Duration;

use glam::Vec3;

use crate::animation::Tween;
use crate::camera::controller::CameraController;
use crate::options::FocusOptions;
use crate::util::easing::EasingFunction;

/// Point above an object at `position` with vertical scale `scale_y`,
/// lifted past its surface by `offset` object-heights.
///
/// The sign of `offset` picks the side: positive offsets land above the
/// object, negative ones below.
#[must_use]
pub fn anchor_point(position: Vec3, scale_y: f32, offset: f32) -> Vec3 {
    position + Vec3::Y * (scale_y * (offset.signum() * 0.5 + offset))
}

/// What the camera should focus on: a world position and the object's
/// vertical scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    /// Object position in world space.
    pub position: Vec3,
    /// Object's vertical scale; drives the anchor height and orbit distance.
    pub scale: f32,
}

impl FocusTarget {
    /// Build a focus target from an object's position and scale vector.
    #[must_use]
    pub fn from_transform(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale: scale.y,
        }
    }
}

/// An in-flight focus animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTransition {
    look_at: Tween<Vec3>,
    scale: Tween<f32>,
}

impl FocusTransition {
    /// Create a transition from the current state to the destination.
    #[must_use]
    pub fn new(
        start_look_at: Vec3,
        end_look_at: Vec3,
        start_scale: f32,
        end_scale: f32,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            look_at: Tween::new(start_look_at, end_look_at, duration, easing),
            scale: Tween::new(start_scale, end_scale, duration, easing),
        }
    }

    /// Advance by `dt`, returning the interpolated look-at point and scale.
    pub fn advance(&mut self, dt: Duration) -> (Vec3, f32) {
        (self.look_at.advance(dt), self.scale.advance(dt))
    }

    /// Whether the transition has reached its destination.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.look_at.is_finished()
    }

    /// Look-at point the transition started from.
    #[must_use]
    pub fn start_look_at(&self) -> Vec3 {
        self.look_at.start()
    }

    /// Look-at point the transition is heading to.
    #[must_use]
    pub fn end_look_at(&self) -> Vec3 {
        self.look_at.end()
    }

    /// Scale the transition started from.
    #[must_use]
    pub fn start_scale(&self) -> f32 {
        self.scale.start()
    }

    /// Scale the transition is heading to.
    #[must_use]
    pub fn end_scale(&self) -> f32 {
        self.scale.end()
    }

    /// Linear progress in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.look_at.progress()
    }
}

/// Drives the orbit target and distance scale toward picked objects.
#[derive(Debug, Clone)]
pub struct FocusController {
    transition: Option<FocusTransition>,
    scale: f32,
    label_offset: f32,
    base_distance: f32,
    duration: Duration,
    easing: EasingFunction,
}

impl FocusController {
    /// Create a controller with committed scale 1.0 and no transition.
    #[must_use]
    pub fn new(options: &FocusOptions) -> Self {
        Self {
            transition: None,
            scale: 1.0,
            label_offset: options.label_offset,
            base_distance: options.base_distance,
            duration: Duration::from_millis(options.duration_ms),
            easing: options.easing,
        }
    }

    /// Look-at point for a target: just above its visual surface.
    #[must_use]
    pub fn focus_point(&self, target: FocusTarget) -> Vec3 {
        target.position + Vec3::Y * (target.scale * (0.5 + self.label_offset))
    }

    /// Start a transition toward `target`, abandoning any transition already
    /// running.
    ///
    /// The start values are the camera's current look-at point and the
    /// current scale, so a restart mid-flight begins exactly where the
    /// previous transition had got to.
    pub fn focus_on(&mut self, target: FocusTarget, camera: &CameraController) {
        let end = self.focus_point(target);
        log::info!("focus target changed: {end:?} (scale {})", target.scale);
        self.transition = Some(FocusTransition::new(
            camera.target,
            end,
            self.scale,
            target.scale,
            self.duration,
            self.easing,
        ));
    }

    /// Commit `target` immediately with no animation.
    pub fn jump_to(&mut self, target: FocusTarget, camera: &mut CameraController) {
        self.transition = None;
        camera.target = self.focus_point(target);
        self.scale = target.scale;
        self.apply_distance_bounds(camera);
    }

    /// Advance any active transition by `dt` and push the result into the
    /// camera controller.
    ///
    /// Distance bounds are re-derived from the current scale every tick.
    /// Returns `true` while a transition is still running.
    pub fn tick(&mut self, dt: Duration, camera: &mut CameraController) -> bool {
        if let Some(transition) = self.transition.as_mut() {
            let (look_at, scale) = transition.advance(dt);
            camera.target = look_at;
            self.scale = scale;
            if transition.is_finished() {
                self.transition = None;
            }
        }
        self.apply_distance_bounds(camera);
        self.transition.is_some()
    }

    fn apply_distance_bounds(&self, camera: &mut CameraController) {
        let distance = self.base_distance * self.scale;
        camera.set_distance_bounds(distance, distance);
    }

    /// The active transition, if any.
    #[must_use]
    pub fn transition(&self) -> Option<&FocusTransition> {
        self.transition.as_ref()
    }

    /// Whether a transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Current (possibly mid-transition) distance scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Orbit distance at unit scale.
    #[must_use]
    pub fn base_distance(&self) -> f32 {
        self.base_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    const EPS: f32 = 1e-5;

    fn setup() -> (FocusController, CameraController) {
        let focus = FocusController::new(&FocusOptions::default());
        let camera =
            CameraController::new(&CameraOptions::default(), (800, 600), Vec3::ZERO);
        (focus, camera)
    }

    fn earth() -> FocusTarget {
        FocusTarget {
            position: Vec3::new(0.0, 0.0, 3.0),
            scale: 1.0,
        }
    }

    fn moon() -> FocusTarget {
        FocusTarget {
            position: Vec3::new(1.5, 4.5, -5.0),
            scale: 0.2,
        }
    }

    #[test]
    fn focus_point_sits_above_surface() {
        let (focus, _) = setup();
        let p = focus.focus_point(earth());
        assert!((p - Vec3::new(0.0, 1.75, 3.0)).length() < EPS);
    }

    #[test]
    fn anchor_point_matches_focus_point_for_positive_offset() {
        let (focus, _) = setup();
        let t = moon();
        let a = anchor_point(t.position, t.scale, 1.25);
        assert!((a - focus.focus_point(t)).length() < EPS);
    }

    #[test]
    fn anchor_point_negative_offset_goes_below() {
        let a = anchor_point(Vec3::ZERO, 1.0, -1.0);
        assert!((a.y - -1.5).abs() < EPS);
    }

    #[test]
    fn halfway_through_is_three_quarters_eased() {
        let (mut focus, mut camera) = setup();
        let start = camera.target;
        focus.focus_on(earth(), &camera);
        assert!(focus.tick(Duration::from_millis(750), &mut camera));
        let end = Vec3::new(0.0, 1.75, 3.0);
        let expected = start + (end - start) * 0.75;
        assert!((camera.target - expected).length() < EPS);
    }

    #[test]
    fn endpoints_are_exact() {
        let (mut focus, mut camera) = setup();
        let start = camera.target;
        focus.focus_on(moon(), &camera);

        assert!(focus.tick(Duration::ZERO, &mut camera));
        assert_eq!(camera.target, start);

        assert!(!focus.tick(Duration::from_millis(1500), &mut camera));
        assert!((camera.target - focus.focus_point(moon())).length() < EPS);
        assert!((focus.scale() - 0.2).abs() < EPS);
        assert!(!focus.is_animating());
    }

    #[test]
    fn overshooting_elapsed_commits_end() {
        let (mut focus, mut camera) = setup();
        focus.focus_on(moon(), &camera);
        let _ = focus.tick(Duration::from_secs(60), &mut camera);
        assert!((camera.target - focus.focus_point(moon())).length() < EPS);
        // Further ticks leave the committed value alone.
        let committed = camera.target;
        let _ = focus.tick(Duration::from_millis(16), &mut camera);
        assert_eq!(camera.target, committed);
    }

    #[test]
    fn approach_is_ease_out() {
        let (mut focus, mut camera) = setup();
        focus.focus_on(moon(), &camera);
        let end = focus.focus_point(moon());

        let mut prev_distance = (camera.target - end).length();
        let mut prev_step = f32::INFINITY;
        for _ in 0..30 {
            let _ = focus.tick(Duration::from_millis(50), &mut camera);
            let distance = (camera.target - end).length();
            let step = prev_distance - distance;
            assert!(distance <= prev_distance + EPS);
            assert!(step <= prev_step + 1e-4);
            prev_distance = distance;
            prev_step = step;
        }
        assert!(prev_distance < EPS);
    }

    #[test]
    fn restart_starts_from_interpolated_value() {
        let (mut focus, mut camera) = setup();
        focus.focus_on(earth(), &camera);
        let _ = focus.tick(Duration::from_millis(500), &mut camera);
        let mid_target = camera.target;
        let mid_scale = focus.scale();

        focus.focus_on(moon(), &camera);
        let transition = focus.transition().copied();
        assert!(transition.is_some());
        if let Some(t) = transition {
            assert_eq!(t.start_look_at(), mid_target);
            assert_eq!(t.start_scale(), mid_scale);
            assert_eq!(t.end_look_at(), focus.focus_point(moon()));
            assert_eq!(t.end_scale(), 0.2);
            assert_eq!(t.progress(), 0.0);
        }
    }

    #[test]
    fn repeated_pick_on_same_object_restarts() {
        let (mut focus, mut camera) = setup();
        focus.focus_on(earth(), &camera);
        let _ = focus.tick(Duration::from_millis(300), &mut camera);
        let mid = camera.target;
        focus.focus_on(earth(), &camera);
        let transition = focus.transition().copied();
        assert!(matches!(transition, Some(t) if t.start_look_at() == mid));
        assert!(focus.is_animating());
    }

    #[test]
    fn distance_bounds_follow_scale() {
        let (mut focus, mut camera) = setup();
        focus.jump_to(earth(), &mut camera);
        focus.focus_on(moon(), &camera);
        for _ in 0..40 {
            let _ = focus.tick(Duration::from_millis(40), &mut camera);
            let expected = focus.base_distance() * focus.scale();
            assert!((camera.min_distance - expected).abs() < EPS);
            assert_eq!(camera.max_distance, camera.min_distance);
        }
    }

    #[test]
    fn distance_coupling_holds_across_unit_scales() {
        let (mut focus, mut camera) = setup();
        for i in 0..=10 {
            let scale = i as f32 / 10.0;
            focus.jump_to(
                FocusTarget {
                    position: Vec3::ZERO,
                    scale,
                },
                &mut camera,
            );
            assert!((camera.min_distance - 3.0 * scale).abs() < EPS);
            assert_eq!(camera.max_distance, camera.min_distance);
        }
    }

    #[test]
    fn zero_duration_jumps_on_first_tick() {
        let options = FocusOptions {
            duration_ms: 0,
            ..FocusOptions::default()
        };
        let mut focus = FocusController::new(&options);
        let mut camera =
            CameraController::new(&CameraOptions::default(), (800, 600), Vec3::ZERO);
        focus.focus_on(moon(), &camera);
        assert!(!focus.tick(Duration::ZERO, &mut camera));
        assert!((camera.target - focus.focus_point(moon())).length() < EPS);
    }

    #[test]
    fn jump_to_clears_transition() {
        let (mut focus, mut camera) = setup();
        focus.focus_on(moon(), &camera);
        focus.jump_to(earth(), &mut camera);
        assert!(!focus.is_animating());
        assert!((camera.target - Vec3::new(0.0, 1.75, 3.0)).length() < EPS);
    }
}
