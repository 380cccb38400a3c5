//! Damped orbit camera with polar and distance limits.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Smallest polar angle kept away from the poles so `look_at` never sees a
/// view direction parallel to `up`.
const POLE_EPSILON: f32 = 1e-6;

/// Residual angular velocity below which damping is considered settled.
const SETTLE_EPSILON: f32 = 1e-5;

/// Spherical coordinates of the eye relative to the orbit target.
///
/// `phi` is the polar angle from +Y, `theta` the azimuth around +Y measured
/// from +Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < f32::EPSILON {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Pending angular motion that damping bleeds off over several frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct SphericalDelta {
    phi: f32,
    theta: f32,
}

/// Orbit camera controller.
///
/// The eye orbits `target` on a sphere. Rotation input accumulates an
/// angular delta that [`update`](Self::update) applies once per frame,
/// decaying it geometrically when damping is enabled. `target`,
/// `min_distance` and `max_distance` are plain fields so collaborators
/// (the focus controller) can drive them directly.
pub struct CameraController {
    /// The camera being driven.
    pub camera: Camera,
    /// World-space point the camera orbits and looks at.
    pub target: Vec3,
    /// Closest allowed eye distance from the target.
    pub min_distance: f32,
    /// Farthest allowed eye distance from the target.
    pub max_distance: f32,
    /// Smallest polar angle (radians from +Y).
    pub min_polar_angle: f32,
    /// Largest polar angle (radians from +Y).
    pub max_polar_angle: f32,
    /// Whether rotation carries inertia between frames.
    pub enable_damping: bool,
    /// Fraction of pending rotation applied per frame when damping.
    pub damping_factor: f32,

    spherical_delta: SphericalDelta,
    zoom_scale: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    viewport_height: f32,
}

impl CameraController {
    /// Create a controller orbiting `target`, with the eye placed at
    /// `target + options.eye_offset`.
    #[must_use]
    pub fn new(options: &CameraOptions, viewport: (u32, u32), target: Vec3) -> Self {
        let (width, height) = (viewport.0.max(1), viewport.1.max(1));
        let camera = Camera {
            eye: target + Vec3::from_array(options.eye_offset),
            target,
            up: Vec3::Y,
            aspect: width as f32 / height as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut controller = Self {
            camera,
            target,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: options.min_polar_angle,
            max_polar_angle: options.max_polar_angle,
            enable_damping: options.enable_damping,
            damping_factor: options.damping_factor,
            spherical_delta: SphericalDelta::default(),
            zoom_scale: 1.0,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            viewport_height: height as f32,
        };
        let _ = controller.update();
        controller
    }

    /// Update the aspect ratio (and rotation normalization) for a new
    /// viewport size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
            self.viewport_height = height as f32;
        }
    }

    /// Queue a rotation from a pointer drag of `delta` pixels.
    ///
    /// A drag across the full viewport height turns the camera one full
    /// revolution at unit rotate speed.
    pub fn rotate(&mut self, delta: Vec2) {
        let per_pixel = TAU / self.viewport_height * self.rotate_speed;
        self.spherical_delta.theta -= delta.x * per_pixel;
        self.spherical_delta.phi -= delta.y * per_pixel;
    }

    /// Queue a zoom step (positive = zoom in, negative = zoom out).
    pub fn zoom(&mut self, delta: f32) {
        self.zoom_scale *= 0.95_f32.powf(delta * self.zoom_speed);
    }

    /// Set both distance bounds at once.
    pub fn set_distance_bounds(&mut self, min: f32, max: f32) {
        self.min_distance = min;
        self.max_distance = max;
    }

    /// Current eye-to-target distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        (self.camera.eye - self.target).length()
    }

    /// Apply pending rotation/zoom, enforce limits, and re-aim the camera at
    /// `target`. Call once per frame.
    ///
    /// Returns `true` while damped rotation is still settling.
    pub fn update(&mut self) -> bool {
        let mut spherical = Spherical::from_offset(self.camera.eye - self.target);

        if self.enable_damping {
            spherical.theta += self.spherical_delta.theta * self.damping_factor;
            spherical.phi += self.spherical_delta.phi * self.damping_factor;
        } else {
            spherical.theta += self.spherical_delta.theta;
            spherical.phi += self.spherical_delta.phi;
        }

        spherical.phi = clamp_lenient(
            spherical.phi,
            self.min_polar_angle,
            self.max_polar_angle,
        );
        spherical.phi = clamp_lenient(spherical.phi, POLE_EPSILON, PI - POLE_EPSILON);

        spherical.radius = clamp_lenient(
            spherical.radius * self.zoom_scale,
            self.min_distance,
            self.max_distance,
        );

        self.camera.eye = self.target + spherical.to_offset();
        self.camera.target = self.target;

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= decay;
            self.spherical_delta.phi *= decay;
        } else {
            self.spherical_delta = SphericalDelta::default();
        }
        self.zoom_scale = 1.0;

        self.spherical_delta.theta.abs() > SETTLE_EPSILON
            || self.spherical_delta.phi.abs() > SETTLE_EPSILON
    }

    /// Polar angle of the eye, radians from +Y.
    #[must_use]
    pub fn polar_angle(&self) -> f32 {
        Spherical::from_offset(self.camera.eye - self.target).phi
    }
}

/// `f32::clamp` that tolerates `min > max` (the lower bound wins) instead of
/// panicking.
fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(
            &CameraOptions::default(),
            (800, 600),
            Vec3::new(0.0, 1.75, 3.0),
        )
    }

    #[test]
    fn spherical_round_trip() {
        let offset = Vec3::new(0.5, -2.5, 1.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-5);
    }

    #[test]
    fn update_clamps_polar_angle() {
        let c = controller();
        let phi = c.polar_angle();
        assert!(phi >= c.min_polar_angle - 1e-5);
        assert!(phi <= c.max_polar_angle + 1e-5);
    }

    #[test]
    fn distance_bounds_are_enforced() {
        let mut c = controller();
        c.set_distance_bounds(3.0, 3.0);
        let _ = c.update();
        assert!((c.distance() - 3.0).abs() < 1e-4);

        c.zoom(10.0);
        let _ = c.update();
        assert!((c.distance() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn inverted_bounds_do_not_panic() {
        let mut c = controller();
        c.set_distance_bounds(4.0, 2.0);
        let _ = c.update();
        assert!((c.distance() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn rotation_preserves_distance() {
        let mut c = controller();
        c.set_distance_bounds(3.0, 3.0);
        let _ = c.update();
        c.rotate(Vec2::new(120.0, 0.0));
        for _ in 0..10 {
            let _ = c.update();
        }
        assert!((c.distance() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn damping_settles() {
        let mut c = controller();
        c.rotate(Vec2::new(50.0, 0.0));
        assert!(c.update());
        let mut frames = 0;
        while c.update() {
            frames += 1;
            assert!(frames < 10_000, "damping never settled");
        }
    }

    #[test]
    fn without_damping_rotation_applies_at_once() {
        let mut c = controller();
        c.enable_damping = false;
        let before = c.camera.eye;
        c.rotate(Vec2::new(30.0, 0.0));
        assert!(!c.update());
        let after = c.camera.eye;
        assert!((after - before).length() > 1e-3);
        let _ = c.update();
        assert!((c.camera.eye - after).length() < 1e-5);
    }

    #[test]
    fn camera_follows_moved_target() {
        let mut c = controller();
        c.set_distance_bounds(3.0, 3.0);
        c.target = Vec3::new(1.5, 4.9, -5.0);
        let _ = c.update();
        assert_eq!(c.camera.target, c.target);
        assert!((c.distance() - 3.0).abs() < 1e-4);
    }
}
