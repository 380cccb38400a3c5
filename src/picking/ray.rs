//! Camera rays and ray/sphere intersection.

use glam::{Vec2, Vec3};

use crate::camera::Camera;

/// A half-line in world space with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray through a normalized-device-coordinate point, from the near plane
    /// toward the far plane.
    ///
    /// Returns `None` when the camera's view-projection is degenerate.
    #[must_use]
    pub fn from_ndc(ndc: Vec2, camera: &Camera) -> Option<Self> {
        let inv = camera.build_matrix().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        let direction = (far - near).try_normalize()?;
        near.is_finite().then_some(Self {
            origin: near,
            direction,
        })
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first intersection with a sphere, or
    /// `None` if the ray misses it or the sphere is entirely behind the
    /// origin. An origin inside the sphere reports the exit point.
    #[must_use]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let (t_near, t_far) = (-b - sqrt_disc, -b + sqrt_disc);
        if t_near >= 0.0 {
            Some(t_near)
        } else if t_far >= 0.0 {
            Some(t_far)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 40.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn center_ray_points_at_target() {
        let ray = Ray::from_ndc(Vec2::ZERO, &camera()).unwrap();
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4));
        assert!((ray.origin.z - 9.9).abs() < 1e-3);
    }

    #[test]
    fn edge_ray_diverges() {
        let ray = Ray::from_ndc(Vec2::new(1.0, 0.0), &camera()).unwrap();
        assert!(ray.direction.x > 0.0);
        // Half the horizontal fov at aspect 1 is 20 degrees.
        let angle = ray.direction.angle_between(Vec3::NEG_Z).to_degrees();
        assert!((angle - 20.0).abs() < 0.05);
    }

    #[test]
    fn sphere_hit_and_miss() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(3.0, 0.0, 0.0), 1.0).is_none());
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn origin_inside_sphere_hits_exit() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }
}
