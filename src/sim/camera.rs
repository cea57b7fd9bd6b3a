//! Screen-to-world rays
//!
//! [`Viewpoint`] is what the aim resolver needs from the active camera.
//! [`Camera`] is a pinhole implementation with a top-left pixel origin.

use glam::{Vec2, Vec3};

use super::scene::Ray;
use crate::UP;

/// Source of world rays for pointer positions
pub trait Viewpoint {
    /// Ray from the eye through `screen` (pixels). `None` if the viewport is degenerate.
    fn screen_ray(&self, screen: Vec2) -> Option<Ray>;
}

/// Perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// View direction (need not be normalized)
    pub forward: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera {
    pub fn looking_at(position: Vec3, target: Vec3, fov_y_degrees: f32, viewport: Vec2) -> Self {
        Self {
            position,
            forward: target - position,
            fov_y: fov_y_degrees.to_radians(),
            viewport,
        }
    }

    /// Orthonormal (right, up, forward) basis. Straight up/down views use +X as right.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward.try_normalize().unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(UP).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// Half extents of the image plane at unit distance
    fn half_extents(&self) -> Option<Vec2> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let half_h = (self.fov_y * 0.5).tan();
        if !half_h.is_finite() || half_h <= 0.0 {
            return None;
        }
        let aspect = self.viewport.x / self.viewport.y;
        Some(Vec2::new(half_h * aspect, half_h))
    }

    /// Pixel position of a world point, `None` if it is behind the camera
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let half = self.half_extents()?;
        let (right, up, forward) = self.basis();
        let rel = point - self.position;
        let depth = rel.dot(forward);
        if depth <= f32::EPSILON {
            return None;
        }
        let ndc = Vec2::new(rel.dot(right) / (depth * half.x), rel.dot(up) / (depth * half.y));
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }
}

impl Viewpoint for Camera {
    fn screen_ray(&self, screen: Vec2) -> Option<Ray> {
        let half = self.half_extents()?;
        let (right, up, forward) = self.basis();
        let ndc_x = 2.0 * screen.x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / self.viewport.y;
        let direction = forward + right * (ndc_x * half.x) + up * (ndc_y * half.y);
        Ray::new(self.position, direction)
    }
}
