//! Ray intersection against analytic shapes
//!
//! Planes are two-sided; spheres and boxes are solid and report no hit for
//! rays that start inside them. Reported normals always face the ray origin.

use glam::Vec3;

use super::scene::{Ray, RayHit};

/// Parallel-ray tolerance
const PARALLEL_EPSILON: f32 = 1e-6;

/// Collision shape in world space
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Points `p` with `p · normal == offset` (normal is unit length)
    Plane { normal: Vec3, offset: f32 },
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box
    Cuboid { min: Vec3, max: Vec3 },
}

impl Shape {
    /// Plane through `point` with the given normal (normalized here, +Y if degenerate)
    pub fn plane(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.try_normalize().unwrap_or(Vec3::Y);
        Shape::Plane {
            normal,
            offset: normal.dot(point),
        }
    }

    /// Horizontal plane at `height`
    pub fn horizontal_plane(height: f32) -> Self {
        Shape::Plane {
            normal: Vec3::Y,
            offset: height,
        }
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Shape::Sphere {
            center,
            radius: radius.abs(),
        }
    }

    /// Box from two corners in any order
    pub fn cuboid(a: Vec3, b: Vec3) -> Self {
        Shape::Cuboid {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

/// First intersection of `ray` with `shape` at distance >= 0
pub fn ray_shape(ray: &Ray, shape: &Shape) -> Option<RayHit> {
    match *shape {
        Shape::Plane { normal, offset } => ray_plane(ray, normal, offset),
        Shape::Sphere { center, radius } => ray_sphere(ray, center, radius),
        Shape::Cuboid { min, max } => ray_cuboid(ray, min, max),
    }
}

fn ray_plane(ray: &Ray, normal: Vec3, offset: f32) -> Option<RayHit> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (offset - normal.dot(ray.origin)) / denom;
    if t < 0.0 {
        return None;
    }
    // Face the side the ray came from
    let normal = if denom < 0.0 { normal } else { -normal };
    Some(RayHit {
        point: ray.at(t),
        normal,
        distance: t,
    })
}

fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<RayHit> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        // Origin inside
        return None;
    }
    if b > 0.0 {
        // Outside and pointing away
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    let point = ray.at(t);
    Some(RayHit {
        point,
        normal: (point - center).normalize_or_zero(),
        distance: t,
    })
}

/// Slab test; the entry axis gives the normal
fn ray_cuboid(ray: &Ray, min: Vec3, max: Vec3) -> Option<RayHit> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_normal = Vec3::ZERO;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];

        if dir.abs() < PARALLEL_EPSILON {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        let mut sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            sign = 1.0;
        }
        if t0 > t_enter {
            t_enter = t0;
            enter_normal = Vec3::ZERO;
            enter_normal[axis] = sign;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_enter < 0.0 {
        // Origin inside, or the box is behind the ray
        return None;
    }

    Some(RayHit {
        point: ray.at(t_enter),
        normal: enter_normal,
        distance: t_enter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, dir: Vec3) -> Ray {
        Ray::new(origin, dir).expect("valid ray")
    }

    #[test]
    fn test_plane_hit_from_above() {
        let hit = ray_shape(
            &ray(Vec3::new(2.0, 5.0, -1.0), Vec3::NEG_Y),
            &Shape::horizontal_plane(1.0),
        )
        .expect("hit");
        assert!(hit.point.abs_diff_eq(Vec3::new(2.0, 1.0, -1.0), 1e-5));
        assert_eq!(hit.normal, Vec3::Y);
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_plane_normal_faces_ray_from_below() {
        let hit = ray_shape(&ray(Vec3::ZERO, Vec3::Y), &Shape::horizontal_plane(3.0)).expect("hit");
        assert_eq!(hit.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_plane_parallel_or_behind_misses() {
        let plane = Shape::horizontal_plane(0.0);
        assert!(ray_shape(&ray(Vec3::Y, Vec3::X), &plane).is_none());
        assert!(ray_shape(&ray(Vec3::Y, Vec3::Y), &plane).is_none());
    }

    #[test]
    fn test_tilted_plane() {
        let plane = Shape::plane(Vec3::new(-1.0, 1.0, 0.0), Vec3::ZERO);
        let hit = ray_shape(&ray(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y), &plane).expect("hit");
        assert!(hit.point.abs_diff_eq(Vec3::ZERO, 1e-5));
        assert!((hit.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_hit_and_normal() {
        let sphere = Shape::sphere(Vec3::new(0.0, 0.0, 10.0), 2.0);
        let hit = ray_shape(&ray(Vec3::ZERO, Vec3::Z), &sphere).expect("hit");
        assert!((hit.distance - 8.0).abs() < 1e-5);
        assert!(hit.normal.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_sphere_miss_cases() {
        let sphere = Shape::sphere(Vec3::new(0.0, 0.0, 10.0), 2.0);
        // Passing beside
        assert!(ray_shape(&ray(Vec3::new(3.0, 0.0, 0.0), Vec3::Z), &sphere).is_none());
        // Pointing away
        assert!(ray_shape(&ray(Vec3::ZERO, Vec3::NEG_Z), &sphere).is_none());
        // Starting inside
        assert!(ray_shape(&ray(Vec3::new(0.0, 0.0, 10.0), Vec3::Z), &sphere).is_none());
    }

    #[test]
    fn test_cuboid_entry_face() {
        let cuboid = Shape::cuboid(Vec3::new(4.0, 0.0, -1.0), Vec3::new(6.0, 3.0, 1.0));
        let hit = ray_shape(&ray(Vec3::new(0.0, 1.0, 0.0), Vec3::X), &cuboid).expect("hit");
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::NEG_X);

        let hit = ray_shape(&ray(Vec3::new(5.0, 10.0, 0.0), Vec3::NEG_Y), &cuboid).expect("hit top");
        assert!((hit.point.y - 3.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_cuboid_miss_cases() {
        let cuboid = Shape::cuboid(Vec3::new(6.0, 3.0, 1.0), Vec3::new(4.0, 0.0, -1.0));
        assert!(ray_shape(&ray(Vec3::new(0.0, 5.0, 0.0), Vec3::X), &cuboid).is_none());
        assert!(ray_shape(&ray(Vec3::new(5.0, 1.0, 0.0), Vec3::X), &cuboid).is_none());
    }
}
