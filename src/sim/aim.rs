//! Aim target resolution
//!
//! Maps the pointer onto ground geometry. A miss keeps the previous aim point
//! so the reticle and solver never see a null or origin-snapped target.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::camera::Viewpoint;
use super::scene::{SceneQuery, TriggerPolicy};
use crate::UP;
use crate::settings::ThrowConfig;

/// Where the throw currently lands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimPoint {
    pub position: Vec3,
    /// Surface normal at the aim point
    pub normal: Vec3,
}

/// Holds the last valid aim point
#[derive(Debug, Clone, Default)]
pub struct AimResolver {
    last: Option<AimPoint>,
}

impl AimResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last valid aim point (`None` until the first ground hit)
    pub fn aim_point(&self) -> Option<AimPoint> {
        self.last
    }

    /// Cast through `pointer` and update the aim point on a ground hit.
    ///
    /// Returns the current aim point, which is the previous one on a miss.
    pub fn resolve<V, Q>(
        &mut self,
        viewpoint: &V,
        scene: &Q,
        pointer: Vec2,
        config: &ThrowConfig,
    ) -> Option<AimPoint>
    where
        V: Viewpoint + ?Sized,
        Q: SceneQuery + ?Sized,
    {
        let hit = viewpoint.screen_ray(pointer).and_then(|ray| {
            scene.cast(
                &ray,
                config.max_aim_distance,
                config.ground_mask,
                TriggerPolicy::Ignore,
            )
        });

        match hit {
            Some(hit) if hit.point.is_finite() => {
                self.last = Some(AimPoint {
                    position: hit.point,
                    normal: hit.normal,
                });
            }
            _ => log::trace!("aim ray missed ground, keeping last aim point"),
        }
        self.last
    }
}

/// Reticle placement for an aim point: lifted by `hover_height` and, when
/// `align_to_surface` is set, tilted so its +Y matches the surface normal.
pub fn reticle_pose(aim: &AimPoint, config: &ThrowConfig) -> (Vec3, Quat) {
    let position = aim.position + UP * config.hover_height;
    let orientation = if config.align_to_surface {
        aim.normal
            .try_normalize()
            .map(|n| Quat::from_rotation_arc(UP, n))
            .unwrap_or(Quat::IDENTITY)
    } else {
        Quat::IDENTITY
    };
    (position, orientation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Shape;
    use crate::sim::scene::{Collider, LayerMask, Ray, Scene};

    /// Viewpoint that maps pointer x to a downward ray at that x, and
    /// anything with negative x to a ray pointing at the sky.
    struct StubView;

    impl Viewpoint for StubView {
        fn screen_ray(&self, screen: Vec2) -> Option<Ray> {
            if screen.x < 0.0 {
                Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y)
            } else {
                Ray::new(Vec3::new(screen.x, 5.0, screen.y), Vec3::NEG_Y)
            }
        }
    }

    fn scene() -> Scene {
        Scene::new()
            .with(Collider::ground(0.0))
            .with(Collider::new(Shape::sphere(Vec3::new(20.0, 0.0, 0.0), 2.0), LayerMask::OBSTACLE))
    }

    #[test]
    fn test_hit_updates_aim_point() {
        let mut resolver = AimResolver::new();
        let aim = resolver
            .resolve(&StubView, &scene(), Vec2::new(4.0, -3.0), &ThrowConfig::default())
            .expect("hit");
        assert!(aim.position.abs_diff_eq(Vec3::new(4.0, 0.0, -3.0), 1e-5));
        assert_eq!(aim.normal, Vec3::Y);
    }

    #[test]
    fn test_miss_keeps_last_aim_point() {
        let config = ThrowConfig::default();
        let mut resolver = AimResolver::new();
        assert!(resolver.resolve(&StubView, &scene(), Vec2::new(-1.0, 0.0), &config).is_none());

        resolver.resolve(&StubView, &scene(), Vec2::new(2.0, 2.0), &config);
        let kept = resolver.resolve(&StubView, &scene(), Vec2::new(-1.0, 0.0), &config);
        assert_eq!(kept.map(|a| a.position), Some(Vec3::new(2.0, 0.0, 2.0)));
    }

    #[test]
    fn test_only_ground_layer_is_aimable() {
        // The obstacle sphere sits on top of the ground; the aim goes through it
        let mut resolver = AimResolver::new();
        let aim = resolver
            .resolve(&StubView, &scene(), Vec2::new(20.0, 0.0), &ThrowConfig::default())
            .expect("hit");
        assert!(aim.position.y.abs() < 1e-5);
    }

    #[test]
    fn test_max_aim_distance_limits_ray() {
        let config = ThrowConfig {
            max_aim_distance: 4.0,
            ..Default::default()
        };
        let mut resolver = AimResolver::new();
        assert!(resolver.resolve(&StubView, &scene(), Vec2::new(1.0, 1.0), &config).is_none());
    }

    #[test]
    fn test_reticle_pose_hovers_and_aligns() {
        let config = ThrowConfig::default();
        let slope = Vec3::new(1.0, 1.0, 0.0).normalize();
        let aim = AimPoint {
            position: Vec3::new(1.0, 2.0, 3.0),
            normal: slope,
        };
        let (pos, rot) = reticle_pose(&aim, &config);
        assert!(pos.abs_diff_eq(Vec3::new(1.0, 2.02, 3.0), 1e-6));
        assert!((rot * Vec3::Y).abs_diff_eq(slope, 1e-5));
    }

    #[test]
    fn test_reticle_pose_degenerate_normal() {
        let aim = AimPoint {
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
        };
        let (_, rot) = reticle_pose(&aim, &ThrowConfig::default());
        assert_eq!(rot, Quat::IDENTITY);

        let config = ThrowConfig {
            align_to_surface: false,
            ..Default::default()
        };
        let aim = AimPoint {
            position: Vec3::ZERO,
            normal: Vec3::X,
        };
        assert_eq!(reticle_pose(&aim, &config).1, Quat::IDENTITY);
    }
}
