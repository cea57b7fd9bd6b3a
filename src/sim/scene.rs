//! Scene query facade
//!
//! The aim resolver and arc preview only ever talk to the world through
//! [`SceneQuery::cast`]. [`Scene`] is a small analytic implementation used by
//! the demo binary, the reference projectile world and tests.

use std::ops::BitOr;
use std::rc::Rc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::{Shape, ray_shape};

/// Bit set of collision layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);
    pub const DEFAULT: Self = Self(1 << 0);
    /// Walkable/aimable surfaces
    pub const GROUND: Self = Self(1 << 1);
    /// Walls, rocks and other things that block a throw
    pub const OBSTACLE: Self = Self(1 << 2);

    /// Mask containing a single layer index (0..32)
    pub const fn layer(index: u32) -> Self {
        Self(1 << (index & 31))
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Whether trigger volumes take part in a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPolicy {
    Ignore,
    Collide,
}

/// A half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. `None` for zero or non-finite directions.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    #[inline]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Result of a successful ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit position
    pub point: Vec3,
    /// Surface normal at the hit, facing the ray origin
    pub normal: Vec3,
    /// Distance along the ray
    pub distance: f32,
}

/// Synchronous ray-cast interface onto the host's geometry
pub trait SceneQuery {
    /// Nearest hit within `max_distance` on any layer in `mask`
    fn cast(
        &self,
        ray: &Ray,
        max_distance: f32,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RayHit>;
}

impl<T: SceneQuery + ?Sized> SceneQuery for Rc<T> {
    fn cast(
        &self,
        ray: &Ray,
        max_distance: f32,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RayHit> {
        (**self).cast(ray, max_distance, mask, triggers)
    }
}

/// One piece of static geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub layer: LayerMask,
    pub is_trigger: bool,
}

impl Collider {
    pub fn new(shape: Shape, layer: LayerMask) -> Self {
        Self {
            shape,
            layer,
            is_trigger: false,
        }
    }

    /// Infinite horizontal ground at `height`
    pub fn ground(height: f32) -> Self {
        Self::new(Shape::horizontal_plane(height), LayerMask::GROUND)
    }

    /// Trigger volume: ignored by queries using [`TriggerPolicy::Ignore`]
    pub fn trigger(shape: Shape, layer: LayerMask) -> Self {
        Self {
            shape,
            layer,
            is_trigger: true,
        }
    }
}

/// Analytic collider set
#[derive(Debug, Clone, Default)]
pub struct Scene {
    colliders: Vec<Collider>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style add
    pub fn with(mut self, collider: Collider) -> Self {
        self.colliders.push(collider);
        self
    }

    pub fn add(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }
}

impl SceneQuery for Scene {
    fn cast(
        &self,
        ray: &Ray,
        max_distance: f32,
        mask: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RayHit> {
        self.colliders
            .iter()
            .filter(|c| c.layer.intersects(mask))
            .filter(|c| !(c.is_trigger && triggers == TriggerPolicy::Ignore))
            .filter_map(|c| ray_shape(ray, &c.shape))
            .filter(|hit| hit.distance <= max_distance)
            .min_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
