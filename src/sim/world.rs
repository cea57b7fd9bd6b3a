//! Reference projectile world
//!
//! A minimal physics side for hosts without an engine (the demo binary and
//! integration tests). Bodies move with the same per-step rule as the arc
//! preview, continuous-collision bodies are swept against the scene, and a
//! body that hits something stops and despawns after a short delay.

use glam::{Quat, Vec3};

use super::projectile::{ActorHandle, ProjectileFactory, ProjectileSpec, RigidBody, TemplateId};
use super::scene::{LayerMask, Ray, RayHit, SceneQuery, TriggerPolicy};
use super::trajectory::step_displacement;
use crate::consts::MIN_CAST_LENGTH;

/// Seconds a projectile lingers after impact
pub const DEFAULT_DESPAWN_DELAY: f32 = 0.05;

/// A spawnable projectile kind
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileTemplate {
    pub name: String,
    /// Body the template comes with (`None` = static until one is attached)
    pub rigid_body: Option<RigidBody>,
}

impl ProjectileTemplate {
    /// Template without a rigid body
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rigid_body: None,
        }
    }

    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = Some(body);
        self
    }
}

/// A live projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub handle: ActorHandle,
    pub template: TemplateId,
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub body: Option<RigidBody>,
    /// First blocking hit, once it has landed
    pub impact: Option<RayHit>,
    /// Seconds until removal (set on impact)
    despawn_in: Option<f32>,
}

impl Projectile {
    pub fn has_landed(&self) -> bool {
        self.impact.is_some()
    }
}

/// Impact reported by [`ProjectileWorld::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub handle: ActorHandle,
    pub hit: RayHit,
}

/// Projectiles flying through a static scene
pub struct ProjectileWorld {
    scene: Box<dyn SceneQuery>,
    gravity: Vec3,
    collision_mask: LayerMask,
    despawn_delay: f32,
    templates: Vec<ProjectileTemplate>,
    /// Live projectiles (sorted by handle)
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl ProjectileWorld {
    pub fn new(scene: impl SceneQuery + 'static, gravity: Vec3) -> Self {
        Self {
            scene: Box::new(scene),
            gravity,
            collision_mask: LayerMask::ALL,
            despawn_delay: DEFAULT_DESPAWN_DELAY,
            templates: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_collision_mask(mut self, mask: LayerMask) -> Self {
        self.collision_mask = mask;
        self
    }

    pub fn with_despawn_delay(mut self, seconds: f32) -> Self {
        self.despawn_delay = seconds.max(0.0);
        self
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn register_template(&mut self, template: ProjectileTemplate) -> TemplateId {
        self.templates.push(template);
        TemplateId(self.templates.len() as u32 - 1)
    }

    pub fn template(&self, id: TemplateId) -> Option<&ProjectileTemplate> {
        self.templates.get(id.0 as usize)
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn get(&self, handle: ActorHandle) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.handle == handle)
    }

    fn get_mut(&mut self, handle: ActorHandle) -> Option<&mut Projectile> {
        self.projectiles.iter_mut().find(|p| p.handle == handle)
    }

    /// Advance all projectiles by `dt`. Returns the impacts that happened this step.
    pub fn step(&mut self, dt: f32) -> Vec<Impact> {
        let mut impacts = Vec::new();

        for p in &mut self.projectiles {
            if let Some(timer) = p.despawn_in.as_mut() {
                *timer -= dt;
                continue;
            }
            let Some(body) = p.body else {
                continue;
            };

            let gravity = if body.use_gravity { self.gravity } else { Vec3::ZERO };
            let step = step_displacement(p.velocity, gravity, dt);

            if body.continuous_collision {
                let length = step.length();
                let hit = if length > MIN_CAST_LENGTH {
                    Ray::new(p.position, step).and_then(|ray| {
                        self.scene
                            .cast(&ray, length, self.collision_mask, TriggerPolicy::Ignore)
                    })
                } else {
                    None
                };
                if let Some(hit) = hit {
                    p.position = hit.point;
                    p.velocity = Vec3::ZERO;
                    p.angular_velocity = Vec3::ZERO;
                    p.impact = Some(hit);
                    p.despawn_in = Some(self.despawn_delay);
                    impacts.push(Impact {
                        handle: p.handle,
                        hit,
                    });
                    continue;
                }
            }

            p.position += step;
            p.velocity += gravity * dt;
            let spin = Quat::from_scaled_axis(p.angular_velocity * dt);
            p.orientation = (spin * p.orientation).normalize();
        }

        self.projectiles
            .retain(|p| p.despawn_in.is_none_or(|timer| timer > 0.0));

        for impact in &impacts {
            log::debug!("projectile {:?} landed at {}", impact.handle, impact.hit.point);
        }
        impacts
    }
}

impl ProjectileFactory for ProjectileWorld {
    fn spawn(&mut self, spec: &ProjectileSpec) -> Option<ActorHandle> {
        let Some(template) = self.template(spec.template) else {
            log::warn!("unknown projectile template {:?}", spec.template);
            return None;
        };
        let body = template.rigid_body;

        let handle = ActorHandle(self.next_id);
        self.next_id += 1;
        self.projectiles.push(Projectile {
            handle,
            template: spec.template,
            position: spec.position,
            orientation: spec.orientation,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            body,
            impact: None,
            despawn_in: None,
        });
        Some(handle)
    }

    fn has_rigid_body(&self, actor: ActorHandle) -> bool {
        self.get(actor).is_some_and(|p| p.body.is_some())
    }

    fn attach_rigid_body(&mut self, actor: ActorHandle, body: RigidBody) {
        if let Some(p) = self.get_mut(actor) {
            p.body = Some(body);
        }
    }

    fn set_linear_velocity(&mut self, actor: ActorHandle, velocity: Vec3) {
        if let Some(p) = self.get_mut(actor) {
            p.velocity = velocity;
        }
    }

    fn apply_torque_impulse(&mut self, actor: ActorHandle, impulse: Vec3) {
        match self.get_mut(actor) {
            Some(Projectile {
                body: Some(body),
                angular_velocity,
                ..
            }) if body.inertia > 0.0 => {
                *angular_velocity += impulse / body.inertia;
            }
            _ => log::debug!("torque impulse on {:?} ignored (no body)", actor),
        }
    }
}
