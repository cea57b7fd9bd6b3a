//! Projectile spawning boundary
//!
//! The controller hands a [`ProjectileSpec`] plus solved velocity and spin to
//! a [`ProjectileFactory`]. Once spawned, the actor belongs to the physics
//! side; this crate keeps only the returned handle.

use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Handle to a spawned actor (engine-owned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorHandle(pub u32);

/// Identity of a projectile prefab/template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

/// What to instantiate and where
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub template: TemplateId,
    pub position: Vec3,
    pub orientation: Quat,
}

/// Rigid-body capability attached to a projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub use_gravity: bool,
    /// Sweep every step against the scene instead of point sampling
    pub continuous_collision: bool,
    pub mass: f32,
    /// Scalar moment of inertia (uniform body)
    pub inertia: f32,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            use_gravity: true,
            continuous_collision: true,
            mass: 1.0,
            inertia: 1.0,
        }
    }
}

/// Instantiates projectiles and drives their initial state
pub trait ProjectileFactory {
    /// Spawn from a template. `None` if the template is unknown.
    fn spawn(&mut self, spec: &ProjectileSpec) -> Option<ActorHandle>;
    fn has_rigid_body(&self, actor: ActorHandle) -> bool;
    fn attach_rigid_body(&mut self, actor: ActorHandle, body: RigidBody);
    fn set_linear_velocity(&mut self, actor: ActorHandle, velocity: Vec3);
    fn apply_torque_impulse(&mut self, actor: ActorHandle, impulse: Vec3);
}

impl<T: ProjectileFactory + ?Sized> ProjectileFactory for Rc<RefCell<T>> {
    fn spawn(&mut self, spec: &ProjectileSpec) -> Option<ActorHandle> {
        self.borrow_mut().spawn(spec)
    }

    fn has_rigid_body(&self, actor: ActorHandle) -> bool {
        self.borrow().has_rigid_body(actor)
    }

    fn attach_rigid_body(&mut self, actor: ActorHandle, body: RigidBody) {
        self.borrow_mut().attach_rigid_body(actor, body);
    }

    fn set_linear_velocity(&mut self, actor: ActorHandle, velocity: Vec3) {
        self.borrow_mut().set_linear_velocity(actor, velocity);
    }

    fn apply_torque_impulse(&mut self, actor: ActorHandle, impulse: Vec3) {
        self.borrow_mut().apply_torque_impulse(actor, impulse);
    }
}

/// Spawn a projectile and give it its launch state.
///
/// Templates without a rigid body get the default one (gravity, continuous
/// collision) before velocity and torque are applied. A zero `torque` skips
/// the impulse.
pub fn launch<F: ProjectileFactory + ?Sized>(
    factory: &mut F,
    spec: &ProjectileSpec,
    velocity: Vec3,
    torque: Vec3,
) -> Option<ActorHandle> {
    let actor = factory.spawn(spec)?;

    if !factory.has_rigid_body(actor) {
        log::debug!("projectile {:?} has no rigid body, attaching default", actor);
        factory.attach_rigid_body(actor, RigidBody::default());
    }

    factory.set_linear_velocity(actor, velocity);
    if torque != Vec3::ZERO {
        factory.apply_torque_impulse(actor, torque);
    }
    Some(actor)
}

/// Source of random spin axes
pub trait SpinSource {
    /// Unit vector, uniformly distributed over the sphere
    fn spin_axis(&mut self) -> Vec3;
}

/// Seeded spin source (reproducible throws)
#[derive(Debug, Clone)]
pub struct SeededSpin {
    rng: Pcg32,
}

impl SeededSpin {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl SpinSource for SeededSpin {
    fn spin_axis(&mut self) -> Vec3 {
        // Uniform z and azimuth give a uniform point on the sphere
        let z: f32 = self.rng.random_range(-1.0..=1.0);
        let phi: f32 = self.rng.random_range(0.0..TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }
}
