//! Ballistic Throw demo
//!
//! Headless run of one throw: aims at a ground point for half a second,
//! releases, then steps the projectile until it lands.
//!
//! Usage: `ballistic-throw [seed] [target_x] [target_z]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ballistic_throw::ThrowConfig;
    use ballistic_throw::consts::SIM_DT;
    use ballistic_throw::sim::{
        AimOverlay, Camera, Collider, LayerMask, ProjectileTemplate, ProjectileWorld, Scene,
        Shape, ThrowController, TickInput, Transform,
    };
    use glam::{Vec2, Vec3};

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let target_x: f32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(4.0);
    let target_z: f32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(9.0);

    let config = ThrowConfig::default();
    let scene = Rc::new(
        Scene::new()
            .with(Collider::ground(0.0))
            .with(Collider::new(
                Shape::cuboid(Vec3::new(-6.0, 0.0, 4.0), Vec3::new(-4.0, 2.0, 6.0)),
                LayerMask::OBSTACLE,
            )),
    );
    let world = Rc::new(RefCell::new(ProjectileWorld::new(scene.clone(), config.gravity)));
    let stone = world
        .borrow_mut()
        .register_template(ProjectileTemplate::new("stone"));
    let overlay = Rc::new(RefCell::new(AimOverlay::default()));

    let camera = Camera::looking_at(
        Vec3::new(0.0, 12.0, -10.0),
        Vec3::new(0.0, 0.0, 6.0),
        60.0,
        Vec2::new(1280.0, 720.0),
    );
    let target = Vec3::new(target_x, 0.0, target_z);
    let Some(pointer) = camera.world_to_screen(target) else {
        log::error!("target {} is behind the camera", target);
        return;
    };

    let mut controller = ThrowController::builder(config, scene)
        .viewpoint(camera)
        .presenter(overlay.clone())
        .factory(world.clone())
        .seed(seed)
        .actor(Transform::IDENTITY)
        .launch_anchor(Transform::from_position(Vec3::new(0.3, 1.5, 0.4)))
        .template(stone)
        .build();

    log::info!("Ballistic Throw demo (seed {seed}), aiming at {target}");

    let aim = TickInput {
        pointer: Some(pointer),
        ..Default::default()
    };
    controller.tick(
        &TickInput {
            press: true,
            ..aim.clone()
        },
        SIM_DT,
    );
    for _ in 0..25 {
        controller.tick(&aim, SIM_DT);
    }

    {
        let overlay = overlay.borrow();
        log::info!(
            "reticle at {}, arc has {} samples ending at {:?}",
            overlay.reticle_position,
            overlay.arc.len(),
            overlay.arc.last()
        );
    }

    let Some(thrown) = controller.tick(
        &TickInput {
            release: true,
            ..aim
        },
        SIM_DT,
    ) else {
        log::warn!("nothing was thrown");
        return;
    };

    let mut elapsed = 0.0;
    while elapsed < 5.0 {
        let impacts = world.borrow_mut().step(SIM_DT);
        elapsed += SIM_DT;
        if let Some(impact) = impacts.iter().find(|i| i.handle == thrown) {
            let miss = (impact.hit.point - target).length();
            log::info!(
                "{:?} landed at {} after {:.2}s ({:.3} m from aim)",
                thrown,
                impact.hit.point,
                elapsed,
                miss
            );
            println!("landed at {} ({:.3} m from aim)", impact.hit.point, miss);
            return;
        }
    }
    log::warn!("{:?} did not land within 5 s", thrown);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; hosts drive ThrowController directly
}
