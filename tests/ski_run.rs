//! End-to-end run: terrain bumps, riding, and provider lifecycle.
use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_transform::prelude::Transform;
use glam::Vec2;
use piste::{
    ActorPhysics, Collidable, EntityKind, HeightField, Locomotion, LocomotionState, TerrainBump,
};
use test_utils::{new_app, run_ticks, spawn_player};

struct SkiWorld {
    app: App,
    player: Entity,
}

impl SkiWorld {
    fn setup() -> Self {
        let mut app = new_app();
        let player = spawn_player(&mut app, 0.0, 0.0);
        Self { app, player }
    }

    fn spawn_drift(&mut self, x: f32, y: f32) -> Entity {
        self.app
            .world_mut()
            .spawn((
                Transform::from_xyz(x, y, 0.0),
                Collidable::new(EntityKind::DriftMound, 60.0, 40.0),
                TerrainBump {
                    footprint_width: 60.0,
                    footprint_height: 40.0,
                    max_height: 3.0,
                },
            ))
            .id()
    }

    fn height_at(&self, x: f32, y: f32) -> f32 {
        self.app
            .world()
            .resource::<HeightField>()
            .height_at(Vec2::new(x, y))
    }

    fn player_physics(&self) -> ActorPhysics {
        self.app
            .world()
            .get::<ActorPhysics>(self.player)
            .map_or_else(ActorPhysics::default, Clone::clone)
    }
}

#[test]
fn drift_mound_raises_and_releases_the_terrain() {
    let mut world = SkiWorld::setup();
    let drift = world.spawn_drift(100.0, 100.0);

    // Before the first tick no provider has been registered yet.
    assert_eq!(world.height_at(100.0, 100.0), 0.0);
    run_ticks(&mut world.app, 1);
    let raised = world.height_at(100.0, 100.0);
    assert!(
        (raised - 3.0).abs() < 1e-4,
        "mound peak should match max_height, got {raised}"
    );
    // Uphill shoulder carries height, the back face barely does.
    assert!(world.height_at(100.0, 85.0) > world.height_at(100.0, 115.0));

    world.app.world_mut().despawn(drift);
    run_ticks(&mut world.app, 1);
    assert_eq!(
        world.height_at(100.0, 100.0),
        0.0,
        "despawning the obstacle must unregister its provider"
    );
}

#[test]
fn player_rides_up_a_mound_in_its_path() {
    let mut world = SkiWorld::setup();
    // Straight downhill from (0, 0); the mound sits on that line.
    world.spawn_drift(0.0, 60.0);

    let mut peak_ground = 0.0_f32;
    for _ in 0..25 {
        run_ticks(&mut world.app, 1);
        peak_ground = peak_ground.max(world.player_physics().ground_level);
    }
    assert!(
        peak_ground > 1.0,
        "riding over the mound should raise the ground sample, got {peak_ground}"
    );
}

#[test]
fn long_run_keeps_the_player_descending() {
    let mut world = SkiWorld::setup();
    run_ticks(&mut world.app, 200);

    let transform = world
        .app
        .world()
        .get::<Transform>(world.player)
        .copied()
        .unwrap_or_default();
    assert!(
        transform.translation.y > 500.0,
        "an unobstructed run should cover ground, got {}",
        transform.translation.y
    );
    let state = world
        .app
        .world()
        .get::<Locomotion>(world.player)
        .map(Locomotion::state);
    assert_eq!(state, Some(LocomotionState::Gliding(piste::Heading::Down)));
    assert!(world.player_physics().grounded);
}
