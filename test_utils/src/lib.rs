//! Shared fixtures for piste integration tests.
//!
//! Builders for headless apps, canned terrain fields, and skier/obstacle
//! spawns so individual test files stay focused on behaviour.

use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_transform::prelude::Transform;
use glam::Vec2;
use piste::{
    ActorPhysics, AiSkier, Collidable, EntityKind, Gate, GridSampler, Heading, HeightField,
    Locomotion, Player, SkiCorePlugin, TerrainSampler,
};

/// Terrain sampler that pretends its backing asset never finished loading.
pub struct UnreadySampler;

impl TerrainSampler for UnreadySampler {
    fn is_ready(&self) -> bool {
        false
    }

    fn width(&self) -> u32 {
        4
    }

    fn height(&self) -> u32 {
        4
    }

    fn sample(&self, _px: u32, _py: u32) -> f32 {
        1.0
    }
}

/// A height field that is `height` world units high everywhere.
pub fn flat_field(height: f32) -> HeightField {
    HeightField::new(
        Box::new(GridSampler::uniform(1.0, 4, 4)),
        Vec2::splat(100.0),
        height,
    )
}

/// A height field rising linearly along `+y` across a 100-unit tile.
///
/// # Panics
/// Panics if the canned grid dimensions are rejected, which would be a bug
/// in the fixture itself.
pub fn ramp_field(amplitude: f32) -> HeightField {
    let width = 20_u32;
    let values: Vec<f32> = (0..width * width)
        .map(|i| (i / width) as f32 / (width - 1) as f32)
        .collect();
    let sampler = GridSampler::new(values, width, width)
        .unwrap_or_else(|e| panic!("fixture grid invalid: {e}"));
    HeightField::new(Box::new(sampler), Vec2::splat(100.0), amplitude)
}

/// A headless app running the full simulation plugin.
pub fn new_app() -> App {
    let mut app = App::new();
    app.add_plugins(SkiCorePlugin);
    app
}

/// Spawns the player skier at `(x, y)` with default physics and locomotion.
pub fn spawn_player(app: &mut App, x: f32, y: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(x, y, 0.0),
            Player,
            Collidable::new(EntityKind::Player, 24.0, 24.0),
            ActorPhysics::default(),
            Locomotion::default(),
        ))
        .id()
}

/// Spawns an AI skier at `(x, y)` heading straight down.
pub fn spawn_ai_skier(app: &mut App, x: f32, y: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(x, y, 0.0),
            AiSkier,
            Collidable::new(EntityKind::AiSkier, 24.0, 24.0),
            ActorPhysics::default(),
            Locomotion::with_heading(Heading::Down),
        ))
        .id()
}

/// Spawns a static obstacle of `kind` with the given nominal extents.
pub fn spawn_obstacle(app: &mut App, kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> Entity {
    app.world_mut()
        .spawn((Transform::from_xyz(x, y, 0.0), Collidable::new(kind, w, h)))
        .id()
}

/// Spawns an unresolved slalom gate centred at `(x, y)`.
pub fn spawn_gate(app: &mut App, x: f32, y: f32, w: f32, h: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(x, y, 0.0),
            Collidable::new(EntityKind::Gate, w, h),
            Gate::default(),
        ))
        .id()
}

/// Runs `ticks` simulation ticks.
pub fn run_ticks(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        app.update();
    }
}
