//! App wiring for the fixed-step simulation tick.
//!
//! [`SkiCorePlugin`] registers the per-tick systems in their data-flow
//! order: terrain bump registration, locomotion displacement, vertical
//! physics, then collision resolution. One `App::update` is one simulation
//! tick; the plugin performs no work of its own between ticks.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_transform::prelude::Transform;

use crate::collision::{collision_system, sync_terrain_bumps_system, TerrainBumpIndex};
use crate::locomotion::Locomotion;
use crate::physics::skier_physics_system;
use crate::terrain::HeightField;

/// Plugin wiring the skiing core into a Bevy app.
///
/// Inserts a default [`HeightField`] when none is present (queries against it
/// return zero height until a sampler is installed) and chains the simulation
/// systems so each tick observes a consistent world.
#[derive(Default)]
pub struct SkiCorePlugin;

impl Plugin for SkiCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeightField>()
            .init_resource::<TerrainBumpIndex>()
            .add_systems(
                Update,
                (
                    sync_terrain_bumps_system,
                    locomotion_system,
                    skier_physics_system,
                    collision_system,
                )
                    .chain(),
            );
    }
}

/// Advances every locomotion state machine and applies its displacement.
pub fn locomotion_system(mut query: Query<(&mut Transform, &mut Locomotion)>) {
    for (mut transform, mut locomotion) in &mut query {
        locomotion.tick();
        let velocity = locomotion.velocity();
        transform.translation.x += velocity.x;
        transform.translation.y += velocity.y;
    }
}
