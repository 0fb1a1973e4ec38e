//! Kinematic and collision core for a scrolling skiing game.
//!
//! The crate models a continuous downhill world in which terrain elevation,
//! gravity, and obstacle geometry jointly determine each actor's pose,
//! grounding, and collision outcomes. Four tightly coupled pieces make it
//! up: a composable [`terrain::HeightField`], the per-actor vertical
//! integrator in [`physics`], the [`locomotion`] state machine, and the
//! per-kind [`collision`] layer. Rendering, input, AI heuristics, and asset
//! loading are external collaborators consuming the query surface re-exported
//! here.
pub mod collision;
pub mod components;
pub mod constants;
pub mod locomotion;
pub mod logging;
pub mod numeric;
pub mod physics;
pub mod plugin;
pub mod terrain;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use collision::{
    collision_system, hitbox_for, pole_hitboxes, profile_for, sync_terrain_bumps_system, Gate,
    GateResolution, Hitbox, HitboxProfile, TerrainBumpIndex, DEFAULT_PROFILE,
};
pub use components::{AiSkier, Collidable, EntityKind, Player, TerrainBump};
pub use locomotion::{Heading, Locomotion, LocomotionState, ObstacleHardness, TickTimer};
pub use logging::init as init_logging;
pub use physics::{clamp_fall_speed, skier_physics_system, smooth_toward, ActorPhysics};
pub use plugin::{locomotion_system, SkiCorePlugin};
pub use terrain::provider::{HeightProvider, ProviderId, RadialBumpProvider};
pub use terrain::{GridSampler, HeightField, Slope, TerrainError, TerrainSampler};
pub use vector_math::{vec_mag, vec_normalize};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use piste::prelude::*;
    //! ```

    pub use crate::collision::{Gate, GateResolution};
    pub use crate::components::{AiSkier, Collidable, EntityKind, Player, TerrainBump};
    pub use crate::locomotion::{Heading, Locomotion, LocomotionState};
    pub use crate::physics::ActorPhysics;
    pub use crate::plugin::SkiCorePlugin;
    pub use crate::terrain::provider::RadialBumpProvider;
    pub use crate::terrain::{GridSampler, HeightField};
}
