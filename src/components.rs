//! ECS component types shared between the simulation systems.
//! Includes entity-kind tags, collidable extents, skier markers, and the
//! terrain-perturbation descriptor attached to drift mounds.
use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::locomotion::ObstacleHardness;

/// Marker for the player-controlled skier.
#[derive(Component, Debug, Default, Serialize)]
pub struct Player;

/// Marker for an AI-controlled skier.
///
/// AI skiers share the physics and locomotion components of the player but
/// follow a harsher collision policy: a single obstacle hit crashes them.
#[derive(Component, Debug, Default, Serialize)]
pub struct AiSkier;

/// Tag describing what a collidable entity is, keyed into the hitbox
/// profile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    /// The player-controlled skier.
    Player,
    /// An AI-controlled skier.
    AiSkier,
    /// A hard static obstacle.
    Tree,
    /// A hard static obstacle, lower profile than a tree.
    Rock,
    /// A soft skiable mound that also perturbs the terrain.
    DriftMound,
    /// A slalom gate; its bounding region is a non-colliding detection zone.
    Gate,
}

impl EntityKind {
    /// Returns `true` for static obstacle kinds that skiers can collide with.
    #[must_use]
    pub const fn is_obstacle(self) -> bool {
        matches!(self, Self::Tree | Self::Rock | Self::DriftMound)
    }

    /// Impact hardness of an obstacle kind, `None` for non-obstacles.
    #[must_use]
    pub const fn hardness(self) -> Option<ObstacleHardness> {
        match self {
            Self::Tree | Self::Rock => Some(ObstacleHardness::Hard),
            Self::DriftMound => Some(ObstacleHardness::Soft),
            Self::Player | Self::AiSkier | Self::Gate => None,
        }
    }
}

/// Collision participation: entity kind plus the nominal bounding size the
/// hitbox profile shrinks or shifts.
#[derive(Component, Debug, Clone, Serialize)]
pub struct Collidable {
    /// Kind tag used to look up the hitbox profile.
    pub kind: EntityKind,
    /// Nominal width of the entity's bounding box in world units.
    pub width: f32,
    /// Nominal height of the entity's bounding box in world units.
    pub height: f32,
}

impl Collidable {
    /// Creates a collidable of `kind` with the given nominal extents.
    #[must_use]
    pub const fn new(kind: EntityKind, width: f32, height: f32) -> Self {
        Self {
            kind,
            width,
            height,
        }
    }
}

/// Terrain perturbation attached to an obstacle, e.g. a drift mound.
///
/// While the component exists, a matching radial bump provider is registered
/// with the height field; removing the component (or despawning the entity)
/// unregisters it.
#[derive(Component, Debug, Clone, Serialize)]
pub struct TerrainBump {
    /// Footprint width of the bump in world units.
    pub footprint_width: f32,
    /// Footprint height of the bump in world units.
    pub footprint_height: f32,
    /// Peak additional elevation at the bump centre.
    pub max_height: f32,
}
