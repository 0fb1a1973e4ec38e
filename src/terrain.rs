//! Terrain height field composed from a tiled base grid and local providers.
//!
//! The [`HeightField`] resource answers elevation and slope queries for any
//! point on the world plane. The base elevation comes from an external
//! [`TerrainSampler`] wrapped modulo the tile dimensions; localised features
//! such as drift mounds contribute on top through registered
//! [`provider::HeightProvider`]s. Every query returns a defined value even
//! before the terrain asset has loaded.

use bevy_ecs::prelude::*;
use glam::Vec2;
use thiserror::Error;

use crate::constants::{DEFAULT_TILE_SIZE, SLOPE_SAMPLE_STEP, TERRAIN_AMPLITUDE};
use crate::numeric::{scaled_index, wrap_coord};
use crate::vector_math::vec_mag;

pub mod provider;

use provider::{HeightProvider, ProviderId};

/// Errors produced when constructing a terrain sampler from asset data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TerrainError {
    /// The grid was declared with a zero dimension.
    #[error("terrain grid dimensions must be positive (got {width}x{height})")]
    EmptyGrid {
        /// Declared column count.
        width: u32,
        /// Declared row count.
        height: u32,
    },
    /// The sample buffer does not match the declared dimensions.
    #[error("terrain grid length {len} does not match {width}x{height}")]
    SizeMismatch {
        /// Length of the supplied sample buffer.
        len: usize,
        /// Declared column count.
        width: u32,
        /// Declared row count.
        height: u32,
    },
}

/// Base elevation feed supplied by the asset layer.
///
/// Implementations expose a pixel grid of scalar samples in `[0, 1]`. The
/// height field wraps world coordinates modulo its tile size before indexing,
/// so the grid is treated as tiling in both axes. `is_ready` reports whether
/// the backing asset has finished loading; until then the field substitutes
/// zero height everywhere.
pub trait TerrainSampler {
    /// Whether the backing asset has finished loading.
    fn is_ready(&self) -> bool;
    /// Number of sample columns.
    fn width(&self) -> u32;
    /// Number of sample rows.
    fn height(&self) -> u32;
    /// Scalar sample in `[0, 1]` at the given pixel.
    fn sample(&self, px: u32, py: u32) -> f32;
}

/// In-memory row-major sample grid implementing [`TerrainSampler`].
#[derive(Debug, Clone)]
pub struct GridSampler {
    values: Vec<f32>,
    width: u32,
    height: u32,
}

impl GridSampler {
    /// Builds a sampler from row-major samples and grid dimensions.
    ///
    /// # Errors
    /// Returns [`TerrainError::EmptyGrid`] for zero dimensions and
    /// [`TerrainError::SizeMismatch`] when the buffer length disagrees with
    /// them.
    pub fn new(values: Vec<f32>, width: u32, height: u32) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::EmptyGrid { width, height });
        }
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(TerrainError::SizeMismatch {
                len: values.len(),
                width,
                height,
            });
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Builds a uniform grid where every sample holds `value`.
    #[must_use]
    pub fn uniform(value: f32, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            values: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }
}

impl TerrainSampler for GridSampler {
    fn is_ready(&self) -> bool {
        true
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn sample(&self, px: u32, py: u32) -> f32 {
        let index = py as usize * self.width as usize + px as usize;
        self.values
            .get(index)
            .copied()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }
}

/// Local slope estimate at a world point.
///
/// `angle` is the direction of steepest ascent on the plane and `gradient`
/// its magnitude. Both are zero on flat or unready terrain.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Slope {
    /// Direction of the gradient vector, `atan2(dy, dx)` in radians.
    pub angle: f32,
    /// Magnitude of the gradient vector, always non-negative.
    pub gradient: f32,
}

/// Queryable terrain elevation over the world plane.
///
/// Total height at a point is the tile-wrapped base sample plus the sum of
/// all registered provider contributions, clamped below at zero. The field
/// never creates or destroys providers; external owners register them when a
/// terrain-perturbing obstacle spawns and unregister them on despawn.
#[derive(Resource)]
pub struct HeightField {
    sampler: Option<Box<dyn TerrainSampler + Send + Sync>>,
    tile_size: Vec2,
    amplitude: f32,
    providers: Vec<(ProviderId, Box<dyn HeightProvider + Send + Sync>)>,
    next_provider: u64,
}

impl Default for HeightField {
    fn default() -> Self {
        Self {
            sampler: None,
            tile_size: Vec2::splat(DEFAULT_TILE_SIZE),
            amplitude: TERRAIN_AMPLITUDE,
            providers: Vec::new(),
            next_provider: 0,
        }
    }
}

impl HeightField {
    /// Creates a field backed by `sampler`, tiling every `tile_size` world
    /// units and scaling unit samples to `amplitude` world units of height.
    #[must_use]
    pub fn new(
        sampler: Box<dyn TerrainSampler + Send + Sync>,
        tile_size: Vec2,
        amplitude: f32,
    ) -> Self {
        Self {
            sampler: Some(sampler),
            tile_size,
            amplitude,
            ..Self::default()
        }
    }

    /// Swaps in a freshly loaded sampler, keeping registered providers.
    pub fn set_sampler(&mut self, sampler: Box<dyn TerrainSampler + Send + Sync>) {
        self.sampler = Some(sampler);
    }

    /// Registers a height provider and returns its handle.
    pub fn add_provider(&mut self, provider: Box<dyn HeightProvider + Send + Sync>) -> ProviderId {
        let id = ProviderId::new(self.next_provider);
        self.next_provider = self.next_provider.wrapping_add(1);
        self.providers.push((id, provider));
        id
    }

    /// Unregisters a provider, returning `false` if the handle was unknown.
    pub fn remove_provider(&mut self, id: ProviderId) -> bool {
        let before = self.providers.len();
        self.providers.retain(|(pid, _)| *pid != id);
        self.providers.len() != before
    }

    /// Number of currently registered providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Total terrain height at `pos`, never negative.
    ///
    /// Queries made before the base grid is loaded see a base height of zero;
    /// providers still apply, so dynamically added mounds remain skiable
    /// during asset load.
    #[must_use]
    pub fn height_at(&self, pos: Vec2) -> f32 {
        let extra: f32 = self
            .providers
            .iter()
            .filter(|(_, p)| p.affects(pos))
            .map(|(_, p)| p.contribution_at(pos))
            .sum();
        (self.base_height(pos) + extra).max(0.0)
    }

    /// Estimates the local slope with one-sided forward differences.
    ///
    /// Heights are sampled at the query point and at `+ε` along each axis.
    /// The forward-only sampling is intentionally biased; it matches the
    /// behaviour downstream consumers were tuned against. Degenerate results
    /// collapse to the zero [`Slope`].
    #[must_use]
    pub fn slope_at(&self, pos: Vec2) -> Slope {
        let step = SLOPE_SAMPLE_STEP;
        if step <= 0.0 {
            return Slope::default();
        }
        let here = self.height_at(pos);
        let dx = (self.height_at(pos + Vec2::new(step, 0.0)) - here) / step;
        let dy = (self.height_at(pos + Vec2::new(0.0, step)) - here) / step;
        let gradient = vec_mag(dx, dy);
        if !gradient.is_finite() || gradient <= f32::EPSILON {
            return Slope::default();
        }
        Slope {
            angle: dy.atan2(dx),
            gradient,
        }
    }

    fn base_height(&self, pos: Vec2) -> f32 {
        let Some(sampler) = self.sampler.as_deref() else {
            return 0.0;
        };
        if !sampler.is_ready() {
            return 0.0;
        }
        let (tile_w, tile_h) = (self.tile_size.x, self.tile_size.y);
        if tile_w <= 0.0 || tile_h <= 0.0 {
            return 0.0;
        }
        let u = wrap_coord(pos.x, tile_w) / tile_w;
        let v = wrap_coord(pos.y, tile_h) / tile_h;
        let px = scaled_index(u, sampler.width());
        let py = scaled_index(v, sampler.height());
        sampler.sample(px, py) * self.amplitude
    }
}
