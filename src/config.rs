//! Layout Configuration and Builder
//!
//! This module provides the plain numeric configuration of one generation
//! pass and a validating builder for it.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::{Bounds, KeyPolicy};

/// Default number of sampled points
pub const DEFAULT_RESOLUTION: usize = 64;
/// Default edge length of one path cell
pub const DEFAULT_CUBE_SIZE: f32 = 10.0;
/// Default path strip thickness
pub const DEFAULT_PATH_WIDTH: f32 = 10.0;
/// Default numeric tolerance handed to the cell decomposer
pub const DEFAULT_TOLERANCE: f32 = 1e-3;

/// Which vertices the adjacency graph is built over
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphSource {
    /// Region boundary vertices, edges along cell walls
    #[default]
    CellBoundaries,
    /// Sampled sites, edges from the Delaunay triangulation
    Triangulation,
}

/// Configuration for one layout generation pass
///
/// # Example
///
/// ```rust
/// use voronoi_layout::*;
///
/// let config = LayoutConfigBuilder::new()
///     .resolution(32)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: LayoutConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Number of points to sample
    pub resolution: usize,

    /// Translation applied to every sampled point
    pub origin: Vec2,

    /// Constant height added when cells are placed in world space
    ///
    /// The whole pipeline runs in the plane; elevation only touches the
    /// output boundary.
    pub elevation: f32,

    /// Lower corner of the sampling rectangle, before `origin` is applied
    pub min: Vec2,

    /// Upper corner of the sampling rectangle, before `origin` is applied
    pub max: Vec2,

    /// Edge length of one rasterized path cell
    pub cube_size: f32,

    /// Thickness of the rasterized strip along each tree edge
    pub path_width: f32,

    /// Numeric tolerance for the cell decomposer
    pub tolerance: f32,

    /// Random seed; `None` samples from the thread RNG
    pub seed: Option<u64>,

    /// Vertices the adjacency graph is built over
    pub graph_source: GraphSource,

    /// How graph vertices are compared
    pub key_policy: KeyPolicy,

    /// Fail the pass instead of returning a partial spanning tree
    pub require_connected: bool,
}

impl LayoutConfig {
    /// World-space bounding box of the sampling area (`min..max` shifted by `origin`)
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min, self.max).translated(self.origin)
    }

    /// Check every field the builder would have checked
    ///
    /// Fields are public and may be set or deserialized directly, so a pass
    /// validates its configuration before sampling.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        finite_vec("Origin", self.origin)?;
        finite("Elevation", self.elevation)?;
        sampling_area(self.min, self.max)?;
        positive("Cube size", self.cube_size)?;
        positive("Path width", self.path_width)?;
        positive("Tolerance", self.tolerance)?;
        if let KeyPolicy::Quantized { grid } = self.key_policy {
            positive("Key grid", grid)?;
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            origin: Vec2::ZERO,
            elevation: 0.0,
            min: Vec2::ZERO,
            max: Vec2::splat(1000.0),
            cube_size: DEFAULT_CUBE_SIZE,
            path_width: DEFAULT_PATH_WIDTH,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
            graph_source: GraphSource::default(),
            key_policy: KeyPolicy::default(),
            require_connected: false,
        }
    }
}

/// Builder for creating LayoutConfig with validation
///
/// # Example
///
/// ```rust
/// use voronoi_layout::*;
/// use glam::Vec2;
///
/// let config = LayoutConfigBuilder::new()
///     .resolution(100)
///     .origin(Vec2::new(500.0, 500.0))
///     .sampling_area(Vec2::new(-200.0, -200.0), Vec2::new(200.0, 200.0))
///     .unwrap()
///     .cube_size(20.0)
///     .unwrap()
///     .path_width(60.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.bounds().min, Vec2::new(300.0, 300.0));
/// ```
#[derive(Debug, Clone)]
pub struct LayoutConfigBuilder {
    config: LayoutConfig,
}

impl LayoutConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - resolution: 64
    /// - origin: (0, 0), elevation 0
    /// - sampling area: (0, 0)..(1000, 1000)
    /// - cube_size: 10, path_width: 10
    /// - tolerance: 0.001
    /// - seed: None (non-deterministic)
    /// - graph built over cell boundaries with exact vertex keys
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    /// Set the number of points to sample
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Set the translation applied to every sampled point
    pub fn origin(mut self, origin: Vec2) -> Self {
        self.config.origin = origin;
        self
    }

    /// Set the elevation applied to world-space output
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the elevation is not finite
    pub fn elevation(mut self, elevation: f32) -> Result<Self> {
        self.config.elevation = finite("Elevation", elevation)?;
        Ok(self)
    }

    /// Set the sampling rectangle in the local frame
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a corner is not finite or `min` exceeds `max`
    pub fn sampling_area(mut self, min: Vec2, max: Vec2) -> Result<Self> {
        sampling_area(min, max)?;
        self.config.min = min;
        self.config.max = max;
        Ok(self)
    }

    /// Set the edge length of one path cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the size is not a positive finite number
    pub fn cube_size(mut self, cube_size: f32) -> Result<Self> {
        self.config.cube_size = positive("Cube size", cube_size)?;
        Ok(self)
    }

    /// Set the thickness of the path strip
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the width is not a positive finite number
    pub fn path_width(mut self, path_width: f32) -> Result<Self> {
        self.config.path_width = positive("Path width", path_width)?;
        Ok(self)
    }

    /// Set the tolerance passed to the cell decomposer
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the tolerance is not a positive finite number
    pub fn tolerance(mut self, tolerance: f32) -> Result<Self> {
        self.config.tolerance = positive("Tolerance", tolerance)?;
        Ok(self)
    }

    /// Fix the random seed so passes are reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Choose which vertices the adjacency graph is built over
    pub fn graph_source(mut self, source: GraphSource) -> Self {
        self.config.graph_source = source;
        self
    }

    /// Choose how graph vertices are compared
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a quantized grid is not a positive finite number
    pub fn key_policy(mut self, policy: KeyPolicy) -> Result<Self> {
        if let KeyPolicy::Quantized { grid } = policy {
            positive("Key grid", grid)?;
        }
        self.config.key_policy = policy;
        Ok(self)
    }

    /// Fail passes whose graph is not fully connected
    pub fn require_connected(mut self, strict: bool) -> Self {
        self.config.require_connected = strict;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any field fails [`LayoutConfig::validate`]
    pub fn build(self) -> Result<LayoutConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for LayoutConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn finite(name: &str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{} must be finite (got {})",
            name, value
        )))
    }
}

fn finite_vec(name: &str, value: Vec2) -> Result<Vec2> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{} must be finite (got {})",
            name, value
        )))
    }
}

fn sampling_area(min: Vec2, max: Vec2) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(LayoutError::InvalidConfig(format!(
            "Sampling area must be finite (got {} .. {})",
            min, max
        )));
    }
    if min.x > max.x || min.y > max.y {
        return Err(LayoutError::InvalidConfig(format!(
            "Sampling area min must not exceed max (got {} .. {})",
            min, max
        )));
    }
    Ok(())
}

fn positive(name: &str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidConfig(format!(
            "{} must be positive (got {})",
            name, value
        )))
    }
}
