//! Planar primitives shared by every pipeline stage
//!
//! Points are plain `glam::Vec2` values. Graph stages never hash a float
//! directly; they go through a [`KeyPolicy`] which turns a point into a
//! [`VertexKey`].

use glam::{DVec2, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world space
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower-left corner
    pub min: Vec2,
    /// Upper-right corner
    pub max: Vec2,
}

impl Bounds {
    /// Create a bounding box from two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Width along x
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height along y
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True when both corners are finite and the box has positive area
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies inside the box (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Corners in counter-clockwise order starting at `min`
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Return a copy shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }
}

/// Hashable identity of a graph vertex
///
/// Two points map to the same key exactly when the [`KeyPolicy`] that
/// produced the keys considers them the same vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    x: i64,
    y: i64,
}

/// How points are turned into graph keys
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum KeyPolicy {
    /// Exact coordinate equality (`-0.0` and `0.0` are the same vertex)
    #[default]
    Exact,
    /// Coordinates rounded to the nearest multiple of `grid` before comparison
    Quantized {
        /// Grid spacing in world units, must be positive
        grid: f32,
    },
}

impl KeyPolicy {
    /// Compute the key for a point
    pub fn key(&self, point: Vec2) -> VertexKey {
        match *self {
            KeyPolicy::Exact => VertexKey {
                x: exact_bits(point.x),
                y: exact_bits(point.y),
            },
            KeyPolicy::Quantized { grid } => VertexKey {
                x: (point.x / grid).round() as i64,
                y: (point.y / grid).round() as i64,
            },
        }
    }
}

// Folds -0.0 onto 0.0 so key equality matches float `==` for finite values.
fn exact_bits(value: f32) -> i64 {
    let value = if value == 0.0 { 0.0 } else { value };
    i64::from(value.to_bits())
}

/// Grid spacing for an f32 tolerance, taken from its shortest decimal form
///
/// `f64::from(1e-3f32)` is `0.0010000000474974513`; snapping against that
/// moves values which already sit on the decimal grid.
pub fn grid_step(tolerance: f32) -> f64 {
    tolerance
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(tolerance))
}

/// Round a point to the nearest multiple of `step` on both axes
pub fn snap(point: DVec2, step: f64) -> DVec2 {
    (point / step).round() * step
}
