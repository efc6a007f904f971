//! Region Structure
//!
//! The closed polygon of space closest to one sampled site.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single cell of the planar subdivision
///
/// # Design Notes
///
/// The polygon is stored open: the first and last vertices are distinct and
/// the closing edge from last back to first is implied. Regions of adjacent
/// sites share a boundary edge, walked in opposite directions when both
/// polygons use the same winding.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// The sampled point this region was built around
    pub site: Vec2,

    /// Boundary vertices in walk order (counter-clockwise for regions
    /// produced by [`ClippedVoronoi`](crate::generation::ClippedVoronoi))
    pub vertices: Vec<Vec2>,
}

impl Region {
    /// Create a new region
    pub fn new(site: Vec2, vertices: Vec<Vec2>) -> Self {
        Self { site, vertices }
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// A region needs three vertices to enclose any area
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Iterate boundary edges `(v[j], v[(j + 1) mod len])`, closing edge included
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let len = self.vertices.len();
        (0..len).map(move |j| (self.vertices[j], self.vertices[(j + 1) % len]))
    }

    /// Signed polygon area (shoelace formula), positive for counter-clockwise winding
    pub fn signed_area(&self) -> f32 {
        self.edges().map(|(a, b)| a.perp_dot(b)).sum::<f32>() * 0.5
    }

    /// Unsigned polygon area
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Vertex average, or the site for an empty polygon
    pub fn centroid(&self) -> Vec2 {
        if self.vertices.is_empty() {
            return self.site;
        }
        self.vertices.iter().copied().sum::<Vec2>() / self.vertices.len() as f32
    }
}
