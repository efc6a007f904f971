//! Path rasterization along spanning-tree edges
//!
//! Turns every tree edge into a rectangular strip of fixed-size cells,
//! centred on the edge's centreline. Output is engine-agnostic placement
//! data; spawning anything for it is up to the caller.

use glam::{Vec2, Vec3};

use crate::mst::MstEdge;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placement of one square unit of path
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCell {
    /// Centre of the cell in the plane
    pub position: Vec2,
    /// Edge length of the cell
    pub size: f32,
    /// Index of the tree edge this cell belongs to
    pub edge: usize,
}

impl PathCell {
    /// Centre of the cell in world space, lifted to `elevation`
    #[inline]
    pub fn world_position(&self, elevation: f32) -> Vec3 {
        self.position.extend(elevation)
    }
}

/// Number of cells across a strip of `path_width` (at least one)
pub fn cubes_along_width(path_width: f32, cube_size: f32) -> usize {
    ((path_width / cube_size).round() as usize).max(1)
}

/// Number of cells along an edge of `length` (at least one)
pub fn cubes_along_length(length: f32, cube_size: f32) -> usize {
    ((length / cube_size).round() as usize).max(1)
}

/// Rasterize tree edges into path cells
///
/// For each edge a grid of `cubes_along_length x cubes_along_width` cells is
/// laid out. Cell `(i, j)` is centred at
/// `start + dir * (i + 0.5) * cube_size + perp * (j - (w - 1) / 2) * cube_size`.
/// Zero-length edges have no direction and are skipped, as are edges whose
/// strip has too many cells to allocate.
///
/// # Example
///
/// ```rust
/// use voronoi_layout::*;
/// use glam::Vec2;
///
/// let edge = MstEdge::new(Vec2::ZERO, Vec2::new(100.0, 0.0));
/// let cells = rasterize(&[edge], 10.0, 10.0);
///
/// assert_eq!(cells.len(), 10);
/// assert_eq!(cells[0].position, Vec2::new(5.0, 0.0));
/// assert_eq!(cells[9].position, Vec2::new(95.0, 0.0));
/// ```
pub fn rasterize(edges: &[MstEdge], cube_size: f32, path_width: f32) -> Vec<PathCell> {
    if !(cube_size.is_finite() && cube_size > 0.0) || !(path_width.is_finite() && path_width > 0.0) {
        log::warn!(
            "Cannot rasterize with cube size {} and path width {}",
            cube_size,
            path_width
        );
        return Vec::new();
    }

    let width_cells = cubes_along_width(path_width, cube_size);
    let mut cells = Vec::new();
    let mut degenerate = 0usize;

    for (edge_idx, edge) in edges.iter().enumerate() {
        match rasterize_edge(edge_idx, edge, cube_size, width_cells, &mut cells) {
            EdgeStrip::Placed => {}
            EdgeStrip::Degenerate => {
                degenerate += 1;
                log::debug!("Skipping degenerate edge {} at {}", edge_idx, edge.from);
            }
            EdgeStrip::Oversized => {
                log::warn!(
                    "Skipping edge {} ({} .. {}): too many cells of size {}",
                    edge_idx,
                    edge.from,
                    edge.to,
                    cube_size
                );
            }
        }
    }

    if degenerate > 0 {
        log::warn!("Skipped {} zero-length edges during rasterization", degenerate);
    }
    cells
}

enum EdgeStrip {
    Placed,
    Degenerate,
    Oversized,
}

/// Lay out the strip of one edge
fn rasterize_edge(
    edge_idx: usize,
    edge: &MstEdge,
    cube_size: f32,
    width_cells: usize,
    cells: &mut Vec<PathCell>,
) -> EdgeStrip {
    let delta = edge.to - edge.from;
    let Some(direction) = delta.try_normalize() else {
        return EdgeStrip::Degenerate;
    };
    let perpendicular = direction.perp();
    let length_cells = cubes_along_length(delta.length(), cube_size);
    let half_width = (width_cells as f32 - 1.0) * 0.5;

    let Some(count) = length_cells.checked_mul(width_cells) else {
        return EdgeStrip::Oversized;
    };
    if cells.try_reserve(count).is_err() {
        return EdgeStrip::Oversized;
    }
    for i in 0..length_cells {
        let along = edge.from + direction * ((i as f32 + 0.5) * cube_size);
        for j in 0..width_cells {
            let across = (j as f32 - half_width) * cube_size;
            cells.push(PathCell {
                position: along + perpendicular * across,
                size: cube_size,
                edge: edge_idx,
            });
        }
    }
    EdgeStrip::Placed
}
