//! Voronoi region construction clipped to a bounding box
//!
//! Each site's region is the bounding box cut down by the perpendicular
//! bisector against every Delaunay neighbour. Clipping runs in f64 and the
//! resulting vertices are snapped to the tolerance grid and clamped to the
//! box, so two cells that share a corner report the same f32 coordinates for
//! it and no vertex leaves the box.

use glam::{DVec2, Vec2};
use std::collections::{HashMap, HashSet};

use crate::error::{LayoutError, Result};
use crate::geometry::{grid_step, snap, Bounds, KeyPolicy, VertexKey};
use crate::region::Region;

/// A planar subdivision service
pub trait CellDecomposer {
    /// Produce one closed region per input point, clipped to `bounds`
    ///
    /// The output has the same length and order as `points`.
    ///
    /// # Errors
    ///
    /// Returns `DecompositionFailed` when the bounds or tolerance are
    /// invalid, a point lies outside `bounds`, or a region collapses below
    /// three vertices.
    fn decompose(&self, points: &[Vec2], bounds: Bounds, tolerance: f32) -> Result<Vec<Region>>;
}

/// Bounded Voronoi decomposition by half-plane clipping
#[derive(Debug, Clone, Copy, Default)]
pub struct ClippedVoronoi;

impl CellDecomposer for ClippedVoronoi {
    fn decompose(&self, points: &[Vec2], bounds: Bounds, tolerance: f32) -> Result<Vec<Region>> {
        if !bounds.is_valid() {
            return Err(LayoutError::DecompositionFailed(format!(
                "bounding box {} .. {} has no area",
                bounds.min, bounds.max
            )));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(LayoutError::DecompositionFailed(format!(
                "tolerance must be positive (got {})",
                tolerance
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(LayoutError::DecompositionFailed(format!(
                "non-finite site {}",
                bad
            )));
        }
        if let Some(outside) = points.iter().find(|p| !bounds.contains(**p)) {
            return Err(LayoutError::DecompositionFailed(format!(
                "site {} lies outside {} .. {}",
                outside, bounds.min, bounds.max
            )));
        }

        // Duplicate sites share one cell
        let (sites, site_of_point) = dedup_sites(points);
        let neighbors = build_site_neighbors(&sites);

        let corners: Vec<DVec2> = bounds.corners().iter().map(|c| c.as_dvec2()).collect();
        let step = grid_step(tolerance);

        let cells: Vec<Vec<Vec2>> = sites
            .iter()
            .enumerate()
            .map(|(site_idx, &site)| {
                let mut polygon = corners.clone();
                for &other in &neighbors[site_idx] {
                    polygon = clip_half_plane(&polygon, site, sites[other]);
                    if polygon.is_empty() {
                        break;
                    }
                }
                snap_polygon(&polygon, step, bounds)
            })
            .collect();

        if let Some(site_idx) = cells.iter().position(|cell| cell.len() < 3) {
            return Err(LayoutError::DecompositionFailed(format!(
                "region of site {} collapsed to {} vertices",
                sites[site_idx],
                cells[site_idx].len()
            )));
        }

        Ok(points
            .iter()
            .zip(site_of_point)
            .map(|(&point, site_idx)| Region::new(point, cells[site_idx].clone()))
            .collect())
    }
}

/// Collapse exact duplicates, returning the unique sites and the site index of every input point
fn dedup_sites(points: &[Vec2]) -> (Vec<DVec2>, Vec<usize>) {
    let mut index: HashMap<VertexKey, usize> = HashMap::new();
    let mut sites = Vec::new();
    let mut site_of_point = Vec::with_capacity(points.len());

    for &point in points {
        let key = KeyPolicy::Exact.key(point);
        let site_idx = *index.entry(key).or_insert_with(|| {
            sites.push(point.as_dvec2());
            sites.len() - 1
        });
        site_of_point.push(site_idx);
    }

    (sites, site_of_point)
}

/// Sites whose bisectors can bound each site's cell
///
/// Delaunay neighbours are sufficient. When the sites cannot be triangulated
/// (fewer than three, or collinear) every other site is used instead.
fn build_site_neighbors(sites: &[DVec2]) -> Vec<Vec<usize>> {
    let all_others = |n: usize| -> Vec<Vec<usize>> {
        (0..n)
            .map(|i| (0..n).filter(|&j| j != i).collect())
            .collect()
    };

    if sites.len() < 3 {
        return all_others(sites.len());
    }

    let delaunay_points: Vec<delaunator::Point> = sites
        .iter()
        .map(|p| delaunator::Point { x: p.x, y: p.y })
        .collect();
    let triangulation = delaunator::triangulate(&delaunay_points);
    if triangulation.triangles.is_empty() {
        return all_others(sites.len());
    }

    let mut neighbors: Vec<HashSet<usize>> = vec![HashSet::new(); sites.len()];
    for triangle in triangulation.triangles.chunks_exact(3) {
        for k in 0..3 {
            let a = triangle[k];
            let b = triangle[(k + 1) % 3];
            neighbors[a].insert(b);
            neighbors[b].insert(a);
        }
    }

    neighbors
        .into_iter()
        .map(|set| {
            let mut list: Vec<usize> = set.into_iter().collect();
            list.sort_unstable(); // Deterministic clipping order
            list
        })
        .collect()
}

/// Keep the part of `polygon` closer to `site` than to `other` (Sutherland-Hodgman)
fn clip_half_plane(polygon: &[DVec2], site: DVec2, other: DVec2) -> Vec<DVec2> {
    let normal = other - site;
    let midpoint = (site + other) * 0.5;
    let side = |p: DVec2| (p - midpoint).dot(normal);

    let mut clipped = Vec::with_capacity(polygon.len() + 1);
    for j in 0..polygon.len() {
        let current = polygon[j];
        let next = polygon[(j + 1) % polygon.len()];
        let d_current = side(current);
        let d_next = side(next);

        if d_current <= 0.0 {
            clipped.push(current);
        }
        if (d_current < 0.0 && d_next > 0.0) || (d_current > 0.0 && d_next < 0.0) {
            let t = d_current / (d_current - d_next);
            clipped.push(current + (next - current) * t);
        }
    }

    clipped
}

/// Snap to the tolerance grid, clamp into `bounds` and drop vertices that
/// collapse onto their predecessor
fn snap_polygon(polygon: &[DVec2], step: f64, bounds: Bounds) -> Vec<Vec2> {
    let (min, max) = (bounds.min.as_dvec2(), bounds.max.as_dvec2());
    let mut snapped: Vec<Vec2> = Vec::with_capacity(polygon.len());
    for vertex in polygon {
        let v = snap(*vertex, step).clamp(min, max).as_vec2();
        if snapped.last() != Some(&v) {
            snapped.push(v);
        }
    }
    while snapped.len() > 1 && snapped.first() == snapped.last() {
        snapped.pop();
    }
    snapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::sample_points_seeded;

    fn square_bounds() -> Bounds {
        Bounds::new(Vec2::ZERO, Vec2::splat(100.0))
    }

    #[test]
    fn test_single_site_gets_whole_box() {
        let regions = ClippedVoronoi
            .decompose(&[Vec2::new(30.0, 40.0)], square_bounds(), 1e-3)
            .unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].site, Vec2::new(30.0, 40.0));
        assert_eq!(regions[0].vertex_count(), 4);
        assert!((regions[0].area() - 10_000.0).abs() < 1e-2);
    }

    #[test]
    fn test_two_sites_split_box() {
        let points = [Vec2::new(25.0, 50.0), Vec2::new(75.0, 50.0)];
        let regions = ClippedVoronoi.decompose(&points, square_bounds(), 1e-3).unwrap();

        assert_eq!(regions.len(), 2);
        for region in &regions {
            assert!((region.area() - 5_000.0).abs() < 1e-1);
            assert!(region.vertices.iter().all(|v| v.x <= 50.0 + 1e-3 || region.site.x > 50.0));
        }
        assert!(regions[0].vertices.contains(&Vec2::new(50.0, 0.0)));
        assert!(regions[1].vertices.contains(&Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn test_regions_partition_box() {
        let points = sample_points_seeded(Some(3), 40, Vec2::ZERO, Vec2::ZERO, Vec2::splat(100.0));
        let regions = ClippedVoronoi.decompose(&points, square_bounds(), 1e-3).unwrap();

        assert_eq!(regions.len(), points.len());
        let total: f32 = regions.iter().map(Region::area).sum();
        assert!((total - 10_000.0).abs() < 1.0, "areas sum to {}", total);

        for region in &regions {
            assert!(region.vertex_count() >= 3);
            assert!(region.signed_area() > 0.0, "regions wind counter-clockwise");
            for v in &region.vertices {
                assert!(square_bounds().contains(*v));
            }
        }
    }

    #[test]
    fn test_shared_vertices_are_bit_identical() {
        let points = sample_points_seeded(Some(11), 30, Vec2::ZERO, Vec2::ZERO, Vec2::splat(100.0));
        let regions = ClippedVoronoi.decompose(&points, square_bounds(), 1e-3).unwrap();

        // Every interior vertex of a Voronoi diagram touches at least three cells
        let mut uses: HashMap<VertexKey, usize> = HashMap::new();
        for region in &regions {
            for v in &region.vertices {
                *uses.entry(KeyPolicy::Exact.key(*v)).or_insert(0) += 1;
            }
        }
        let shared = uses.values().filter(|&&count| count >= 2).count();
        assert!(shared > regions.len(), "only {} shared vertices", shared);
    }

    #[test]
    fn test_duplicate_sites_share_region() {
        let points = [
            Vec2::new(20.0, 20.0),
            Vec2::new(80.0, 70.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(60.0, 10.0),
        ];
        let regions = ClippedVoronoi.decompose(&points, square_bounds(), 1e-3).unwrap();

        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0].vertices, regions[2].vertices);
    }

    #[test]
    fn test_collinear_sites_still_decompose() {
        let points = [Vec2::new(10.0, 50.0), Vec2::new(50.0, 50.0), Vec2::new(90.0, 50.0)];
        let regions = ClippedVoronoi.decompose(&points, square_bounds(), 1e-3).unwrap();

        let total: f32 = regions.iter().map(Region::area).sum();
        assert!((total - 10_000.0).abs() < 1e-1);
        assert!((regions[1].area() - 4_000.0).abs() < 1e-1);
    }

    #[test]
    fn test_invalid_input_fails() {
        let flat = Bounds::new(Vec2::ZERO, Vec2::new(100.0, 0.0));
        assert!(matches!(
            ClippedVoronoi.decompose(&[Vec2::ONE], flat, 1e-3),
            Err(LayoutError::DecompositionFailed(_))
        ));
        assert!(ClippedVoronoi.decompose(&[Vec2::ONE], square_bounds(), 0.0).is_err());
        assert!(ClippedVoronoi
            .decompose(&[Vec2::new(f32::NAN, 1.0)], square_bounds(), 1e-3)
            .is_err());
    }

    #[test]
    fn test_box_corners_stay_exact() {
        let bounds = Bounds::new(Vec2::splat(-500.0), Vec2::splat(500.0));
        let regions = ClippedVoronoi.decompose(&[Vec2::new(30.0, 40.0)], bounds, 1e-3).unwrap();
        assert_eq!(regions[0].vertices, bounds.corners().to_vec());

        let regions = ClippedVoronoi
            .decompose(&[Vec2::new(30.0, 40.0)], square_bounds(), 1e-3)
            .unwrap();
        assert!(regions[0].vertices.iter().all(|v| square_bounds().contains(*v)));
    }

    #[test]
    fn test_site_outside_bounds_fails() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 100.0),
            Vec2::new(100.0, 100.0),
        ];
        let small = Bounds::new(Vec2::ZERO, Vec2::splat(10.0));
        assert!(matches!(
            ClippedVoronoi.decompose(&points, small, 1e-3),
            Err(LayoutError::DecompositionFailed(_))
        ));
    }

    #[test]
    fn test_collapsed_region_fails() {
        // Cells narrower than the snapping grid vanish
        let points = [Vec2::new(50.0, 50.0), Vec2::new(50.3, 50.0), Vec2::new(50.6, 50.0)];
        assert!(matches!(
            ClippedVoronoi.decompose(&points, square_bounds(), 1.0),
            Err(LayoutError::DecompositionFailed(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let regions = ClippedVoronoi.decompose(&[], square_bounds(), 1e-3).unwrap();
        assert!(regions.is_empty());
    }
}
