//! Planar Delaunay triangulation
//!
//! The pipeline only needs a triangulator at its interface: it validates the
//! point set and feeds the site-adjacency graph. [`DelaunatorTriangulator`]
//! is the default implementation, backed by the `delaunator` crate.

use glam::Vec2;

use crate::error::{LayoutError, Result};

/// A source of planar triangulations
pub trait Triangulator {
    /// Triangulate `points`, returning triangles as index triples into `points`
    ///
    /// # Errors
    ///
    /// Returns `TriangulationFailed` when the input is degenerate (fewer than
    /// three distinct points, or all points collinear).
    fn triangulate(&self, points: &[Vec2]) -> Result<Vec<[usize; 3]>>;
}

/// Delaunay triangulation via the `delaunator` crate
///
/// Exact duplicate points are absorbed: only one copy takes part in the
/// triangulation and the others appear in no triangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunatorTriangulator;

impl Triangulator for DelaunatorTriangulator {
    fn triangulate(&self, points: &[Vec2]) -> Result<Vec<[usize; 3]>> {
        if points.len() < 3 {
            return Err(LayoutError::TriangulationFailed(format!(
                "need at least 3 points (got {})",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(LayoutError::TriangulationFailed(format!(
                "non-finite point {}",
                bad
            )));
        }

        let delaunay_points: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point {
                x: p.x as f64,
                y: p.y as f64,
            })
            .collect();

        let triangulation = delaunator::triangulate(&delaunay_points);
        if triangulation.triangles.is_empty() {
            return Err(LayoutError::TriangulationFailed(format!(
                "{} points are collinear or coincident",
                points.len()
            )));
        }

        Ok(triangulation
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_gives_two_triangles() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];

        let triangles = DelaunatorTriangulator.triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 2);
        for triangle in &triangles {
            assert!(triangle.iter().all(|&i| i < points.len()));
        }
    }

    #[test]
    fn test_collinear_points_fail() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 3.0),
        ];

        let result = DelaunatorTriangulator.triangulate(&points);
        assert!(matches!(result, Err(LayoutError::TriangulationFailed(_))));
    }

    #[test]
    fn test_too_few_points_fail() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        assert!(DelaunatorTriangulator.triangulate(&points).is_err());
    }

    #[test]
    fn test_duplicates_are_absorbed() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];

        let triangles = DelaunatorTriangulator.triangulate(&points).unwrap();
        assert_eq!(triangles.len(), 1);
    }
}
