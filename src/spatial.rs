//! Spatial indexing for fast position-to-site lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::Vec2;

/// Wrapper around a 2D KD-tree of sampled sites
///
/// Since every region is the set of points closest to its site, the nearest
/// site to a position is also the region containing it.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build a spatial index from site positions
    ///
    /// Returns `None` for an empty slice.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_layout::*;
    /// use glam::Vec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
    ///
    /// let index = SpatialIndex::new(&sites).unwrap();
    /// assert_eq!(index.find_nearest(Vec2::new(8.0, 1.0)), 1);
    /// # }
    /// ```
    pub fn new(sites: &[Vec2]) -> Option<Self> {
        if sites.is_empty() {
            return None;
        }

        let points: Vec<[f32; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        })
    }

    /// Index of the site nearest to `position`
    pub fn find_nearest(&self, position: Vec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
