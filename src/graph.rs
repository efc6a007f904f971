//! Adjacency graph over planar points
//!
//! Vertices are identified by [`VertexKey`] under the graph's
//! [`KeyPolicy`]; the first coordinates seen for a key are the ones stored.
//! Vertex ids are dense and follow insertion order, so "the first key" of a
//! graph is always vertex 0.

use glam::Vec2;
use std::collections::HashMap;

use crate::geometry::{KeyPolicy, VertexKey};
use crate::region::Region;

/// Directed adjacency mapping from each point to its distinct neighbours
///
/// Storage is directed. Builders populate it symmetrically where their input
/// allows; a missing reverse edge is legal and simply not traversable.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    policy: KeyPolicy,
    index: HashMap<VertexKey, usize>,
    vertices: Vec<Vec2>,
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    /// Create an empty graph
    pub fn new(policy: KeyPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Fold region boundaries into a graph
    ///
    /// For every polygon vertex `v[j]` a directed edge `v[j] -> v[(j + 1) mod len]`
    /// is recorded. A wall shared by two regions is recorded once from each
    /// side, so the result is close to symmetric; walls on the domain border
    /// only appear in one direction.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voronoi_layout::*;
    /// use glam::Vec2;
    ///
    /// let triangle = Region::new(
    ///     Vec2::new(3.0, 3.0),
    ///     vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
    /// );
    /// let graph = AdjacencyGraph::from_regions(&[triangle], KeyPolicy::Exact);
    ///
    /// assert_eq!(graph.vertex_count(), 3);
    /// assert!(graph.contains_edge(Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)));
    /// assert!(!graph.contains_edge(Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0)));
    /// ```
    pub fn from_regions(regions: &[Region], policy: KeyPolicy) -> Self {
        let mut graph = Self::new(policy);

        for region in regions {
            for (from, to) in region.edges() {
                graph.add_edge(from, to);
            }
        }

        log::debug!(
            "Cell graph: {} regions -> {} vertices, {} directed edges",
            regions.len(),
            graph.vertex_count(),
            graph.edge_count()
        );
        graph
    }

    /// Build the site graph of a triangulation, each triangle side in both directions
    ///
    /// Every point becomes a vertex in input order, including points the
    /// triangulator left out of all triangles.
    pub fn from_triangulation(points: &[Vec2], triangles: &[[usize; 3]], policy: KeyPolicy) -> Self {
        let mut graph = Self::new(policy);
        for &point in points {
            graph.add_vertex(point);
        }

        for triangle in triangles {
            for k in 0..3 {
                let (Some(&a), Some(&b)) = (points.get(triangle[k]), points.get(triangle[(k + 1) % 3]))
                else {
                    log::warn!("Triangle {:?} references a missing point", triangle);
                    continue;
                };
                graph.add_edge(a, b);
                graph.add_edge(b, a);
            }
        }

        log::debug!(
            "Site graph: {} triangles -> {} vertices, {} directed edges",
            triangles.len(),
            graph.vertex_count(),
            graph.edge_count()
        );
        graph
    }

    /// Insert a vertex if its key is new, returning its id either way
    pub fn add_vertex(&mut self, point: Vec2) -> usize {
        let key = self.policy.key(point);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.vertices.len();
        self.index.insert(key, id);
        self.vertices.push(point);
        self.neighbors.push(Vec::new());
        id
    }

    /// Record a directed edge, creating either endpoint as needed
    ///
    /// Returns `false` for self-loops and for edges already present.
    pub fn add_edge(&mut self, from: Vec2, to: Vec2) -> bool {
        let from_id = self.add_vertex(from);
        let to_id = self.add_vertex(to);
        if from_id == to_id || self.neighbors[from_id].contains(&to_id) {
            return false;
        }
        self.neighbors[from_id].push(to_id);
        true
    }

    /// Policy used to compare vertices
    #[inline]
    pub fn key_policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Number of distinct vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }

    /// True when the graph has no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices in insertion order
    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Coordinates of a vertex id
    #[inline]
    pub fn vertex(&self, id: usize) -> Option<Vec2> {
        self.vertices.get(id).copied()
    }

    /// Id of the vertex matching `point`, if any
    pub fn vertex_id(&self, point: Vec2) -> Option<usize> {
        self.index.get(&self.policy.key(point)).copied()
    }

    /// Outgoing neighbour ids, empty for an unknown id
    pub fn neighbors(&self, id: usize) -> &[usize] {
        self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Outgoing neighbour coordinates of `point`
    pub fn neighbors_of(&self, point: Vec2) -> Vec<Vec2> {
        self.vertex_id(point)
            .map(|id| self.neighbors[id].iter().map(|&n| self.vertices[n]).collect())
            .unwrap_or_default()
    }

    /// Check for the directed edge `from -> to`
    pub fn contains_edge(&self, from: Vec2, to: Vec2) -> bool {
        match (self.vertex_id(from), self.vertex_id(to)) {
            (Some(a), Some(b)) => self.neighbors[a].contains(&b),
            _ => false,
        }
    }

    /// True when every edge has its reverse
    pub fn is_symmetric(&self) -> bool {
        self.neighbors
            .iter()
            .enumerate()
            .all(|(a, list)| list.iter().all(|&b| self.neighbors[b].contains(&a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{sample_points_seeded, CellDecomposer, ClippedVoronoi};
    use crate::geometry::Bounds;

    fn p(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_triangle_region() {
        let region = Region::new(p(3.0, 3.0), vec![p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0)]);
        let graph = AdjacencyGraph::from_regions(&[region], KeyPolicy::Exact);

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.neighbors_of(p(0.0, 0.0)), vec![p(10.0, 0.0)]);
        assert_eq!(graph.neighbors_of(p(10.0, 0.0)), vec![p(0.0, 10.0)]);
        assert_eq!(graph.neighbors_of(p(0.0, 10.0)), vec![p(0.0, 0.0)]);
    }

    #[test]
    fn test_single_rectangle_region() {
        let region = Region::new(
            p(5.0, 2.0),
            vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 4.0), p(0.0, 4.0)],
        );
        let graph = AdjacencyGraph::from_regions(&[region], KeyPolicy::Exact);

        assert_eq!(graph.vertex_count(), 4);
        for id in 0..4 {
            assert_eq!(graph.neighbors(id).len(), 1);
        }
        assert!(!graph.is_symmetric());
    }

    #[test]
    fn test_adjacent_rectangles_share_wall() {
        let left = Region::new(
            p(1.0, 1.0),
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)],
        );
        let right = Region::new(
            p(3.0, 1.0),
            vec![p(2.0, 0.0), p(4.0, 0.0), p(4.0, 2.0), p(2.0, 2.0)],
        );
        let graph = AdjacencyGraph::from_regions(&[left, right], KeyPolicy::Exact);

        assert_eq!(graph.vertex_count(), 6);
        assert!(graph.contains_edge(p(2.0, 0.0), p(2.0, 2.0)));
        assert!(graph.contains_edge(p(2.0, 2.0), p(2.0, 0.0)));
        assert_eq!(graph.neighbors_of(p(2.0, 0.0)).len(), 2);
        assert_eq!(graph.neighbors_of(p(0.0, 0.0)).len(), 1);
    }

    #[test]
    fn test_duplicate_edges_and_self_loops_are_dropped() {
        let mut graph = AdjacencyGraph::new(KeyPolicy::Exact);
        assert!(graph.add_edge(p(0.0, 0.0), p(1.0, 0.0)));
        assert!(!graph.add_edge(p(0.0, 0.0), p(1.0, 0.0)));
        assert!(!graph.add_edge(p(1.0, 0.0), p(1.0, 0.0)));
        assert_eq!(graph.edge_count(), 1);

        // A polygon that revisits a vertex collapses to one neighbour entry
        let region = Region::new(p(0.0, 0.0), vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)]);
        let graph = AdjacencyGraph::from_regions(&[region], KeyPolicy::Exact);
        assert_eq!(graph.neighbors_of(p(0.0, 0.0)), vec![p(1.0, 0.0)]);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let region = Region::new(p(0.0, 0.0), vec![p(7.0, 7.0), p(1.0, 0.0), p(0.0, 1.0)]);
        let graph = AdjacencyGraph::from_regions(&[region], KeyPolicy::Exact);
        assert_eq!(graph.vertex(0), Some(p(7.0, 7.0)));
        assert_eq!(graph.vertex_id(p(0.0, 1.0)), Some(2));
        assert_eq!(graph.vertex(3), None);
        assert!(graph.neighbors(3).is_empty());
    }

    #[test]
    fn test_quantized_policy_merges_near_points() {
        let mut graph = AdjacencyGraph::new(KeyPolicy::Quantized { grid: 0.01 });
        graph.add_edge(p(0.0, 0.0), p(1.0, 1.0));
        graph.add_edge(p(1.0001, 0.9999), p(2.0, 2.0));

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.neighbors_of(p(1.0, 1.0)), vec![p(2.0, 2.0)]);
    }

    #[test]
    fn test_triangulation_graph_is_symmetric() {
        let points = vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        let triangles = vec![[0, 1, 2], [0, 2, 3]];
        let graph = AdjacencyGraph::from_triangulation(&points, &triangles, KeyPolicy::Exact);

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 10);
        assert!(graph.is_symmetric());
        assert_eq!(graph.vertex(0), Some(p(0.0, 0.0)));
    }

    #[test]
    fn test_voronoi_interior_walls_are_symmetric() {
        let bounds = Bounds::new(Vec2::ZERO, Vec2::splat(100.0));
        let points = sample_points_seeded(Some(5), 25, Vec2::ZERO, Vec2::ZERO, Vec2::splat(100.0));
        let regions = ClippedVoronoi.decompose(&points, bounds, 1e-3).unwrap();
        let graph = AdjacencyGraph::from_regions(&regions, KeyPolicy::Exact);

        let on_border = |v: Vec2| {
            v.x <= bounds.min.x || v.x >= bounds.max.x || v.y <= bounds.min.y || v.y >= bounds.max.y
        };

        for (a, &va) in graph.vertices().iter().enumerate() {
            for &b in graph.neighbors(a) {
                let vb = graph.vertices()[b];
                if on_border(va) && on_border(vb) {
                    continue;
                }
                assert!(graph.contains_edge(vb, va), "interior wall {} -> {} has no reverse", va, vb);
            }
        }
    }
}
