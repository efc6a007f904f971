//! Minimum spanning tree over an [`AdjacencyGraph`]
//!
//! Prim's algorithm with a lazy-deletion binary heap: candidate edges are
//! never removed or re-keyed, a popped edge whose target is already in the
//! tree is simply skipped.

use glam::Vec2;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::error::{LayoutError, Result};
use crate::graph::AdjacencyGraph;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One edge selected into the spanning tree, oriented away from the start vertex
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MstEdge {
    /// Endpoint already in the tree when the edge was accepted
    pub from: Vec2,
    /// Endpoint the edge brought into the tree
    pub to: Vec2,
}

impl MstEdge {
    /// Create a tree edge
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    /// Euclidean length
    #[inline]
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// True when both endpoints coincide
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }
}

/// Heap candidate: an edge between two vertex ids and its length
///
/// `seq` is the push order and breaks weight ties first-in first-out.
#[derive(Debug, Clone, Copy)]
struct WeightedEdge {
    weight: f32,
    seq: u64,
    from: usize,
    to: usize,
}

impl PartialEq for WeightedEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeightedEdge {}

impl PartialOrd for WeightedEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-heap of candidate edges with stale entries left in place
#[derive(Debug, Default)]
struct EdgeQueue {
    heap: BinaryHeap<Reverse<WeightedEdge>>,
    next_seq: u64,
}

impl EdgeQueue {
    fn push(&mut self, from: usize, to: usize, weight: f32) {
        self.heap.push(Reverse(WeightedEdge {
            weight,
            seq: self.next_seq,
            from,
            to,
        }));
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<WeightedEdge> {
        self.heap.pop().map(|Reverse(edge)| edge)
    }
}

/// Output of [`compute_mst`]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MstResult {
    /// Accepted edges in acceptance order (non-decreasing frontier weight)
    pub edges: Vec<MstEdge>,
    /// Vertices in the start vertex's component, start included
    pub reached: usize,
    /// Vertices in the whole graph
    pub total_vertices: usize,
}

impl MstResult {
    /// True when the tree spans every vertex of the graph
    #[inline]
    pub fn is_spanning(&self) -> bool {
        self.reached == self.total_vertices
    }

    /// Sum of edge lengths
    pub fn total_weight(&self) -> f32 {
        self.edges.iter().map(MstEdge::length).sum()
    }

    /// Turn a partial tree into an error
    ///
    /// # Errors
    ///
    /// Returns `DisconnectedGraph` when some vertex was not reached.
    pub fn require_spanning(self) -> Result<Self> {
        if self.is_spanning() {
            Ok(self)
        } else {
            Err(LayoutError::DisconnectedGraph {
                reached: self.reached,
                total: self.total_vertices,
            })
        }
    }
}

/// Compute a minimum spanning tree with Prim's algorithm
///
/// Starts from the first vertex inserted into `graph`. Only outgoing edges
/// are followed, so a vertex reachable solely through a missing reverse edge
/// stays outside the tree. On a disconnected graph the tree covers the start
/// vertex's component only; check [`MstResult::is_spanning`].
///
/// # Example
///
/// ```rust
/// use voronoi_layout::*;
/// use glam::Vec2;
///
/// let (a, b, c) = (Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 5.0));
/// let mut graph = AdjacencyGraph::new(KeyPolicy::Exact);
/// for (x, y) in [(a, b), (b, a), (a, c), (c, a)] {
///     graph.add_edge(x, y);
/// }
///
/// let mst = compute_mst(&graph);
/// assert_eq!(mst.edges, vec![MstEdge::new(a, b), MstEdge::new(a, c)]);
/// assert!(mst.is_spanning());
/// ```
pub fn compute_mst(graph: &AdjacencyGraph) -> MstResult {
    let total_vertices = graph.vertex_count();
    if graph.is_empty() {
        return MstResult::default();
    }

    let vertices = graph.vertices();
    let mut visited = vec![false; total_vertices];
    let mut queue = EdgeQueue::default();
    let mut edges = Vec::with_capacity(total_vertices - 1);
    let mut stale = 0usize;

    let push_frontier = |queue: &mut EdgeQueue, visited: &[bool], from: usize| {
        for &to in graph.neighbors(from) {
            if !visited[to] {
                queue.push(from, to, vertices[from].distance(vertices[to]));
            }
        }
    };

    visited[0] = true;
    push_frontier(&mut queue, &visited, 0);

    while let Some(edge) = queue.pop() {
        if visited[edge.to] {
            stale += 1;
            continue;
        }
        visited[edge.to] = true;
        edges.push(MstEdge::new(vertices[edge.from], vertices[edge.to]));
        push_frontier(&mut queue, &visited, edge.to);
    }

    let result = MstResult {
        reached: edges.len() + 1,
        total_vertices,
        edges,
    };

    log::debug!(
        "MST: {} edges, {} stale candidates skipped, total weight {:.3}",
        result.edges.len(),
        stale,
        result.total_weight()
    );
    if !result.is_spanning() {
        log::warn!(
            "Graph is disconnected: spanning tree reached {} of {} vertices",
            result.reached,
            result.total_vertices
        );
    }

    result
}
