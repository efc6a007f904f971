//! Layout generation pass and its result

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{GraphSource, LayoutConfig};
use crate::error::{LayoutError, Result};
use crate::generation::{
    sample_points, CellDecomposer, ClippedVoronoi, DelaunatorTriangulator, Triangulator,
};
use crate::graph::AdjacencyGraph;
use crate::mst::{compute_mst, MstEdge, MstResult};
use crate::path::{rasterize, PathCell};
use crate::region::Region;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Every artifact of one completed generation pass
///
/// A pass owns its data outright; running another pass builds a fresh
/// `LayoutPass` and the old one is simply dropped.
///
/// # Examples
///
/// ```
/// use voronoi_layout::*;
///
/// let config = LayoutConfigBuilder::new()
///     .resolution(50)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let pass = LayoutGenerator::new(config).generate().unwrap();
/// println!("{} path cells along {} tree edges", pass.path().len(), pass.tree_edges().len());
/// ```
#[derive(Clone)]
pub struct LayoutPass {
    config: LayoutConfig,
    points: Vec<Vec2>,
    triangles: Vec<[usize; 3]>,
    regions: Vec<Region>,
    graph: AdjacencyGraph,
    mst: MstResult,
    path: Vec<PathCell>,

    /// Spatial index over the sampled sites (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl LayoutPass {
    /// Configuration this pass ran with
    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Sampled points in sampling order
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Triangles of the point set, as index triples into [`points`](Self::points)
    #[inline]
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// One region per sampled point, same order as [`points`](Self::points)
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Adjacency graph the spanning tree was computed on
    #[inline]
    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    /// Spanning tree with its connectivity summary
    #[inline]
    pub fn mst(&self) -> &MstResult {
        &self.mst
    }

    /// Spanning tree edges in acceptance order
    #[inline]
    pub fn tree_edges(&self) -> &[MstEdge] {
        &self.mst.edges
    }

    /// Rasterized path cells
    #[inline]
    pub fn path(&self) -> &[PathCell] {
        &self.path
    }

    /// Path cell centres in world space, lifted to the configured elevation
    pub fn world_path_positions(&self) -> Vec<Vec3> {
        self.path
            .iter()
            .map(|cell| cell.world_position(self.config.elevation))
            .collect()
    }

    /// Sampled points in world space, lifted to the configured elevation
    pub fn world_points(&self) -> Vec<Vec3> {
        self.points
            .iter()
            .map(|p| p.extend(self.config.elevation))
            .collect()
    }

    /// Index of the sampled site nearest to `position` (requires spatial-index feature)
    ///
    /// The nearest site's region is the region containing `position`.
    /// Returns `None` when the pass sampled no points.
    #[cfg(feature = "spatial-index")]
    pub fn nearest_site(&self, position: Vec2) -> Option<usize> {
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
    }

    /// Region containing `position` (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    pub fn region_at(&self, position: Vec2) -> Option<&Region> {
        self.nearest_site(position)
            .and_then(|site| self.regions.get(site))
    }
}

/// Runs generation passes for one configuration
///
/// Generic over the planar collaborators so callers can plug in their own
/// triangulator or cell decomposer.
#[derive(Debug, Clone)]
pub struct LayoutGenerator<T = DelaunatorTriangulator, D = ClippedVoronoi> {
    config: LayoutConfig,
    triangulator: T,
    decomposer: D,
}

impl LayoutGenerator {
    /// Create a generator with the default Delaunay triangulator and clipped Voronoi cells
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_collaborators(config, DelaunatorTriangulator, ClippedVoronoi)
    }
}

impl<T: Triangulator, D: CellDecomposer> LayoutGenerator<T, D> {
    /// Create a generator with custom collaborators
    pub fn with_collaborators(config: LayoutConfig, triangulator: T, decomposer: D) -> Self {
        Self {
            config,
            triangulator,
            decomposer,
        }
    }

    /// Configuration used for new passes
    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration used for new passes
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    /// Run one full pass
    ///
    /// Uses a ChaCha8 stream when the configuration has a seed, the thread
    /// RNG otherwise.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidConfig` when the configuration does not validate,
    /// with the collaborator's error when triangulation or decomposition
    /// fails, or with `DisconnectedGraph` in strict mode.
    pub fn generate(&self) -> Result<LayoutPass> {
        match self.config.seed {
            Some(seed) => self.generate_with_rng(&mut ChaCha8Rng::seed_from_u64(seed)),
            None => self.generate_with_rng(&mut rand::thread_rng()),
        }
    }

    /// Run one full pass drawing points from `rng`
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<LayoutPass> {
        let config = &self.config;
        config.validate()?;

        log::info!("STEP 1 : Randomly setting points in area");
        let points = sample_points(rng, config.resolution, config.origin, config.min, config.max);
        self.generate_from_points(points)
    }

    /// Run every stage after sampling on caller-supplied points
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_from_points(&self, points: Vec<Vec2>) -> Result<LayoutPass> {
        let config = &self.config;
        config.validate()?;

        log::info!("STEP 2 : Delaunay triangulation of {} points", points.len());
        let triangles = self.triangulator.triangulate(&points).map_err(|err| {
            log::warn!("Delaunay triangulation has failed! {}", err);
            err
        })?;
        log::info!("Triangulation completed: {} triangles", triangles.len());

        log::info!("STEP 3 : Cell decomposition");
        let regions = self
            .decomposer
            .decompose(&points, config.bounds(), config.tolerance)
            .map_err(|err| {
                log::warn!("Cell decomposition has failed! {}", err);
                err
            })?;
        if regions.len() != points.len() {
            let err = LayoutError::DecompositionFailed(format!(
                "expected {} regions, got {}",
                points.len(),
                regions.len()
            ));
            log::warn!("Cell decomposition has failed! {}", err);
            return Err(err);
        }

        log::info!("STEP 4 : Building adjacency graph from {:?}", config.graph_source);
        let graph = match config.graph_source {
            GraphSource::CellBoundaries => AdjacencyGraph::from_regions(&regions, config.key_policy),
            GraphSource::Triangulation => {
                AdjacencyGraph::from_triangulation(&points, &triangles, config.key_policy)
            }
        };

        log::info!("STEP 5 : Minimum spanning tree over {} vertices", graph.vertex_count());
        let mut mst = compute_mst(&graph);
        if config.require_connected {
            mst = mst.require_spanning()?;
        }

        log::info!("STEP 6 : Rasterizing {} tree edges", mst.edges.len());
        let path = rasterize(&mst.edges, config.cube_size, config.path_width);
        log::info!("Layout pass completed: {} path cells", path.len());

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&points);

        Ok(LayoutPass {
            config: *config,
            points,
            triangles,
            regions,
            graph,
            mst,
            path,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }
}
