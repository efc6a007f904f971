//! Walkable layout generation from a random point cloud
//!
//! Samples points in a rectangle, partitions the rectangle into Voronoi
//! cells, folds the cell walls into an adjacency graph, reduces the graph to
//! a minimum spanning tree and rasterizes a path of square cells along the
//! tree. Output is engine-agnostic placement data.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_layout::*;
//! use glam::Vec2;
//!
//! let config = LayoutConfigBuilder::new()
//!     .resolution(200)
//!     .origin(Vec2::new(-500.0, -500.0))
//!     .cube_size(20.0).unwrap()
//!     .path_width(60.0).unwrap()
//!     .seed(42)
//!     .build().unwrap();
//!
//! let pass = LayoutGenerator::new(config).generate().unwrap();
//! for position in pass.world_path_positions() {
//!     // spawn a floor tile at `position`
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-region lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and outputs

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod region;
pub mod generation;
pub mod graph;
pub mod mst;
pub mod path;
pub mod layout;
pub mod shared;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{LayoutError, Result};
pub use config::{GraphSource, LayoutConfig, LayoutConfigBuilder};
pub use geometry::{Bounds, KeyPolicy, VertexKey};
pub use region::Region;
pub use generation::{
    sample_points, sample_points_seeded, CellDecomposer, ClippedVoronoi, DelaunatorTriangulator,
    Triangulator,
};
pub use graph::AdjacencyGraph;
pub use mst::{compute_mst, MstEdge, MstResult};
pub use path::{rasterize, PathCell};
pub use layout::{LayoutGenerator, LayoutPass};
pub use shared::SharedLayout;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vector types for convenience
pub use glam::{Vec2, Vec3};
