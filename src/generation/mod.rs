//! Generation stages upstream of the graph
//!
//! Point sampling plus the two planar collaborators the pipeline consumes
//! through traits: a [`Triangulator`] and a [`CellDecomposer`].

mod points;
mod delaunay;
mod voronoi;

pub use points::{sample_points, sample_points_seeded};
pub use delaunay::{DelaunatorTriangulator, Triangulator};
pub use voronoi::{CellDecomposer, ClippedVoronoi};
