//! Error types for layout generation

use thiserror::Error;

/// Errors that can abort a generation pass
///
/// A failed pass publishes nothing; callers decide whether to resample and
/// retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The triangulator rejected the point set (collinear or too few distinct points)
    #[error("triangulation failed: {0}")]
    TriangulationFailed(String),
    /// The cell decomposer could not produce regions for the point set
    #[error("cell decomposition failed: {0}")]
    DecompositionFailed(String),
    /// The spanning tree did not reach every vertex (strict mode only)
    #[error("graph is disconnected: spanning tree reached {reached} of {total} vertices")]
    DisconnectedGraph {
        /// Vertices in the start vertex's component
        reached: usize,
        /// Vertices in the whole graph
        total: usize,
    },
}

/// Result type alias for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
