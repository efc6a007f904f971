//! Serialized regeneration with atomic publication
//!
//! Passes may be triggered from any thread, for example on every parameter
//! change. Only one pass runs at a time, and readers always get either the
//! whole previous pass or the whole new one.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::generation::{CellDecomposer, ClippedVoronoi, DelaunatorTriangulator, Triangulator};
use crate::layout::{LayoutGenerator, LayoutPass};

/// Holder of the most recent successful pass
///
/// # Example
///
/// ```
/// use voronoi_layout::*;
///
/// let config = LayoutConfigBuilder::new().resolution(20).seed(1).build().unwrap();
/// let shared = SharedLayout::new(LayoutGenerator::new(config));
/// assert!(shared.current().is_none());
///
/// shared.regenerate().unwrap();
/// let pass = shared.current().unwrap();
/// assert_eq!(pass.points().len(), 20);
/// ```
pub struct SharedLayout<T = DelaunatorTriangulator, D = ClippedVoronoi> {
    generator: Mutex<LayoutGenerator<T, D>>,
    current: RwLock<Published>,
}

#[derive(Default)]
struct Published {
    pass: Option<Arc<LayoutPass>>,
    count: u64,
}

impl<T: Triangulator, D: CellDecomposer> SharedLayout<T, D> {
    /// Wrap a generator; nothing is published until the first successful pass
    pub fn new(generator: LayoutGenerator<T, D>) -> Self {
        Self {
            generator: Mutex::new(generator),
            current: RwLock::new(Published::default()),
        }
    }

    /// The most recently published pass, if any
    pub fn current(&self) -> Option<Arc<LayoutPass>> {
        self.current.read().pass.clone()
    }

    /// Number of passes published so far
    pub fn published_count(&self) -> u64 {
        self.current.read().count
    }

    /// Configuration the next pass will use
    pub fn config(&self) -> LayoutConfig {
        *self.generator.lock().config()
    }

    /// Run a pass and publish it on success
    ///
    /// # Errors
    ///
    /// Returns the pass error; the previously published pass stays in place.
    pub fn regenerate(&self) -> Result<Arc<LayoutPass>> {
        let generator = self.generator.lock();
        self.run_and_publish(&generator)
    }

    /// Replace the configuration and run a pass with it
    ///
    /// The new configuration is kept for later passes even if this one fails.
    ///
    /// # Errors
    ///
    /// Returns the pass error; the previously published pass stays in place.
    pub fn reconfigure(&self, config: LayoutConfig) -> Result<Arc<LayoutPass>> {
        let mut generator = self.generator.lock();
        generator.set_config(config);
        self.run_and_publish(&generator)
    }

    // Caller holds the generator lock for the whole pass.
    fn run_and_publish(&self, generator: &LayoutGenerator<T, D>) -> Result<Arc<LayoutPass>> {
        match generator.generate() {
            Ok(pass) => {
                let pass = Arc::new(pass);
                let mut current = self.current.write();
                current.pass = Some(Arc::clone(&pass));
                current.count += 1;
                drop(current);
                Ok(pass)
            }
            Err(err) => {
                log::warn!("Pass aborted, keeping previous layout: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfigBuilder;
    use crate::error::LayoutError;

    fn config(resolution: usize, seed: u64) -> LayoutConfig {
        LayoutConfigBuilder::new()
            .resolution(resolution)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_failed_pass_keeps_previous_output() {
        let shared = SharedLayout::new(LayoutGenerator::new(config(15, 4)));
        let first = shared.regenerate().unwrap();

        let result = shared.reconfigure(config(1, 4));
        assert!(matches!(result, Err(LayoutError::TriangulationFailed(_))));

        let still = shared.current().unwrap();
        assert!(Arc::ptr_eq(&first, &still));
        assert_eq!(shared.published_count(), 1);
        assert_eq!(shared.config().resolution, 1);
    }

    #[test]
    fn test_reconfigure_replaces_output() {
        let shared = SharedLayout::new(LayoutGenerator::new(config(15, 4)));
        shared.regenerate().unwrap();
        shared.reconfigure(config(25, 4)).unwrap();

        assert_eq!(shared.current().unwrap().points().len(), 25);
        assert_eq!(shared.published_count(), 2);
    }

    #[test]
    fn test_concurrent_readers_see_whole_passes() {
        let shared = SharedLayout::new(LayoutGenerator::new(config(20, 1)));
        shared.regenerate().unwrap();

        std::thread::scope(|scope| {
            for seed in 0..4u64 {
                let shared = &shared;
                scope.spawn(move || {
                    let resolution = 10 + seed as usize * 5;
                    shared.reconfigure(config(resolution, seed)).unwrap();
                });
            }
            for _ in 0..4 {
                let shared = &shared;
                scope.spawn(move || {
                    for _ in 0..20 {
                        let pass = shared.current().unwrap();
                        assert_eq!(pass.points().len(), pass.config().resolution);
                        assert_eq!(pass.regions().len(), pass.points().len());
                        assert_eq!(pass.tree_edges().len() + 1, pass.mst().reached);
                    }
                });
            }
        });

        assert_eq!(shared.published_count(), 5);
    }
}
