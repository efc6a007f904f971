//! Random point sampling inside a rectangle
//!
//! Every point is drawn independently and uniformly. There is no
//! minimum-distance rule, so duplicates and near-duplicates can occur and
//! later stages must tolerate them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sample `resolution` points uniformly in `min..=max`, then shift them by `origin`
///
/// `min` and `max` are in the sampler's local frame. The random source is
/// supplied by the caller; identical RNG state yields identical points.
///
/// # Example
///
/// ```rust
/// use voronoi_layout::generation::sample_points;
/// use glam::Vec2;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let points = sample_points(&mut rng, 10, Vec2::new(100.0, 0.0), Vec2::ZERO, Vec2::ONE);
/// assert_eq!(points.len(), 10);
/// assert!(points.iter().all(|p| p.x >= 100.0 && p.x <= 101.0));
/// ```
pub fn sample_points<R: Rng + ?Sized>(
    rng: &mut R,
    resolution: usize,
    origin: Vec2,
    min: Vec2,
    max: Vec2,
) -> Vec<Vec2> {
    (0..resolution)
        .map(|i| {
            let x = rng.gen_range(min.x..=max.x);
            let y = rng.gen_range(min.y..=max.y);
            let point = Vec2::new(x, y) + origin;
            log::debug!("Added point {} at position {}; {}", i, point.x, point.y);
            point
        })
        .collect()
}

/// Sample points with a deterministic ChaCha8 stream when `seed` is set,
/// or the thread RNG otherwise
pub fn sample_points_seeded(
    seed: Option<u64>,
    resolution: usize,
    origin: Vec2,
    min: Vec2,
    max: Vec2,
) -> Vec<Vec2> {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            sample_points(&mut rng, resolution, origin, min, max)
        }
        None => sample_points(&mut rand::thread_rng(), resolution, origin, min, max),
    }
}
