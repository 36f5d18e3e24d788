//! Coordinate-keyed texture variant selection

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses which of `count` texture variants a tile at `(x, y)` uses.
///
/// Implementations must be pure: the same arguments always give the same
/// index, so tiles keep their look from frame to frame.
pub trait VariantPicker {
    fn pick(&self, x: usize, y: usize, count: usize) -> usize;
}

/// Seed for a tile coordinate, `(5x)² + 3y`.
///
/// Plain `x * y` would mirror the pattern along the diagonal.
pub fn variant_seed(x: usize, y: usize) -> u64 {
    let x = 5 * x as u64;
    x * x + 3 * y as u64
}

/// Picks uniformly with a generator seeded from [`variant_seed`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededPicker;

impl VariantPicker for SeededPicker {
    fn pick(&self, x: usize, y: usize, count: usize) -> usize {
        if count <= 1 {
            return 0;
        }
        StdRng::seed_from_u64(variant_seed(x, y)).gen_range(0..count)
    }
}

impl<F> VariantPicker for F
where
    F: Fn(usize, usize, usize) -> usize,
{
    fn pick(&self, x: usize, y: usize, count: usize) -> usize {
        self(x, y, count)
    }
}
