//! Procedural starfield: deterministic star placement inside a cube around
//! the origin.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates a deterministic cloud of star positions from a seed.
#[derive(Debug, Clone, Copy)]
pub struct StarfieldGenerator {
    seed: u64,
    count: u32,
    range: f32,
}

impl StarfieldGenerator {
    /// Stars are placed uniformly in `[-range, range]` on each axis.
    #[must_use]
    pub fn new(seed: u64, count: u32, range: f32) -> Self {
        Self { seed, count, range }
    }

    /// Generate the star positions. Deterministic for a given seed.
    #[must_use]
    pub fn generate(&self) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut axis = || (rng.random::<f32>() * 2.0 - 1.0) * self.range;
        (0..self.count)
            .map(|_| {
                let x = axis();
                let y = axis();
                let z = axis();
                Vec3::new(x, y, z)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stars() {
        let a = StarfieldGenerator::new(7, 64, 24.0).generate();
        let b = StarfieldGenerator::new(7, 64, 24.0).generate();
        assert_eq!(a, b);
        let c = StarfieldGenerator::new(8, 64, 24.0).generate();
        assert_ne!(a, c);
    }

    #[test]
    fn stars_stay_in_range() {
        let stars = StarfieldGenerator::new(1, 512, 24.0).generate();
        assert_eq!(stars.len(), 512);
        assert!(stars.iter().all(|s| s.abs().max_element() <= 24.0));
    }

    #[test]
    fn empty_field() {
        assert!(StarfieldGenerator::new(1, 0, 24.0).generate().is_empty());
    }
}
