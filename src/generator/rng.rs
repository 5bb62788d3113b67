//! Seeded randomness for a single generation run.
//!
//! Wraps `ChaCha8Rng` so identical seeds yield identical layouts on every
//! platform. Each run owns one `CityRng` and lends it by `&mut` to the
//! stages that draw from it; there is no process-wide generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct CityRng(ChaCha8Rng);

impl CityRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// True with probability `p` (clamped to `[0, 1]`)
    pub fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform draw from `[low, high)`
    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..high)
    }
}
