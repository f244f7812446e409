//! Seedable random stream shared by the whole run.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the run's random number generator from a seed.
///
/// The same seed always yields the same stream, which makes complete GA
/// runs reproducible.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
