//! Fitness-proportional (roulette wheel) selection with an elitist slot.
//!
//! Fitness is `K / length`, so shorter tours get proportionally larger
//! slices of the wheel.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use super::types::Tour;
use rand::Rng;

/// Parents drawn for one generation's crossover step.
///
/// Same size as the population; slot 0 is always the current best tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatingPool {
    parents: Vec<Tour>,
}

impl MatingPool {
    /// The selected tours.
    pub fn parents(&self) -> &[Tour] {
        &self.parents
    }

    /// Number of selected tours.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns `true` if nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Selection probability of each individual: `(K / len_i) / Σ (K / len_j)`.
///
/// Falls back to uniform probabilities when the fitness sum is not finite
/// and positive (e.g. tours of zero length).
pub fn selection_probabilities(lengths: &[u64], fitness_constant: f64) -> Vec<f64> {
    let n = lengths.len();
    if n == 0 {
        return Vec::new();
    }
    let fitness: Vec<f64> = lengths
        .iter()
        .map(|&len| fitness_constant / len as f64)
        .collect();
    let total: f64 = fitness.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return vec![1.0 / n as f64; n];
    }
    fitness.into_iter().map(|f| f / total).collect()
}

/// Spins the wheel once: subtracts probabilities from `r` in order and
/// returns the first index that brings it to zero or below.
///
/// Rounding can leave `r` slightly positive after the last individual; the
/// last index is returned then.
pub fn spin(probabilities: &[f64], mut r: f64) -> usize {
    for (i, &p) in probabilities.iter().enumerate() {
        r -= p;
        if r <= 0.0 {
            return i;
        }
    }
    probabilities.len().saturating_sub(1) // floating-point fallback
}

/// Builds the mating pool.
///
/// Slot 0 is a copy of `population[best_index]`; every other slot is a
/// roulette draw with `r` uniform in `[0, 1)`.
///
/// # Panics
/// Panics if `population` and `lengths` differ in size or `best_index` is
/// out of range.
pub fn build_mating_pool<R: Rng>(
    population: &[Tour],
    lengths: &[u64],
    best_index: usize,
    fitness_constant: f64,
    rng: &mut R,
) -> MatingPool {
    assert_eq!(
        population.len(),
        lengths.len(),
        "every individual needs a cached length"
    );
    let probabilities = selection_probabilities(lengths, fitness_constant);

    let mut parents = Vec::with_capacity(population.len());
    parents.push(population[best_index].clone());
    for _ in 1..population.len() {
        let r: f64 = rng.random_range(0.0..1.0);
        parents.push(population[spin(&probabilities, r)].clone());
    }
    MatingPool { parents }
}
