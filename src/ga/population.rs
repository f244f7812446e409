//! Population storage and the population-wide steps of a generation.
//!
//! [`Population`] owns the tours and their cached lengths. Crossover is
//! applied to consecutive pairs `(0, 1), (2, 3), ...`, each pair with its own
//! coin flip; mutation flips one coin per individual.

use super::operators::{self, random_segment, ExchangeOutcome};
use super::selection::MatingPool;
use super::types::{EliteRecord, Tour};
use crate::distance::DistanceMatrix;
use rand::Rng;

/// Summary of one length refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    /// Sum of all lengths, measured before the worst tour was replaced.
    pub total_length: u64,
    /// `total_length / population size`.
    pub average_length: u64,
    /// Index of the shortest tour (first seen on ties).
    pub min_index: usize,
    /// Length of the shortest tour.
    pub min_length: u64,
    /// Index of the longest tour (first seen on ties); now holds the elite.
    pub max_index: usize,
    /// Length the longest tour had before it was replaced.
    pub max_length: u64,
    /// Whether the elite record improved.
    pub elite_improved: bool,
}

/// Counters from one two-point exchange pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExchangeStats {
    /// Pairs that passed the crossover coin flip.
    pub pairs: usize,
    /// Pairs whose duplicates were repaired.
    pub repaired: usize,
    /// Pairs left with mismatched duplicates.
    pub unrepaired: usize,
    /// Pairs rolled back in strict mode.
    pub restored: usize,
}

/// Fixed-size collection of tours with cached lengths.
#[derive(Debug, Clone)]
pub struct Population {
    tours: Vec<Tour>,
    lengths: Vec<u64>,
}

impl Population {
    /// Wraps existing tours. Lengths read as zero until [`refresh`](Self::refresh).
    pub fn from_tours(tours: Vec<Tour>) -> Self {
        let lengths = vec![0; tours.len()];
        Self { tours, lengths }
    }

    /// Builds `size` tours from the greedy seed.
    ///
    /// Tour 0 is the seed itself. Tour `i` is the seed rotated by `i` with
    /// two positions (drawn with replacement) swapped.
    pub fn seeded<R: Rng>(seed: &Tour, size: usize, rng: &mut R) -> Self {
        let n = seed.len();
        let mut tours = Vec::with_capacity(size);
        if size > 0 {
            tours.push(seed.clone());
        }
        for i in 1..size {
            let mut tour = seed.rotated(i);
            if n > 0 {
                let a = rng.random_range(0..n);
                let b = rng.random_range(0..n);
                tour.as_mut_slice().swap(a, b);
            }
            tours.push(tour);
        }
        Self::from_tours(tours)
    }

    /// The tours.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Cached lengths, parallel to [`tours`](Self::tours).
    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    /// Number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Returns `true` for an empty population.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Whether every tour is currently a permutation.
    pub fn all_permutations(&self) -> bool {
        self.tours.iter().all(Tour::is_permutation)
    }

    /// Recomputes every length, updates the elite, and overwrites the
    /// longest tour with the elite.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn refresh(
        &mut self,
        matrix: &DistanceMatrix,
        elite: &mut EliteRecord,
        parallel: bool,
    ) -> RefreshStats {
        assert!(!self.tours.is_empty(), "population must not be empty");
        self.lengths = compute_lengths(&self.tours, matrix, parallel);

        let mut min_index = 0;
        let mut max_index = 0;
        for (i, &len) in self.lengths.iter().enumerate().skip(1) {
            if len < self.lengths[min_index] {
                min_index = i;
            }
            if len > self.lengths[max_index] {
                max_index = i;
            }
        }
        let total_length = self.lengths.iter().fold(0, |acc: u64, &len| acc.saturating_add(len));
        let min_length = self.lengths[min_index];
        let max_length = self.lengths[max_index];

        let elite_improved = elite.offer(&self.tours[min_index], min_length);
        self.tours[max_index].clone_from(elite.tour());
        self.lengths[max_index] = elite.length();

        RefreshStats {
            total_length,
            average_length: total_length / self.tours.len() as u64,
            min_index,
            min_length,
            max_index,
            max_length,
            elite_improved,
        }
    }

    /// Edge-greedy recombination over consecutive pairs.
    ///
    /// For a pair `(k, k+1)` that passes the coin flip, slot `k` receives the
    /// child of `pool[k]` and `pool[k+1]` and slot `k+1` its reverse. Other
    /// slots keep their current tours. Returns the number of pairs crossed.
    ///
    /// # Panics
    /// Panics if the pool and the population differ in size.
    pub fn edge_recombination<R: Rng>(
        &mut self,
        pool: &MatingPool,
        rate: f64,
        matrix: &DistanceMatrix,
        rng: &mut R,
    ) -> usize {
        assert_eq!(pool.len(), self.tours.len(), "pool must match population");
        let parents = pool.parents();
        let mut crossed = 0;
        for k in (0..self.tours.len().saturating_sub(1)).step_by(2) {
            if rng.random_range(0.0..1.0) < rate {
                let child = Tour::from_vec_unchecked(operators::edge_recombination(
                    &parents[k],
                    &parents[k + 1],
                    matrix,
                    rng,
                ));
                self.tours[k + 1] = child.reversed();
                self.tours[k] = child;
                crossed += 1;
            }
        }
        crossed
    }

    /// Two-point exchange over consecutive pairs, in place.
    ///
    /// With `strict`, a pair whose duplicates could not be repaired is rolled
    /// back to its state before the exchange.
    pub fn two_point_exchange<R: Rng>(&mut self, rate: f64, strict: bool, rng: &mut R) -> ExchangeStats {
        let mut stats = ExchangeStats::default();
        let n = self.tours.first().map_or(0, |t| t.len());
        if n == 0 {
            return stats;
        }
        for k in (0..self.tours.len().saturating_sub(1)).step_by(2) {
            let (lo, hi) = random_segment(n, rng);
            if rng.random_range(0.0..1.0) >= rate {
                continue;
            }
            stats.pairs += 1;
            let (head, tail) = self.tours.split_at_mut(k + 1);
            let (outcome, restored) = exchange_pair(
                head[k].as_mut_slice(),
                tail[0].as_mut_slice(),
                lo,
                hi,
                strict,
            );
            match outcome {
                ExchangeOutcome::Repaired(_) => stats.repaired += 1,
                ExchangeOutcome::NoDuplicates => {}
                ExchangeOutcome::Unrepaired { left, right } if restored => {
                    tracing::warn!(pair = k, left, right, "restored pair with unmatched duplicates");
                    stats.restored += 1;
                }
                ExchangeOutcome::Unrepaired { left, right } => {
                    tracing::debug!(pair = k, left, right, "pair left with unmatched duplicates");
                    stats.unrepaired += 1;
                }
            }
        }
        stats
    }

    /// Cost-aware 2-opt mutation, one coin flip per tour.
    ///
    /// Returns the number of tours mutated.
    pub fn mutate<R: Rng>(
        &mut self,
        rate: f64,
        attempts: usize,
        matrix: &DistanceMatrix,
        rng: &mut R,
    ) -> usize {
        let mut mutated = 0;
        for tour in &mut self.tours {
            if rng.random_range(0.0..1.0) < rate {
                operators::two_opt_mutation(tour.as_mut_slice(), matrix, attempts, rng);
                mutated += 1;
            }
        }
        mutated
    }
}

/// Runs one exchange; in strict mode rolls back an unrepaired pair.
///
/// Returns the outcome and whether the pair was rolled back.
pub(crate) fn exchange_pair(
    a: &mut [usize],
    b: &mut [usize],
    lo: usize,
    hi: usize,
    strict: bool,
) -> (ExchangeOutcome, bool) {
    let backup = strict.then(|| (a.to_vec(), b.to_vec()));
    let outcome = operators::two_point_exchange_at(a, b, lo, hi);
    match (outcome, backup) {
        (ExchangeOutcome::Unrepaired { .. }, Some((old_a, old_b))) => {
            a.copy_from_slice(&old_a);
            b.copy_from_slice(&old_b);
            (outcome, true)
        }
        _ => (outcome, false),
    }
}

#[cfg(feature = "parallel")]
fn compute_lengths(tours: &[Tour], matrix: &DistanceMatrix, parallel: bool) -> Vec<u64> {
    use rayon::prelude::*;
    if parallel {
        tours.par_iter().map(|t| matrix.tour_length(t)).collect()
    } else {
        tours.iter().map(|t| matrix.tour_length(t)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn compute_lengths(tours: &[Tour], matrix: &DistanceMatrix, _parallel: bool) -> Vec<u64> {
    tours.iter().map(|t| matrix.tour_length(t)).collect()
}
