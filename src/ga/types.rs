//! Core value types shared by the GA components.
//!
//! [`Tour`] is the chromosome, [`EliteRecord`] the best-ever tour,
//! [`StagnationWindow`] the plateau detector, and [`Mode`] the operator
//! pairing chosen for each generation.

use crate::error::{TspError, TspResult};
use std::collections::VecDeque;
use std::ops::Deref;

/// Returns `true` if `perm` contains each of `0..perm.len()` exactly once.
pub fn is_permutation(perm: &[usize]) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &city in perm {
        match seen.get_mut(city) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    true
}

/// A closed route: a visiting order over all cities.
///
/// The edge from the last city back to the first is implicit. Tours built
/// through [`Tour::new`] are guaranteed permutations; the GA's own operators
/// preserve that property, except the two-point exchange in its documented
/// mismatch case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Creates a tour, checking the permutation property.
    ///
    /// # Errors
    /// [`TspError::InvalidTour`] if `cities` is not a permutation of
    /// `0..cities.len()`.
    pub fn new(cities: Vec<usize>) -> TspResult<Self> {
        if !is_permutation(&cities) {
            return Err(TspError::InvalidTour(format!(
                "{cities:?} is not a permutation of 0..{}",
                cities.len()
            )));
        }
        Ok(Self(cities))
    }

    /// The tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    pub(crate) fn from_vec_unchecked(cities: Vec<usize>) -> Self {
        Self(cities)
    }

    /// City indices in visiting order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.0
    }

    /// Re-checks the permutation property.
    pub fn is_permutation(&self) -> bool {
        is_permutation(&self.0)
    }

    /// Position `j` of the result holds `self[(j + offset) % n]`.
    pub fn rotated(&self, offset: usize) -> Self {
        let n = self.0.len();
        Self((0..n).map(|j| self.0[(j + offset) % n]).collect())
    }

    /// The same cities in reverse order.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// Consumes the tour, returning the index vector.
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Tour {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

/// Best tour discovered so far and its length.
///
/// Only ever replaced by a strictly shorter tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliteRecord {
    tour: Tour,
    length: u64,
}

impl EliteRecord {
    /// Creates a record from a tour and its length.
    pub fn new(tour: Tour, length: u64) -> Self {
        Self { tour, length }
    }

    /// The best tour.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Length of the best tour.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Replaces the record if `length` is strictly shorter.
    ///
    /// Returns `true` when the record changed.
    pub fn offer(&mut self, tour: &Tour, length: u64) -> bool {
        if length < self.length {
            self.tour.clone_from(tour);
            self.length = length;
            true
        } else {
            false
        }
    }
}

/// Rolling record of per-generation average population lengths.
///
/// Holds the most recent `span + 1` samples so the newest can be compared
/// with the one recorded `span` generations earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagnationWindow {
    span: usize,
    samples: VecDeque<u64>,
}

impl StagnationWindow {
    /// Creates an empty window comparing samples `span` generations apart.
    pub fn new(span: usize) -> Self {
        Self {
            span,
            samples: VecDeque::with_capacity(span + 1),
        }
    }

    /// Distance in generations between the compared samples.
    pub fn span(&self) -> usize {
        self.span
    }

    /// Appends a generation's average length, evicting the oldest sample.
    pub fn record(&mut self, average: u64) {
        self.samples.push_back(average);
        while self.samples.len() > self.span + 1 {
            self.samples.pop_front();
        }
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<u64> {
        self.samples.back().copied()
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` before anything is recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Absolute change between the newest sample and the one `span`
    /// generations before it, once that many samples exist.
    pub fn change(&self) -> Option<u64> {
        if self.samples.len() < self.span + 1 {
            return None;
        }
        let newest = *self.samples.back()?;
        let oldest = *self.samples.front()?;
        Some(newest.abs_diff(oldest))
    }

    /// `true` when the average moved by less than `threshold` over the span.
    pub fn is_plateau(&self, threshold: u64) -> bool {
        self.change().is_some_and(|c| c < threshold)
    }
}

/// Operator pairing applied in a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Edge-greedy recombination with light mutation.
    Explore,
    /// Two-point exchange with heavy mutation.
    Exploit,
}

impl Mode {
    /// Chooses the pairing for the next generation.
    ///
    /// `Exploit` requires a plateau in the window and a current best that
    /// already equals the elite length; anything else explores.
    pub fn decide(
        window: &StagnationWindow,
        threshold: u64,
        current_best: u64,
        elite: &EliteRecord,
    ) -> Mode {
        if window.is_plateau(threshold) && current_best == elite.length() {
            Mode::Exploit
        } else {
            Mode::Explore
        }
    }
}

/// Lifecycle of an [`EvolutionController`](super::EvolutionController).
///
/// Seeding and the initial population are built inside
/// [`EvolutionController::new`](super::EvolutionController::new), so a
/// controller is first observed already `Evolving(Mode::Explore)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Running generations; carries the mode of the latest generation.
    Evolving(Mode),
    /// All generations executed.
    Done,
}
