//! Permutation operators for TSP tours.
//!
//! These operate on `&[usize]` index vectors so they can be tested in
//! isolation from the population.
//!
//! # Crossover Operators
//!
//! - [`edge_recombination`]: builds a child by following whichever parent
//!   offers the shorter unvisited successor edge
//! - [`two_point_exchange`]: swaps a segment between two tours in place,
//!   then repairs the duplicates it created
//!
//! # Mutation Operators
//!
//! - [`two_opt_mutation`]: repeated cost-aware segment reversals that are
//!   kept only when they do not lengthen the tour
//!
//! # References
//!
//! - Whitley, Starkweather & Fuquay (1989), "Scheduling Problems and
//!   Traveling Salesmen: The Genetic Edge Recombination Operator"
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"

use crate::distance::DistanceMatrix;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Per-city bookkeeping for edge recombination.
#[derive(Debug, Clone, Copy)]
struct CityState {
    visited: bool,
    pos_in_a: usize,
    pos_in_b: usize,
}

/// Edge-greedy recombination from a random start city.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn edge_recombination<R: Rng>(
    parent_a: &[usize],
    parent_b: &[usize],
    matrix: &DistanceMatrix,
    rng: &mut R,
) -> Vec<usize> {
    if parent_a.is_empty() {
        return Vec::new();
    }
    let start = rng.random_range(0..parent_a.len());
    edge_recombination_from(parent_a, parent_b, matrix, start)
}

/// Edge-greedy recombination from a given start city.
///
/// From the current city, each parent proposes the city following it in
/// that parent (wrapping at the end):
///
/// 1. both proposals unvisited: take the shorter edge, `parent_a` on ties
/// 2. one proposal unvisited: take it
/// 3. both visited: step both parents one position further and ask again
///
/// If the parents are not permutations the scan can run out of proposals;
/// the lowest unvisited city is taken then.
///
/// # Complexity
/// O(n²) worst case, O(n) typical
///
/// # Panics
/// Panics if parents have different lengths or `start` is out of range.
pub fn edge_recombination_from(
    parent_a: &[usize],
    parent_b: &[usize],
    matrix: &DistanceMatrix,
    start: usize,
) -> Vec<usize> {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have equal length");
    assert!(start < n, "start city out of range");

    let mut cities = vec![
        CityState {
            visited: false,
            pos_in_a: 0,
            pos_in_b: 0,
        };
        n
    ];
    for (pos, &city) in parent_a.iter().enumerate().rev() {
        cities[city].pos_in_a = pos;
    }
    for (pos, &city) in parent_b.iter().enumerate().rev() {
        cities[city].pos_in_b = pos;
    }

    let mut child = Vec::with_capacity(n);
    child.push(start);
    cities[start].visited = true;
    let mut current = start;

    while child.len() < n {
        let mut pa = cities[current].pos_in_a;
        let mut pb = cities[current].pos_in_b;
        let mut chosen = None;

        for _ in 0..n {
            let ca = parent_a[(pa + 1) % n];
            let cb = parent_b[(pb + 1) % n];
            match (cities[ca].visited, cities[cb].visited) {
                (false, false) => {
                    chosen = Some(if matrix.get(current, ca) <= matrix.get(current, cb) {
                        ca
                    } else {
                        cb
                    });
                }
                (false, true) => chosen = Some(ca),
                (true, false) => chosen = Some(cb),
                (true, true) => {
                    pa = (pa + 1) % n;
                    pb = (pb + 1) % n;
                    continue;
                }
            }
            break;
        }

        let next = match chosen {
            Some(city) => city,
            None => match cities.iter().position(|c| !c.visited) {
                Some(city) => city,
                None => break,
            },
        };
        cities[next].visited = true;
        child.push(next);
        current = next;
    }

    child
}

/// Result of a two-point exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The swapped segments held the same cities; nothing to repair.
    NoDuplicates,
    /// This many duplicate positions were exchanged between the offspring.
    Repaired(usize),
    /// Duplicate counts differed, so no repair was applied.
    Unrepaired {
        /// Duplicate positions found in the first offspring.
        left: usize,
        /// Duplicate positions found in the second offspring.
        right: usize,
    },
}

/// Two-point segment exchange with duplicate repair at random cut points.
///
/// # Panics
/// Panics if the tours have different lengths or are empty.
pub fn two_point_exchange<R: Rng>(a: &mut [usize], b: &mut [usize], rng: &mut R) -> ExchangeOutcome {
    assert!(!a.is_empty(), "tours must not be empty");
    let (lo, hi) = random_segment(a.len(), rng);
    two_point_exchange_at(a, b, lo, hi)
}

/// Two-point segment exchange over the inclusive range `[lo, hi]`.
///
/// After the swap each offspring may hold some cities twice. Positions
/// outside the segment whose city also occurs inside it are collected per
/// offspring in scan order; when both lists have the same length the i-th
/// positions are exchanged across the offspring, which restores both
/// permutations when the inputs were permutations.
///
/// # Panics
/// Panics if the tours have different lengths or `lo > hi` or `hi` is out of
/// range.
pub fn two_point_exchange_at(
    a: &mut [usize],
    b: &mut [usize],
    lo: usize,
    hi: usize,
) -> ExchangeOutcome {
    assert_eq!(a.len(), b.len(), "tours must have equal length");
    assert!(lo <= hi && hi < a.len(), "invalid segment [{lo}, {hi}]");

    a[lo..=hi].swap_with_slice(&mut b[lo..=hi]);

    let dup_a = outside_duplicates(a, lo, hi);
    let dup_b = outside_duplicates(b, lo, hi);

    if dup_a.len() != dup_b.len() {
        return ExchangeOutcome::Unrepaired {
            left: dup_a.len(),
            right: dup_b.len(),
        };
    }
    if dup_a.is_empty() {
        return ExchangeOutcome::NoDuplicates;
    }
    for (&i, &j) in dup_a.iter().zip(&dup_b) {
        std::mem::swap(&mut a[i], &mut b[j]);
    }
    ExchangeOutcome::Repaired(dup_a.len())
}

/// Positions outside `[lo, hi]` holding a city that also occurs inside it.
fn outside_duplicates(tour: &[usize], lo: usize, hi: usize) -> Vec<usize> {
    let segment = &tour[lo..=hi];
    (0..lo)
        .chain(hi + 1..tour.len())
        .filter(|&i| segment.contains(&tour[i]))
        .collect()
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Reverses the inclusive range `[first, last]` in place.
pub fn reverse_segment(tour: &mut [usize], first: usize, last: usize) {
    tour[first..=last].reverse();
}

/// Tries one 2-opt move over `[first, last]`.
///
/// Compares the two edges at the segment boundary (neighbors wrap around)
/// before and after reversal and reverses when the new pair costs no more.
/// Returns `true` if the segment was reversed.
///
/// # Panics
/// Panics if `first > last` or `last` is out of range.
pub fn two_opt_move(tour: &mut [usize], matrix: &DistanceMatrix, first: usize, last: usize) -> bool {
    let n = tour.len();
    assert!(first <= last && last < n, "invalid segment [{first}, {last}]");
    if first == last {
        return false;
    }

    let prev = tour[(first + n - 1) % n];
    let next = tour[(last + 1) % n];
    let head = tour[first];
    let tail = tour[last];

    let before = matrix.get(prev, head).saturating_add(matrix.get(tail, next));
    let after = matrix.get(prev, tail).saturating_add(matrix.get(head, next));
    if after <= before {
        reverse_segment(tour, first, last);
        true
    } else {
        false
    }
}

/// Cost-aware 2-opt mutation: `attempts` random [`two_opt_move`]s.
///
/// Never increases the tour length. Returns the number of reversals applied.
pub fn two_opt_mutation<R: Rng>(
    tour: &mut [usize],
    matrix: &DistanceMatrix,
    attempts: usize,
    rng: &mut R,
) -> usize {
    let n = tour.len();
    if n < 2 {
        return 0;
    }
    let mut applied = 0;
    for _ in 0..attempts {
        let (first, last) = random_segment(n, rng);
        if two_opt_move(tour, matrix, first, last) {
            applied += 1;
        }
    }
    applied
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
pub(crate) fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
