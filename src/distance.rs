//! Pairwise pseudo-Euclidean distance matrix.
//!
//! TSPLIB's `ATT` instances use a rounded Euclidean distance scaled down by
//! `sqrt(10)`:
//!
//! ```text
//! r = sqrt((dx² + dy²) / 10)
//! d = trunc(r)      if trunc(r) == r
//!     trunc(r) + 1  otherwise
//! ```
//!
//! The matrix is built once and is read-only for the rest of the run.

use crate::error::{TspError, TspResult};
use crate::instance::City;

/// Symmetric N×N table of integer distances with a zero diagonal.
///
/// Stored row-major in a single `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<u64>,
}

/// Pseudo-Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use u_tspga::distance::pseudo_euclidean;
///
/// // sqrt((30² + 10²) / 10) = 10 exactly
/// assert_eq!(pseudo_euclidean((0, 0), (30, 10)), 10);
/// // sqrt(100 / 10) = 3.16.. rounds up
/// assert_eq!(pseudo_euclidean((0, 0), (0, 10)), 4);
/// ```
pub fn pseudo_euclidean(a: (i64, i64), b: (i64, i64)) -> u64 {
    let dx = a.0 as f64 - b.0 as f64;
    let dy = a.1 as f64 - b.1 as f64;
    let r = ((dx * dx + dy * dy) / 10.0).sqrt();
    let t = r as u64;
    if t as f64 == r {
        t
    } else {
        t.saturating_add(1)
    }
}

impl DistanceMatrix {
    /// Builds the matrix from coordinates given in city-index order.
    pub fn from_coordinates(coords: &[(i64, i64)]) -> Self {
        let n = coords.len();
        let mut data = vec![0u64; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = pseudo_euclidean(coords[i], coords[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Builds the matrix from cities.
    ///
    /// Cities must carry the 0-based indices `0..n`, each exactly once, in
    /// any order.
    ///
    /// # Errors
    /// [`TspError::MalformedInput`] if the set is empty, an index is out of
    /// range, or an index repeats.
    pub fn from_cities(cities: &[City]) -> TspResult<Self> {
        let n = cities.len();
        if n == 0 {
            return Err(TspError::malformed(0, "instance contains no cities"));
        }
        let mut coords: Vec<Option<(i64, i64)>> = vec![None; n];
        for city in cities {
            let slot = coords.get_mut(city.index).ok_or_else(|| {
                TspError::malformed(
                    0,
                    format!("city index {} out of range [1..{n}]", city.index + 1),
                )
            })?;
            if slot.is_some() {
                return Err(TspError::malformed(
                    0,
                    format!("duplicate city index {}", city.index + 1),
                ));
            }
            *slot = Some((city.x, city.y));
        }
        // n slots, n distinct in-range indices: every slot is filled.
        let coords: Vec<(i64, i64)> = coords.into_iter().flatten().collect();
        Ok(Self::from_coordinates(&coords))
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` for a matrix over zero cities.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between cities `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is `>= len()`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u64 {
        assert!(i < self.n && j < self.n, "city index out of range");
        self.data[i * self.n + j]
    }

    /// Row of distances from city `i`.
    pub fn row(&self, i: usize) -> &[u64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Closed-tour length: consecutive edges plus the edge from the last
    /// city back to the first. Saturates at `u64::MAX`.
    pub fn tour_length(&self, tour: &[usize]) -> u64 {
        match tour {
            [] | [_] => 0,
            [first, .., last] => tour
                .windows(2)
                .map(|w| self.get(w[0], w[1]))
                .fold(self.get(*last, *first), u64::saturating_add),
        }
    }
}
