//! Greedy nearest-neighbor construction of the seed tour.

use super::types::Tour;
use crate::distance::DistanceMatrix;

/// Builds a nearest-neighbor tour anchored at city 0.
///
/// At each step the closest unvisited city is appended; ties go to the
/// lowest index. Returns the tour and its closed length.
///
/// # Complexity
/// O(n²)
///
/// # Panics
/// Panics if the matrix is empty.
pub fn nearest_neighbor(matrix: &DistanceMatrix) -> (Tour, u64) {
    let n = matrix.len();
    assert!(n > 0, "cannot seed a tour over zero cities");

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = 0;
    let mut length: u64 = 0;
    visited[0] = true;
    tour.push(0);

    for _ in 1..n {
        let (next, d) = matrix
            .row(current)
            .iter()
            .enumerate()
            .filter(|&(city, _)| !visited[city])
            .fold(None, |best: Option<(usize, u64)>, (city, &d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((city, d)),
            })
            .expect("an unvisited city remains while the tour is incomplete");
        visited[next] = true;
        tour.push(next);
        length = length.saturating_add(d);
        current = next;
    }
    length = length.saturating_add(matrix.get(current, 0));

    (Tour::from_vec_unchecked(tour), length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_loop() {
        let m = DistanceMatrix::from_coordinates(&[(0, 0), (0, 10), (10, 10), (10, 0)]);
        let (tour, length) = nearest_neighbor(&m);
        // 1 and 3 tie from the anchor; the lower index wins.
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(length, 16);
    }

    #[test]
    fn test_line_visits_in_order() {
        let m = DistanceMatrix::from_coordinates(&[(0, 0), (40, 0), (10, 0), (20, 0)]);
        let (tour, length) = nearest_neighbor(&m);
        assert_eq!(tour.as_slice(), &[0, 2, 3, 1]);
        assert_eq!(length, m.tour_length(&tour));
        assert!(tour.is_permutation());
    }

    #[test]
    fn test_single_city() {
        let m = DistanceMatrix::from_coordinates(&[(3, 4)]);
        let (tour, length) = nearest_neighbor(&m);
        assert_eq!(tour.as_slice(), &[0]);
        assert_eq!(length, 0);
    }

    #[test]
    fn test_length_matches_matrix() {
        let coords = [
            (6734, 1453),
            (2233, 10),
            (5530, 1424),
            (401, 841),
            (3082, 1644),
            (7608, 4458),
            (7573, 3716),
        ];
        let m = DistanceMatrix::from_coordinates(&coords);
        let (tour, length) = nearest_neighbor(&m);
        assert!(tour.is_permutation());
        assert_eq!(tour[0], 0);
        assert_eq!(length, m.tour_length(&tour));
    }
}
