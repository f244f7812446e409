//! Coordinate source: cities and the problem instance built from them.
//!
//! The accepted text format is one city per line, `index x y`, with 1-based
//! indices in any order. Lines starting with a letter are ignored, so TSPLIB
//! `.tsp` files (`NAME: att48`, `NODE_COORD_SECTION`, `EOF`, ...) load as-is.

use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A city with a 0-based index and integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// 0-based city index.
    pub index: usize,
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
}

impl City {
    /// Creates a city.
    pub fn new(index: usize, x: i64, y: i64) -> Self {
        Self { index, x, y }
    }
}

/// Reads and validates cities from a text source.
///
/// When `expected` is `Some(n)`, exactly `n` records must be present and
/// indices must cover `1..=n`. When `None`, the record count defines `n`.
///
/// Cities are returned sorted by index.
///
/// # Errors
/// - [`TspError::MalformedInput`] for an unparsable line, wrong field count,
///   a coordinate outside the `i32` range, index out of range, duplicate
///   index, or too few/too many records.
/// - [`TspError::Read`] if the reader fails.
pub fn read_cities<R: BufRead>(reader: R, expected: Option<usize>) -> TspResult<Vec<City>> {
    let mut records: Vec<(usize, i64, i64, i64)> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let trimmed = line.trim();
        match trimmed.chars().next() {
            None => continue,
            Some(c) if c.is_alphabetic() => continue,
            Some(_) => {}
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(TspError::malformed(
                line_no,
                format!("expected `index x y`, found {} field(s)", fields.len()),
            ));
        }
        let parse = |s: &str, what: &str| {
            s.parse::<i64>()
                .map_err(|_| TspError::malformed(line_no, format!("invalid {what} `{s}`")))
        };
        let coordinate = |s: &str, what: &str| {
            let value = parse(s, what)?;
            i32::try_from(value).map(i64::from).map_err(|_| {
                TspError::malformed(
                    line_no,
                    format!("{what} {value} outside [{}, {}]", i32::MIN, i32::MAX),
                )
            })
        };
        let index = parse(fields[0], "index")?;
        let x = coordinate(fields[1], "x coordinate")?;
        let y = coordinate(fields[2], "y coordinate")?;
        records.push((line_no, index, x, y));
    }

    let n = expected.unwrap_or(records.len());
    if n == 0 {
        return Err(TspError::malformed(0, "instance contains no cities"));
    }
    if records.len() < n {
        return Err(TspError::malformed(
            0,
            format!("expected {n} cities, source ended after {}", records.len()),
        ));
    }
    if records.len() > n {
        let (line_no, ..) = records[n];
        return Err(TspError::malformed(
            line_no,
            format!("more than {n} city records"),
        ));
    }

    let mut slots: Vec<Option<City>> = vec![None; n];
    for (line_no, index, x, y) in records {
        if index < 1 || index as usize > n {
            return Err(TspError::malformed(
                line_no,
                format!("city index {index} out of range [1..{n}]"),
            ));
        }
        let slot = &mut slots[index as usize - 1];
        if slot.is_some() {
            return Err(TspError::malformed(
                line_no,
                format!("duplicate city index {index}"),
            ));
        }
        *slot = Some(City::new(index as usize - 1, x, y));
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Opens `path` and reads cities from it.
///
/// # Errors
/// [`TspError::UnavailableResource`] if the file cannot be opened, otherwise
/// as [`read_cities`].
pub fn load_cities(path: impl AsRef<Path>, expected: Option<usize>) -> TspResult<Vec<City>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TspError::UnavailableResource {
        path: path.to_path_buf(),
        source,
    })?;
    read_cities(BufReader::new(file), expected)
}

/// Cities together with their distance matrix.
#[derive(Debug, Clone)]
pub struct Instance {
    cities: Vec<City>,
    matrix: DistanceMatrix,
}

impl Instance {
    /// Builds an instance from validated cities.
    pub fn from_cities(cities: Vec<City>) -> TspResult<Self> {
        let matrix = DistanceMatrix::from_cities(&cities)?;
        Ok(Self { cities, matrix })
    }

    /// Loads an instance from a coordinate file.
    pub fn load(path: impl AsRef<Path>, expected: Option<usize>) -> TspResult<Self> {
        Self::from_cities(load_cities(path, expected)?)
    }

    /// Cities in index order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The distance matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false` for a constructed instance.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str, expected: Option<usize>) -> TspResult<Vec<City>> {
        read_cities(Cursor::new(text), expected)
    }

    #[test]
    fn test_reads_unordered_records() {
        let cities = read("3 10 10\n1 0 0\n2 0 10\n", None).expect("valid input");
        assert_eq!(
            cities,
            vec![City::new(0, 0, 0), City::new(1, 0, 10), City::new(2, 10, 10)]
        );
    }

    #[test]
    fn test_skips_tsplib_header() {
        let text = "NAME : tiny\nTYPE : TSP\nDIMENSION : 2\nEDGE_WEIGHT_TYPE : ATT\n\
                    NODE_COORD_SECTION\n1 6734 1453\n2 2233 10\nEOF\n";
        let cities = read(text, Some(2)).expect("tsplib input");
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1], City::new(1, 2233, 10));
    }

    #[test]
    fn test_short_input() {
        let err = read("1 0 0\n2 1 1\n", Some(3)).unwrap_err();
        assert!(
            matches!(err, TspError::MalformedInput { line: 0, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_overlong_input() {
        let err = read("1 0 0\n2 1 1\n3 2 2\n", Some(2)).unwrap_err();
        assert!(
            matches!(err, TspError::MalformedInput { line: 3, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_duplicate_index() {
        let err = read("1 0 0\n1 1 1\n", None).unwrap_err();
        assert!(
            matches!(err, TspError::MalformedInput { line: 2, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_index_out_of_range() {
        assert!(read("0 0 0\n2 1 1\n", None).is_err());
        assert!(read("1 0 0\n3 1 1\n", None).is_err());
    }

    #[test]
    fn test_bad_token_and_field_count() {
        assert!(read("1 0 zero\n", None).is_err());
        assert!(read("1 0\n", None).is_err());
    }

    #[test]
    fn test_rejects_coordinates_beyond_i32() {
        let err = read("1 9223372036854775807 0\n2 -9223372036854775808 0\n", Some(2)).unwrap_err();
        assert!(
            matches!(err, TspError::MalformedInput { line: 1, .. }),
            "got {err:?}"
        );
        let err = read("1 0 0\n2 0 -2147483649\n", None).unwrap_err();
        assert!(
            matches!(err, TspError::MalformedInput { line: 2, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_i32_extremes_build_an_instance() {
        let cities = read("1 2147483647 2147483647\n2 -2147483648 -2147483648\n", None)
            .expect("coordinates within i32");
        let instance = Instance::from_cities(cities).expect("instance");
        let d = instance.matrix().get(0, 1);
        assert!(d > 0);
        assert_eq!(instance.matrix().tour_length(&[0, 1]), 2 * d);
    }

    #[test]
    fn test_extreme_cities_from_memory_do_not_panic() {
        let cities = vec![City::new(0, i64::MAX, 0), City::new(1, i64::MIN, 0)];
        let instance = Instance::from_cities(cities).expect("instance");
        assert!(instance.matrix().get(0, 1) > 0);
    }

    #[test]
    fn test_empty_source() {
        assert!(read("", None).is_err());
        assert!(read("\n\nEOF\n", None).is_err());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = load_cities("definitely/not/here.txt", None).unwrap_err();
        assert!(matches!(err, TspError::UnavailableResource { .. }));
    }

    #[test]
    fn test_instance_from_cities() {
        let cities = read("1 0 0\n2 0 10\n3 10 10\n4 10 0\n", Some(4)).expect("valid");
        let instance = Instance::from_cities(cities).expect("instance");
        assert_eq!(instance.len(), 4);
        assert_eq!(instance.matrix().tour_length(&[0, 1, 2, 3]), 16);
    }
}
