//! Adaptive genetic algorithm for the symmetric Traveling Salesman Problem.
//!
//! The optimizer seeds its population with a greedy nearest-neighbor tour,
//! then evolves it with fitness-proportional selection, elitism, and a
//! control loop that switches between two operator pairings:
//!
//! - **Explore**: edge-greedy recombination plus light 2-opt mutation.
//! - **Exploit**: two-point segment exchange with duplicate repair plus heavy
//!   2-opt mutation, chosen once the population average has plateaued and the
//!   current best matches the best-ever tour.
//!
//! Distances are TSPLIB pseudo-Euclidean (`ATT`) values.
//!
//! # Example
//!
//! ```
//! use u_tspga::distance::DistanceMatrix;
//! use u_tspga::ga::{TspGaConfig, TspGaRunner};
//!
//! let matrix = DistanceMatrix::from_coordinates(&[(0, 0), (0, 10), (10, 10), (10, 0)]);
//! let config = TspGaConfig::fast().with_generations(20).with_seed(42);
//! let result = TspGaRunner::run(&matrix, &config).unwrap();
//! assert_eq!(result.best_length, 16);
//! ```

pub mod distance;
pub mod error;
pub mod ga;
pub mod instance;
pub mod random;

pub use error::{TspError, TspResult};
