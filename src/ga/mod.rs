//! Adaptive genetic algorithm for the TSP.
//!
//! The search state lives in an [`EvolutionController`]; every component
//! below is a function (or method) over state passed in by the controller.
//!
//! # Pipeline
//!
//! 1. [`seed::nearest_neighbor`] builds the greedy seed tour
//! 2. [`Population::seeded`] fills the population with perturbed rotations
//! 3. Each generation:
//!    - [`selection::build_mating_pool`]: roulette wheel plus one elitist slot
//!    - [`Mode::decide`]: explore, or exploit once the average has plateaued
//!    - crossover: [`operators::edge_recombination`] (explore) or
//!      [`operators::two_point_exchange`] (exploit)
//!    - [`operators::two_opt_mutation`]: 2 attempts (explore) or N (exploit)
//!    - [`Population::refresh`]: lengths, elite update, worst replaced by elite
//!
//! # Key Types
//!
//! - [`TspGaConfig`]: Algorithm parameters
//! - [`TspGaRunner`]: One-call entry point
//! - [`TspGaResult`]: Best tour and run statistics

mod config;
pub mod operators;
pub mod population;
mod runner;
pub mod seed;
pub mod selection;
mod types;

pub use config::TspGaConfig;
pub use population::{ExchangeStats, Population, RefreshStats};
pub use runner::{EvolutionController, TspGaResult, TspGaRunner};
pub use selection::MatingPool;
pub use types::{is_permutation, EliteRecord, Mode, Phase, StagnationWindow, Tour};
