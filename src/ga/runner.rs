//! Adaptive evolutionary loop.
//!
//! [`EvolutionController`] owns the population, the elite record, and the
//! stagnation window, and drives one generation per [`step`]:
//! selection → crossover (explore or exploit pairing) → 2-opt mutation →
//! length refresh with elitist replacement.
//!
//! [`TspGaRunner`] is the one-call entry point.
//!
//! [`step`]: EvolutionController::step

use super::config::TspGaConfig;
use super::population::{Population, RefreshStats};
use super::seed::nearest_neighbor;
use super::selection::build_mating_pool;
use super::types::{EliteRecord, Mode, Phase, StagnationWindow, Tour};
use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};
use crate::random::rng_from_option;
use rand::rngs::StdRng;

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspGaResult {
    /// The best tour found during the entire run (0-based, implicitly closed).
    pub best: Tour,

    /// Length of `best`.
    pub best_length: u64,

    /// Length of the greedy seed tour.
    pub seed_length: u64,

    /// Number of generations executed.
    pub generations: usize,

    /// Elite length after initialization and after each generation.
    pub best_history: Vec<u64>,

    /// Generations run in exploit mode.
    pub exploit_generations: usize,

    /// Two-point exchange pairs left with unmatched duplicates.
    pub unrepaired_pairs: usize,

    /// Two-point exchange pairs rolled back in strict mode.
    pub restored_pairs: usize,
}

/// Owns all mutable search state and advances it one generation at a time.
pub struct EvolutionController<'a> {
    matrix: &'a DistanceMatrix,
    config: TspGaConfig,
    rng: StdRng,
    population: Population,
    elite: EliteRecord,
    window: StagnationWindow,
    last_refresh: RefreshStats,
    phase: Phase,
    generation: usize,
    seed_length: u64,
    best_history: Vec<u64>,
    exploit_generations: usize,
    unrepaired_pairs: usize,
    restored_pairs: usize,
}

impl<'a> EvolutionController<'a> {
    /// Validates the configuration, builds the greedy seed and the initial
    /// population, and enters the evolving phase.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`] if the configuration is rejected, the
    /// matrix is empty, or its size differs from `config.city_count`.
    pub fn new(matrix: &'a DistanceMatrix, config: &TspGaConfig) -> TspResult<Self> {
        config.validate().map_err(TspError::InvalidConfig)?;
        if matrix.is_empty() {
            return Err(TspError::InvalidConfig(
                "distance matrix has no cities".into(),
            ));
        }
        if let Some(n) = config.city_count {
            if n != matrix.len() {
                return Err(TspError::InvalidConfig(format!(
                    "city_count is {n} but the instance has {} cities",
                    matrix.len()
                )));
            }
        }

        let mut rng = rng_from_option(config.seed);

        let (seed, seed_length) = nearest_neighbor(matrix);
        tracing::info!(
            cities = matrix.len(),
            population = config.population_size,
            seed_length,
            "greedy seed built"
        );

        let mut elite = EliteRecord::new(seed.clone(), seed_length);
        let mut population = Population::seeded(&seed, config.population_size, &mut rng);
        let last_refresh = population.refresh(matrix, &mut elite, config.parallel);

        let mut best_history = Vec::with_capacity(config.generations + 1);
        best_history.push(elite.length());

        Ok(Self {
            matrix,
            config: config.clone(),
            rng,
            population,
            elite,
            window: StagnationWindow::new(config.stagnation_window),
            last_refresh,
            phase: Phase::Evolving(Mode::Explore),
            generation: 0,
            seed_length,
            best_history,
            exploit_generations: 0,
            unrepaired_pairs: 0,
            restored_pairs: 0,
        })
    }

    /// Runs one generation and returns the mode it used.
    ///
    /// Returns `None` once every configured generation has run.
    pub fn step(&mut self) -> Option<Mode> {
        if self.phase == Phase::Done {
            return None;
        }

        let pool = build_mating_pool(
            self.population.tours(),
            self.population.lengths(),
            self.last_refresh.min_index,
            self.config.fitness_constant,
            &mut self.rng,
        );

        let mode = Mode::decide(
            &self.window,
            self.config.stagnation_threshold,
            self.last_refresh.min_length,
            &self.elite,
        );
        if self.phase != Phase::Evolving(mode) {
            tracing::info!(
                generation = self.generation,
                ?mode,
                best = self.elite.length(),
                "switching operator pairing"
            );
        }

        match mode {
            Mode::Explore => {
                self.population.edge_recombination(
                    &pool,
                    self.config.explore_crossover_rate,
                    self.matrix,
                    &mut self.rng,
                );
                self.population.mutate(
                    self.config.mutation_rate,
                    self.config.light_mutation_attempts,
                    self.matrix,
                    &mut self.rng,
                );
            }
            Mode::Exploit => {
                let stats = self.population.two_point_exchange(
                    self.config.exploit_crossover_rate,
                    self.config.strict_validation,
                    &mut self.rng,
                );
                self.unrepaired_pairs += stats.unrepaired;
                self.restored_pairs += stats.restored;
                self.population.mutate(
                    self.config.mutation_rate,
                    self.config.heavy_attempts_for(self.matrix.len()),
                    self.matrix,
                    &mut self.rng,
                );
                self.exploit_generations += 1;
            }
        }

        self.last_refresh =
            self.population
                .refresh(self.matrix, &mut self.elite, self.config.parallel);
        self.window.record(self.last_refresh.average_length);
        self.best_history.push(self.elite.length());
        self.generation += 1;

        if self.config.progress_interval > 0 && self.generation % self.config.progress_interval == 0 {
            tracing::debug!(
                generation = self.generation,
                current = self.last_refresh.min_length,
                average = self.last_refresh.average_length,
                best = self.elite.length(),
                "generation finished"
            );
        }

        self.phase = if self.generation >= self.config.generations {
            Phase::Done
        } else {
            Phase::Evolving(mode)
        };
        Some(mode)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generations executed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The best-ever tour.
    pub fn elite(&self) -> &EliteRecord {
        &self.elite
    }

    /// Recorded average lengths.
    pub fn window(&self) -> &StagnationWindow {
        &self.window
    }

    /// Statistics from the most recent length refresh.
    pub fn last_refresh(&self) -> &RefreshStats {
        &self.last_refresh
    }

    /// Runs the remaining generations and returns the result.
    pub fn run(mut self) -> TspGaResult {
        while self.step().is_some() {}
        self.finish()
    }

    /// Consumes the controller, reporting the state reached so far.
    pub fn finish(self) -> TspGaResult {
        tracing::info!(
            generations = self.generation,
            best_length = self.elite.length(),
            seed_length = self.seed_length,
            exploit_generations = self.exploit_generations,
            "evolution finished"
        );
        TspGaResult {
            best_length: self.elite.length(),
            best: self.elite.tour().clone(),
            seed_length: self.seed_length,
            generations: self.generation,
            best_history: self.best_history,
            exploit_generations: self.exploit_generations,
            unrepaired_pairs: self.unrepaired_pairs,
            restored_pairs: self.restored_pairs,
        }
    }
}

/// Executes the GA.
///
/// # Usage
///
/// ```ignore
/// let instance = Instance::load("att48.txt", Some(48))?;
/// let config = TspGaConfig::default().with_seed(42);
/// let result = TspGaRunner::run(instance.matrix(), &config)?;
/// println!("Best length: {}", result.best_length);
/// ```
pub struct TspGaRunner;

impl TspGaRunner {
    /// Runs every configured generation and returns the best tour.
    ///
    /// # Errors
    /// See [`EvolutionController::new`].
    #[tracing::instrument(level = "info", skip_all, fields(cities = matrix.len(), generations = config.generations))]
    pub fn run(matrix: &DistanceMatrix, config: &TspGaConfig) -> TspResult<TspGaResult> {
        Ok(EvolutionController::new(matrix, config)?.run())
    }
}

// ============================================================================
// Tests
// ============================================================================
