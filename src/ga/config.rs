//! GA configuration.
//!
//! [`TspGaConfig`] holds every parameter of the adaptive evolutionary loop.
//! The defaults are the reference settings tuned on TSPLIB `att48`.

/// Configuration for the adaptive TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_tspga::ga::TspGaConfig;
///
/// let config = TspGaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 5000);
/// assert_eq!(config.stagnation_window, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tspga::ga::TspGaConfig;
///
/// let config = TspGaConfig::default()
///     .with_population_size(60)
///     .with_generations(1000)
///     .with_mutation_rate(0.3)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspGaConfig {
    /// Expected number of cities.
    ///
    /// `None` accepts whatever the instance provides; `Some(n)` makes a
    /// mismatch a configuration error.
    pub city_count: Option<usize>,

    /// Number of tours in the population.
    pub population_size: usize,

    /// Number of generations to run. There is no early exit.
    pub generations: usize,

    /// Generations between the two averages compared for stagnation (G).
    pub stagnation_window: usize,

    /// Average-length change below which the population counts as stagnant.
    pub stagnation_threshold: u64,

    /// Per-pair probability of edge-greedy recombination (explore mode).
    pub explore_crossover_rate: f64,

    /// Per-pair probability of two-point exchange (exploit mode).
    pub exploit_crossover_rate: f64,

    /// Per-individual probability of 2-opt mutation.
    pub mutation_rate: f64,

    /// Numerator `K` of the fitness `K / length`.
    pub fitness_constant: f64,

    /// 2-opt attempts per mutated individual in explore mode.
    pub light_mutation_attempts: usize,

    /// 2-opt attempts per mutated individual in exploit mode.
    ///
    /// `None` uses the number of cities.
    pub heavy_mutation_attempts: Option<usize>,

    /// Restore crossover pairs whose duplicate repair could not be applied.
    ///
    /// Off by default: such pairs are left as produced, which can leave a
    /// non-permutation in the population for a generation.
    pub strict_validation: bool,

    /// Log progress every this many generations (0 disables).
    pub progress_interval: usize,

    /// Compute tour lengths in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature; results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for TspGaConfig {
    fn default() -> Self {
        Self {
            city_count: None,
            population_size: 100,
            generations: 5000,
            stagnation_window: 10,
            stagnation_threshold: 10,
            explore_crossover_rate: 0.6,
            exploit_crossover_rate: 0.8,
            mutation_rate: 0.2,
            fitness_constant: 10_000.0,
            light_mutation_attempts: 2,
            heavy_mutation_attempts: None,
            strict_validation: false,
            progress_interval: 0,
            parallel: false,
            seed: None,
        }
    }
}

impl TspGaConfig {
    /// Sets the expected city count.
    pub fn with_city_count(mut self, n: usize) -> Self {
        self.city_count = Some(n);
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the stagnation window size.
    pub fn with_stagnation_window(mut self, generations: usize) -> Self {
        self.stagnation_window = generations;
        self
    }

    /// Sets the stagnation threshold.
    pub fn with_stagnation_threshold(mut self, threshold: u64) -> Self {
        self.stagnation_threshold = threshold;
        self
    }

    /// Sets the explore-mode crossover rate.
    pub fn with_explore_crossover_rate(mut self, rate: f64) -> Self {
        self.explore_crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the exploit-mode crossover rate.
    pub fn with_exploit_crossover_rate(mut self, rate: f64) -> Self {
        self.exploit_crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the fitness constant `K`.
    pub fn with_fitness_constant(mut self, k: f64) -> Self {
        self.fitness_constant = k;
        self
    }

    /// Sets the explore-mode 2-opt attempt count.
    pub fn with_light_mutation_attempts(mut self, attempts: usize) -> Self {
        self.light_mutation_attempts = attempts;
        self
    }

    /// Sets the exploit-mode 2-opt attempt count.
    pub fn with_heavy_mutation_attempts(mut self, attempts: usize) -> Self {
        self.heavy_mutation_attempts = Some(attempts);
        self
    }

    /// Enables or disables strict validation of two-point exchange pairs.
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    /// Sets the progress logging interval (0 to disable).
    pub fn with_progress_interval(mut self, generations: usize) -> Self {
        self.progress_interval = generations;
        self
    }

    /// Enables or disables parallel length evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The reference settings (same as [`Default`]).
    pub fn reference() -> Self {
        Self::default()
    }

    /// Preset for quick runs: small population, few generations.
    ///
    /// - Population: 40, Generations: 500
    pub fn fast() -> Self {
        Self {
            population_size: 40,
            generations: 500,
            ..Self::default()
        }
    }

    /// Heavy-mutation attempt count for an instance of `n` cities.
    pub fn heavy_attempts_for(&self, n: usize) -> usize {
        self.heavy_mutation_attempts.unwrap_or(n)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.generations == 0 {
            return Err("generations must be at least 1".into());
        }
        if self.stagnation_window == 0 {
            return Err("stagnation_window must be at least 1".into());
        }
        if self.city_count == Some(0) {
            return Err("city_count must be positive or None".into());
        }
        if !(self.fitness_constant.is_finite() && self.fitness_constant > 0.0) {
            return Err("fitness_constant must be finite and positive".into());
        }
        for (name, rate) in [
            ("explore_crossover_rate", self.explore_crossover_rate),
            ("exploit_crossover_rate", self.exploit_crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be within [0, 1]"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TspGaConfig::default();
        assert_eq!(config.city_count, None);
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 5000);
        assert_eq!(config.stagnation_window, 10);
        assert_eq!(config.stagnation_threshold, 10);
        assert!((config.explore_crossover_rate - 0.6).abs() < 1e-10);
        assert!((config.exploit_crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert!((config.fitness_constant - 10_000.0).abs() < 1e-10);
        assert_eq!(config.light_mutation_attempts, 2);
        assert_eq!(config.heavy_mutation_attempts, None);
        assert!(!config.strict_validation);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TspGaConfig::default()
            .with_city_count(48)
            .with_population_size(200)
            .with_generations(1000)
            .with_stagnation_window(20)
            .with_stagnation_threshold(5)
            .with_explore_crossover_rate(0.5)
            .with_exploit_crossover_rate(0.9)
            .with_mutation_rate(0.05)
            .with_fitness_constant(1.0)
            .with_light_mutation_attempts(3)
            .with_heavy_mutation_attempts(12)
            .with_strict_validation(true)
            .with_progress_interval(100)
            .with_seed(42);

        assert_eq!(config.city_count, Some(48));
        assert_eq!(config.population_size, 200);
        assert_eq!(config.generations, 1000);
        assert_eq!(config.stagnation_window, 20);
        assert_eq!(config.stagnation_threshold, 5);
        assert!((config.explore_crossover_rate - 0.5).abs() < 1e-10);
        assert!((config.exploit_crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.light_mutation_attempts, 3);
        assert_eq!(config.heavy_attempts_for(48), 12);
        assert!(config.strict_validation);
        assert_eq!(config.progress_interval, 100);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_heavy_attempts_default_to_city_count() {
        assert_eq!(TspGaConfig::default().heavy_attempts_for(48), 48);
    }

    #[test]
    fn test_validate_ok() {
        assert!(TspGaConfig::default().validate().is_ok());
        assert!(TspGaConfig::fast().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = TspGaConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = TspGaConfig::default().with_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_window() {
        let config = TspGaConfig::default().with_stagnation_window(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_fitness_constant() {
        assert!(TspGaConfig::default()
            .with_fitness_constant(0.0)
            .validate()
            .is_err());
        assert!(TspGaConfig::default()
            .with_fitness_constant(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rate_set_directly() {
        let config = TspGaConfig {
            mutation_rate: 1.5,
            ..TspGaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_rates() {
        let config = TspGaConfig::default()
            .with_explore_crossover_rate(1.5)
            .with_exploit_crossover_rate(-0.5)
            .with_mutation_rate(2.0);

        assert!((config.explore_crossover_rate - 1.0).abs() < 1e-10);
        assert!((config.exploit_crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_preset_fast() {
        let config = TspGaConfig::fast();
        assert_eq!(config.population_size, 40);
        assert_eq!(config.generations, 500);
        assert_eq!(config.stagnation_window, 10);
    }

    #[test]
    fn test_preset_chainable() {
        let config = TspGaConfig::fast().with_population_size(75).with_seed(42);
        assert_eq!(config.population_size, 75);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.generations, 500);
    }
}
