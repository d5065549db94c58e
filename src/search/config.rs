//! Search configuration.
//!
//! [`GeneratorConfig`] holds all parameters that control the population
//! search.

use crate::builder::DEFAULT_MAX_ATTEMPTS;

/// Configuration for the timetable search.
///
/// Controls population size, generation budget, per-course placement
/// attempts, the optional mutation step, parallelism, and seeding.
///
/// # Defaults
///
/// ```
/// use u_timetable::search::GeneratorConfig;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.max_attempts, 100);
/// assert_eq!(config.mutation_rate, 0.0);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::search::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of candidate schedules in the population.
    pub population_size: usize,

    /// Maximum number of select-and-duplicate generations.
    pub max_generations: usize,

    /// Placement attempts per course before a build fails.
    pub max_attempts: usize,

    /// Probability of re-rolling one course of each duplicated candidate
    /// (0.0–1.0).
    ///
    /// At 0.0 (the default) generations only rank, truncate, and duplicate,
    /// so no schedule appears that was not built in the initial population.
    pub mutation_rate: f64,

    /// Whether to build the initial population in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` cargo feature. Results are the
    /// same either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            mutation_rate: 0.0,
            parallel: true,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the placement attempts per course.
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within 0.0..=1.0".into());
        }
        Ok(())
    }
}
