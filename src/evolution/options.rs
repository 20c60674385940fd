//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct represents the configuration options for a single
//! genetic algorithm run. It includes parameters such as the number of generations,
//! population size, mutation rate, the early-stop threshold and the logging level.
//!
//! ## Example
//!
//! ```rust
//! use gasearch::evolution::options::{EvolutionOptions, LogLevel};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(5, LogLevel::Minimal, 40, 0.05);
//!
//! // Or with the builder
//! let options = EvolutionOptions::builder()
//!     .num_generations(5)
//!     .population_size(40)
//!     .mutation_rate(0.05)
//!     .search_threshold(0.3)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! ```
//!
//! ## `LogLevel`
//!
//! - `Verbose`: one line per generation plus one `debug` event per evaluated individual.
//! - `Minimal`: one line per generation with the current best fitness.
//! - `None`: no per-generation output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeneticError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LogLevel {
    Verbose,
    #[default]
    Minimal,
    None,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    population_size: usize,
    mutation_rate: f64,
    /// Stop once the best fitness reaches this value
    search_threshold: Option<f64>,
    /// Label prefixed to progress lines
    title: String,
    /// Minimum population size for evaluating fitness in parallel
    parallel_threshold: usize,
}

impl EvolutionOptions {
    pub fn new(
        num_generations: usize,
        log_level: LogLevel,
        population_size: usize,
        mutation_rate: f64,
    ) -> Self {
        Self {
            num_generations,
            log_level,
            population_size,
            mutation_rate,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_search_threshold(&self) -> Option<f64> {
        self.search_threshold
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Returns the minimum population size at which fitness is evaluated in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_search_threshold(&mut self, search_threshold: Option<f64>) {
        self.search_threshold = search_threshold;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Checks the options before a run starts.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` when the population cannot form a
    /// breeding pair, no generation is requested, the mutation rate is outside
    /// `[0, 1]`, or the threshold is NaN.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.population_size < 2 {
            return Err(GeneticError::Configuration(
                "Population size must be at least 2 to form a breeding pair".to_string(),
            ));
        }

        if self.num_generations == 0 {
            return Err(GeneticError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GeneticError::Configuration(format!(
                "Mutation rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }

        if self.search_threshold.is_some_and(f64::is_nan) {
            return Err(GeneticError::Configuration(
                "Search threshold cannot be NaN".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 100,
            log_level: LogLevel::Minimal,
            population_size: 50,
            mutation_rate: 0.01,
            search_threshold: None,
            title: String::new(),
            parallel_threshold: 1000,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
/// Unset fields take the `Default` values.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    search_threshold: Option<f64>,
    title: Option<String>,
    parallel_threshold: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn search_threshold(mut self, value: f64) -> Self {
        self.search_threshold = Some(value);
        self
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            search_threshold: self.search_threshold,
            title: self.title.unwrap_or(defaults.title),
            parallel_threshold: self.parallel_threshold.unwrap_or(defaults.parallel_threshold),
        }
    }
}
