use super::{
    challenge::Challenge,
    options::{EvolutionOptions, LogLevel},
};
use crate::{
    breeding::{BreedStrategy, PairwiseBreeding},
    error::{GeneticError, Result},
    individual::{initialize_population, Individual},
    rng::RandomNumberGenerator,
    selection::{RouletteWheelSelection, SelectionStrategy},
    space::ParameterSpace,
};
use rayon::prelude::*;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The running best as it stood at the end of one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationCheckpoint {
    /// 1-based generation index.
    pub generation: usize,
    pub best_fitness: f64,
    pub best: Option<Individual>,
}

/// Represents the result of a run: the best individual ever evaluated and its score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvolutionResult {
    /// The best individual, `None` if nothing scored above negative infinity.
    pub best: Option<Individual>,
    /// The fitness score of `best`, or negative infinity.
    pub score: f64,
    /// Number of generations actually evaluated.
    pub generations: usize,
    /// Whether the run stopped early on the search threshold.
    pub reached_threshold: bool,
    /// One checkpoint per evaluated generation.
    pub history: Vec<GenerationCheckpoint>,
}

impl EvolutionResult {
    fn empty() -> Self {
        Self {
            best: None,
            score: f64::NEG_INFINITY,
            generations: 0,
            reached_threshold: false,
            history: Vec::new(),
        }
    }
}

/// Runs one genetic algorithm search over a parameter space.
///
/// Every generation the whole population is scored, the running best is updated on
/// strict improvement, parents are drawn by the selection strategy and the breed
/// strategy produces the next population.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<B, S, C>
where
    B: BreedStrategy,
    S: SelectionStrategy,
    C: Challenge,
{
    space: ParameterSpace,
    breed_strategy: B,
    selection_strategy: S,
    challenge: C,
}

impl<C> EvolutionLauncher<PairwiseBreeding, RouletteWheelSelection, C>
where
    C: Challenge + Send + Sync,
{
    /// Creates a launcher with pairwise breeding and roulette wheel selection.
    pub fn with_defaults(space: ParameterSpace, challenge: C) -> Self {
        Self::new(
            space,
            PairwiseBreeding::new(),
            RouletteWheelSelection::new(),
            challenge,
        )
    }
}

impl<B, S, C> EvolutionLauncher<B, S, C>
where
    B: BreedStrategy,
    S: SelectionStrategy,
    C: Challenge + Send + Sync,
{
    /// Creates a new `EvolutionLauncher` instance.
    ///
    /// # Arguments
    ///
    /// * `space` - The parameter space every individual is drawn from.
    /// * `breed_strategy` - Produces the next population from the selected parents.
    /// * `selection_strategy` - Picks parents according to fitness.
    /// * `challenge` - The fitness function.
    pub fn new(space: ParameterSpace, breed_strategy: B, selection_strategy: S, challenge: C) -> Self {
        Self {
            space,
            breed_strategy,
            selection_strategy,
            challenge,
        }
    }

    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    /// Evolves a freshly initialised population for the configured number of generations.
    ///
    /// # Returns
    ///
    /// The best individual ever evaluated together with its score and the per-generation
    /// history.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options or the parameter space are invalid
    /// - A fitness value is non-finite or rejected by the selection strategy
    /// - Selection or breeding fail
    ///
    /// # Performance
    ///
    /// Populations at or above the parallel threshold are scored with Rayon's parallel
    /// iterator; smaller ones are scored sequentially.
    pub fn evolve(
        &self,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        options.validate()?;
        self.space.validate()?;

        let mut population = initialize_population(options.get_population_size(), &self.space, rng);
        let mut result = EvolutionResult::empty();

        for generation in 1..=options.get_num_generations() {
            let fitness = self.evaluate(&population, options)?;

            for (individual, &score) in population.iter().zip(&fitness) {
                if score > result.score {
                    result.score = score;
                    result.best = Some(individual.clone());
                }
            }

            result.generations = generation;
            result.history.push(GenerationCheckpoint {
                generation,
                best_fitness: result.score,
                best: result.best.clone(),
            });

            if options.get_log_level() != LogLevel::None {
                info!(
                    title = options.get_title(),
                    generation,
                    best_fitness = result.score,
                    "{} Generation {}, Best Fitness: {}",
                    options.get_title(),
                    generation,
                    result.score
                );
            }

            if options
                .get_search_threshold()
                .is_some_and(|threshold| result.score >= threshold)
            {
                result.reached_threshold = true;
                break;
            }

            if generation == options.get_num_generations() {
                break;
            }

            let parents =
                self.selection_strategy
                    .select(&population, &fitness, population.len(), rng)?;

            population = self
                .breed_strategy
                .breed(&parents, &self.space, options, rng)
                .map_err(|e| {
                    GeneticError::Breeding(format!(
                        "Failed to breed generation {}: {}",
                        generation + 1,
                        e
                    ))
                })?;
        }

        Ok(result)
    }

    /// Scores every individual once, in population order.
    fn evaluate(&self, population: &[Individual], options: &EvolutionOptions) -> Result<Vec<f64>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let score_one = |individual: &Individual| -> Result<f64> {
            let score = self.challenge.score(individual);

            if !score.is_finite() {
                return Err(GeneticError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    score
                )));
            }

            self.selection_strategy.check_fitness(individual, score)?;
            Ok(score)
        };

        let fitness: Vec<f64> = if population.len() >= options.get_parallel_threshold() {
            population.par_iter().map(&score_one).collect::<Result<_>>()?
        } else {
            population.iter().map(&score_one).collect::<Result<_>>()?
        };

        if options.get_log_level() == LogLevel::Verbose {
            for (individual, score) in population.iter().zip(&fitness) {
                debug!(title = options.get_title(), %individual, score, "evaluated");
            }
        }

        Ok(fitness)
    }
}
