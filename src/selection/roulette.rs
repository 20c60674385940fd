use crate::error::{GeneticError, OptionExt, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Floor added to every weight so a population of zero-fitness individuals
/// still forms a valid distribution.
pub const EPSILON: f64 = 1e-15;

/// What roulette wheel selection does with negative fitness values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeFitnessPolicy {
    /// Fail with `GeneticError::FitnessContractViolation`.
    #[default]
    Reject,
    /// Shift every weight by the population minimum: `f - min(f) + EPSILON`.
    Shift,
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Each individual is weighted by `fitness + EPSILON`, the weights are
/// normalised into a probability vector, and parents are drawn independently
/// with replacement.
///
/// With the default `NegativeFitnessPolicy::Reject` policy all fitness values
/// must be non-negative. If your fitness can go negative, use
/// `NegativeFitnessPolicy::Shift` or rank-based selection instead.
///
/// # Examples
///
/// ```
/// use gasearch::individual::Individual;
/// use gasearch::selection::{RouletteWheelSelection, SelectionStrategy};
/// use gasearch::rng::RandomNumberGenerator;
/// use gasearch::error::Result;
///
/// fn main() -> Result<()> {
///     let population = vec![Individual::new(); 5];
///     let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
///     let mut rng = RandomNumberGenerator::new();
///
///     let selection = RouletteWheelSelection::new();
///     let selected = selection.select(&population, &fitness, 5, &mut rng)?;
///
///     assert_eq!(selected.len(), 5);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection {
    negative_policy: NegativeFitnessPolicy,
}

impl RouletteWheelSelection {
    /// Creates a roulette wheel that rejects negative fitness.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roulette wheel with the given negative fitness policy.
    pub fn with_policy(negative_policy: NegativeFitnessPolicy) -> Self {
        Self { negative_policy }
    }

    pub fn policy(&self) -> NegativeFitnessPolicy {
        self.negative_policy
    }

    /// Calculates the cumulative selection probabilities for each individual.
    ///
    /// # Errors
    ///
    /// Returns an error if a fitness value is not finite, or is negative under
    /// the reject policy.
    fn calculate_probabilities(&self, population: &[Individual], fitness: &[f64]) -> Result<Vec<f64>> {
        for (individual, &f) in population.iter().zip(fitness) {
            self.check_fitness(individual, f)?;
        }

        let offset = match self.negative_policy {
            NegativeFitnessPolicy::Reject => 0.0,
            NegativeFitnessPolicy::Shift => {
                let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
                -min
            }
        };

        let weights: Vec<f64> = fitness.iter().map(|&f| f + offset + EPSILON).collect();
        let sum: f64 = weights.iter().sum();

        if !(sum > 0.0 && sum.is_finite()) {
            return Err(GeneticError::FitnessCalculation(format!(
                "Selection weights sum to {}, cannot form a distribution",
                sum
            )));
        }

        let mut cumulative = 0.0;
        let mut probs: Vec<f64> = weights
            .iter()
            .map(|w| {
                cumulative += w / sum;
                cumulative
            })
            .collect();

        // Ensure the last probability is exactly 1.0 to avoid floating-point errors
        if let Some(last) = probs.last_mut() {
            *last = 1.0;
        }

        Ok(probs)
    }
}

impl SelectionStrategy for RouletteWheelSelection {
    fn select(
        &self,
        population: &[Individual],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if fitness.len() != population.len() {
            return Err(GeneticError::Configuration(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                population.len()
            )));
        }

        let cumulative_probs = self.calculate_probabilities(population, fitness)?;

        (0..num_to_select)
            .map(|_| {
                let idx = super::draw_index(&cumulative_probs, rng.unit());
                population
                    .get(idx)
                    .cloned()
                    .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
            })
            .collect()
    }

    fn check_fitness(&self, individual: &Individual, fitness: f64) -> Result<()> {
        if !fitness.is_finite() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Non-finite fitness score encountered: {}",
                fitness
            )));
        }

        if self.negative_policy == NegativeFitnessPolicy::Reject && fitness < 0.0 {
            return Err(GeneticError::FitnessContractViolation {
                fitness,
                individual: individual.clone(),
            });
        }

        Ok(())
    }
}
