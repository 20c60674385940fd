use crate::error::{GeneticError, OptionExt, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals based on their rank in the population.
///
/// Rank-based selection assigns a selection probability to each individual based on its
/// rank in the population, rather than its absolute fitness value. Only the order of the
/// fitness values matters, so negative fitness is fine.
///
/// With `n` individuals ranked `0` (worst) to `n - 1` (best), the probability of
/// rank `r` is `(2 - sp) / n + 2 r (sp - 1) / (n (n - 1))` where `sp` is the
/// selection pressure.
///
/// # Examples
///
/// ```
/// use gasearch::individual::Individual;
/// use gasearch::selection::{RankBasedSelection, SelectionStrategy};
/// use gasearch::rng::RandomNumberGenerator;
/// use gasearch::error::Result;
///
/// fn main() -> Result<()> {
///     let population = vec![Individual::new(); 5];
///     let fitness = vec![-0.5, 0.8, -0.3, 0.9, 0.1];
///     let mut rng = RandomNumberGenerator::new();
///
///     let selection = RankBasedSelection::new(1.5)?;
///     let selected = selection.select(&population, &fitness, 5, &mut rng)?;
///
///     assert_eq!(selected.len(), 5);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RankBasedSelection {
    /// Higher values increase selection pressure.
    selection_pressure: f64,
}

impl RankBasedSelection {
    /// Creates a new RankBasedSelection strategy.
    ///
    /// # Arguments
    ///
    /// * `selection_pressure` - Must be in the range [1.0, 2.0].
    ///   - At 1.0, all individuals have equal selection probability
    ///   - At 2.0, selection pressure is at its maximum
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `selection_pressure` is not in the range [1.0, 2.0].
    pub fn new(selection_pressure: f64) -> Result<Self> {
        if !(1.0..=2.0).contains(&selection_pressure) {
            return Err(GeneticError::Configuration(
                "Selection pressure must be in the range [1.0, 2.0]".to_string(),
            ));
        }

        Ok(Self { selection_pressure })
    }

    pub fn selection_pressure(&self) -> f64 {
        self.selection_pressure
    }

    /// Calculates the cumulative selection probabilities for each individual based on their rank.
    fn calculate_probabilities(&self, fitness: &[f64]) -> Vec<f64> {
        let n = fitness.len();
        if n == 1 {
            return vec![1.0];
        }

        // Ascending order: index 0 of `order` is the worst individual
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

        let mut rank_of = vec![0; n];
        for (rank, &idx) in order.iter().enumerate() {
            rank_of[idx] = rank;
        }

        let n_f = n as f64;
        let sp = self.selection_pressure;
        let mut cumulative = 0.0;
        let mut probs: Vec<f64> = rank_of
            .iter()
            .map(|&rank| {
                cumulative += (2.0 - sp) / n_f + (2.0 * rank as f64 * (sp - 1.0)) / (n_f * (n_f - 1.0));
                cumulative
            })
            .collect();

        if let Some(last) = probs.last_mut() {
            *last = 1.0;
        }

        probs
    }
}

impl Default for RankBasedSelection {
    fn default() -> Self {
        Self {
            selection_pressure: 1.5,
        }
    }
}

impl SelectionStrategy for RankBasedSelection {
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

        let cumulative_probs = self.calculate_probabilities(fitness);

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

    fn check_fitness(&self, _individual: &Individual, fitness: f64) -> Result<()> {
        if fitness.is_nan() {
            return Err(GeneticError::FitnessCalculation(
                "NaN fitness score encountered".to_string(),
            ));
        }
        Ok(())
    }
}
