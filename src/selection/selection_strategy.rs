use std::fmt::Debug;

use crate::error::Result;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection strategies.
///
/// Selection strategies are responsible for choosing parents from a population
/// based on their fitness scores. Different selection strategies can be used to
/// achieve different evolutionary behaviors.
///
/// # Examples
///
/// ```
/// use gasearch::individual::initialize_population;
/// use gasearch::selection::{RouletteWheelSelection, SelectionStrategy};
/// use gasearch::space::{ParameterSpace, ParameterSpec};
/// use gasearch::rng::RandomNumberGenerator;
/// use gasearch::error::Result;
///
/// fn main() -> Result<()> {
///     let space = ParameterSpace::new(vec![ParameterSpec::integer("n", 0, 9)?])?;
///     let mut rng = RandomNumberGenerator::from_seed(1);
///     let population = initialize_population(3, &space, &mut rng);
///     let fitness = vec![0.5, 0.8, 0.3];
///
///     let selection = RouletteWheelSelection::new();
///     let selected = selection.select(&population, &fitness, 3, &mut rng)?;
///
///     assert_eq!(selected.len(), 3);
///
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` individuals, with replacement, preserving draw order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    /// - A fitness value is unusable for this strategy
    fn select(
        &self,
        population: &[Individual],
        fitness: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>;

    /// Checks a single fitness value as soon as it is computed, so a run can
    /// fail at evaluation time instead of inside `select`.
    ///
    /// The default accepts every value.
    fn check_fitness(&self, _individual: &Individual, _fitness: f64) -> Result<()> {
        Ok(())
    }
}
