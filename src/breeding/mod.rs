//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines the interface for strategies responsible for breeding
//! the next population from the parents chosen by selection.
pub mod pairwise;

use std::fmt::Debug;

use crate::{
    error::Result, evolution::options::EvolutionOptions, individual::Individual,
    rng::RandomNumberGenerator, space::ParameterSpace,
};

/// # BreedStrategy
///
/// Turns a list of selected parents into the next generation.
pub trait BreedStrategy
where
    Self: Debug + Clone + Send + Sync,
{
    /// Breeds new individuals from `parents`.
    ///
    /// ## Parameters
    ///
    /// - `parents`: The selected parents, in draw order.
    /// - `space`: The parameter space children are mutated within.
    /// - `evol_options`: The evolution options (mutation rate and friends).
    /// - `rng`: The random number generator of the run.
    ///
    /// ## Errors
    ///
    /// This method fails if the parents slice is empty.
    fn breed(
        &self,
        parents: &[Individual],
        space: &ParameterSpace,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>;
}

pub use pairwise::PairwiseBreeding;
