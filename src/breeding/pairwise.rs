//! # PairwiseBreeding
//!
//! Parents are consumed in consecutive pairs. Each pair yields two children from
//! two independent crossovers of the same pair, and each child is mutated on its
//! own. When the number of parents is odd the last parent has no partner and
//! produces nothing, so the next generation is one smaller.
use super::BreedStrategy;
use crate::{
    error::{GeneticError, Result},
    evolution::options::EvolutionOptions,
    individual::Individual,
    rng::RandomNumberGenerator,
    space::ParameterSpace,
};

#[derive(Debug, Clone, Default)]
pub struct PairwiseBreeding;

impl PairwiseBreeding {
    pub fn new() -> Self {
        Self
    }
}

impl BreedStrategy for PairwiseBreeding {
    fn breed(
        &self,
        parents: &[Individual],
        space: &ParameterSpace,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        if parents.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mutation_rate = evol_options.get_mutation_rate();
        let mut children = Vec::with_capacity(parents.len() - parents.len() % 2);

        for pair in parents.chunks_exact(2) {
            let (parent1, parent2) = (&pair[0], &pair[1]);
            let child1 = parent1.crossover(parent2, rng);
            let child2 = parent1.crossover(parent2, rng);
            children.push(child1.mutate(space, mutation_rate, rng));
            children.push(child2.mutate(space, mutation_rate, rng));
        }

        Ok(children)
    }
}
