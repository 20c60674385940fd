use crate::{
    breeding::BreedStrategy,
    error::{GeneticError, Result},
    selection::SelectionStrategy,
    space::ParameterSpace,
};

use super::{Challenge, EvolutionLauncher};

/// Builder for `EvolutionLauncher`.
///
/// Every part must be set; `build` reports the first missing one as a configuration error.
pub struct EvolutionLauncherBuilder<B, S, C>
where
    B: BreedStrategy,
    S: SelectionStrategy,
    C: Challenge + Send + Sync,
{
    space: Option<ParameterSpace>,
    breed_strategy: Option<B>,
    selection_strategy: Option<S>,
    challenge: Option<C>,
}

impl<B, S, C> EvolutionLauncherBuilder<B, S, C>
where
    B: BreedStrategy,
    S: SelectionStrategy,
    C: Challenge + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            space: None,
            breed_strategy: None,
            selection_strategy: None,
            challenge: None,
        }
    }

    pub fn with_space(mut self, space: ParameterSpace) -> Self {
        self.space = Some(space);
        self
    }

    pub fn with_breed_strategy(mut self, breed_strategy: B) -> Self {
        self.breed_strategy = Some(breed_strategy);
        self
    }

    pub fn with_selection_strategy(mut self, selection_strategy: S) -> Self {
        self.selection_strategy = Some(selection_strategy);
        self
    }

    pub fn with_challenge(mut self, challenge: C) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn build(self) -> Result<EvolutionLauncher<B, S, C>> {
        let space = self.space.ok_or_else(|| {
            GeneticError::Configuration("Parameter space not specified".to_string())
        })?;
        space.validate()?;

        let breed_strategy = self.breed_strategy.ok_or_else(|| {
            GeneticError::Configuration("Breeding strategy not specified".to_string())
        })?;

        let selection_strategy = self.selection_strategy.ok_or_else(|| {
            GeneticError::Configuration("Selection strategy not specified".to_string())
        })?;

        let challenge = self
            .challenge
            .ok_or_else(|| GeneticError::Configuration("Challenge not specified".to_string()))?;

        Ok(EvolutionLauncher::new(
            space,
            breed_strategy,
            selection_strategy,
            challenge,
        ))
    }
}

impl<B, S, C> Default for EvolutionLauncherBuilder<B, S, C>
where
    B: BreedStrategy,
    S: SelectionStrategy,
    C: Challenge + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
