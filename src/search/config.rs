//! # SearchConfig
//!
//! Everything needed to launch a multi-run search in one value: the core budget,
//! the number of runs, the options every run evolves with, and the optional
//! per-run timeout and base seed.
//!
//! With the `serde` feature enabled a `SearchConfig` can be read straight from
//! JSON or any other serde format:
//!
//! ```rust
//! # #[cfg(feature = "serde")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gasearch::search::SearchConfig;
//!
//! let config: SearchConfig = serde_json::from_str(r#"{
//!     "cores": 4,
//!     "times": 8,
//!     "optimizer": { "population_size": 40, "num_generations": 5, "mutation_rate": 0.05 }
//! }"#)?;
//! config.validate()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeneticError, Result};
use crate::evolution::EvolutionOptions;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Maximum number of runs in flight at once.
    pub cores: usize,
    /// Total number of independent runs.
    pub times: usize,
    pub optimizer: EvolutionOptions,
    pub run_timeout: Option<Duration>,
    pub base_seed: Option<u64>,
}

impl SearchConfig {
    /// Checks the whole configuration before any run starts.
    pub fn validate(&self) -> Result<()> {
        if self.cores == 0 {
            return Err(GeneticError::Configuration(
                "Core budget cannot be zero".to_string(),
            ));
        }

        if self.times == 0 {
            return Err(GeneticError::Configuration(
                "Number of runs cannot be zero".to_string(),
            ));
        }

        if self.run_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(GeneticError::Configuration(
                "Run timeout cannot be zero".to_string(),
            ));
        }

        self.optimizer.validate()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cores: 1,
            times: 1,
            optimizer: EvolutionOptions::default(),
            run_timeout: None,
            base_seed: None,
        }
    }
}
