pub mod breeding;
pub mod caching;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod rng;
pub mod search;
pub mod selection;
pub mod space;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{Challenge, EvolutionLauncher, EvolutionOptions, EvolutionResult, LogLevel};
pub use individual::{Individual, Population};
pub use rng::RandomNumberGenerator;
pub use search::{MultiRunSearch, RunOutcome, SearchConfig};
pub use space::{ParamKind, ParamValue, ParameterSpace, ParameterSpec};
