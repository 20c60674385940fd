pub mod builder;
pub mod caching_challenge;
pub mod challenge;
pub mod launcher;
pub mod options;

pub use builder::EvolutionLauncherBuilder;
pub use challenge::Challenge;
pub use launcher::{EvolutionLauncher, EvolutionResult, GenerationCheckpoint};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
