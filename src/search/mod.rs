//! # Multi-run search
//!
//! Repeats an evolutionary search `times` times with at most `cores` runs in
//! flight, and collects one [`RunOutcome`] per run.
pub mod config;
pub mod coordinator;
pub mod outcome;

pub use config::SearchConfig;
pub use coordinator::{MultiRunSearch, SearchRun};
pub use outcome::{best_outcome, RunOutcome};
