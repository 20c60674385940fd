//! # Error Types
//!
//! This module defines custom error types for the search library.
//! It provides specific error variants for the failure scenarios that
//! may occur while configuring a search, evolving a population, or
//! coordinating several independent runs.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use gasearch::error::{GeneticError, Result};
//!
//! fn some_function() -> Result<()> {
//!     // Function implementation
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use gasearch::error::{GeneticError, OptionExt};
//!
//! fn find_best_candidate(candidates: &[i32]) -> gasearch::error::Result<i32> {
//!     candidates.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::individual::Individual;

/// Represents errors that can occur in the search library.
///
/// Configuration errors are raised eagerly, before any run starts. Everything
/// else is raised while a run is in flight and is confined to that run by the
/// [`MultiRunSearch`](crate::search::MultiRunSearch) coordinator.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The fitness function returned a value that fitness-proportionate
    /// selection cannot turn into a probability.
    #[error("Fitness contract violation: fitness {fitness} for {individual} is negative")]
    FitnessContractViolation { fitness: f64, individual: Individual },

    /// Error that occurs when a breeding operation fails.
    #[error("Breeding error: {0}")]
    Breeding(String),

    /// Error that occurs when a fitness calculation yields an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A single run panicked or returned an error.
    #[error("Run {run} failed: {reason}")]
    RunFailure { run: usize, reason: String },

    /// A single run did not report back within its time limit.
    #[error("Run {run} did not finish within {timeout:?}")]
    RunTimeout { run: usize, timeout: Duration },

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for search operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_ext() {
        let some: Option<u8> = Some(3);
        assert_eq!(some.ok_or_else_genetic(|| GeneticError::EmptyPopulation).unwrap(), 3);

        let none: Option<u8> = None;
        assert!(matches!(
            none.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
            Err(GeneticError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_run_failure_message() {
        let err = GeneticError::RunFailure {
            run: 3,
            reason: "backtest exploded".to_string(),
        };
        assert_eq!(err.to_string(), "Run 3 failed: backtest exploded");
    }
}
