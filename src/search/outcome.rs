use std::time::Duration;

use crate::{
    error::{GeneticError, Result},
    evolution::EvolutionResult,
    individual::Individual,
};

/// What one run handed back to the coordinator.
#[derive(Debug)]
pub enum RunOutcome {
    /// The run finished and produced a result.
    Completed { run: usize, result: EvolutionResult },
    /// The run returned an error or panicked.
    Failed { run: usize, error: GeneticError },
    /// The run did not report back within the per-run time limit.
    TimedOut { run: usize, timeout: Duration },
}

impl RunOutcome {
    /// The 1-based index of the run.
    pub fn run_index(&self) -> usize {
        match self {
            RunOutcome::Completed { run, .. }
            | RunOutcome::Failed { run, .. }
            | RunOutcome::TimedOut { run, .. } => *run,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    pub fn result(&self) -> Option<&EvolutionResult> {
        match self {
            RunOutcome::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The best individual of a completed run.
    pub fn best_individual(&self) -> Option<&Individual> {
        self.result().and_then(|result| result.best.as_ref())
    }

    /// The best fitness of a completed run, negative infinity otherwise.
    pub fn best_fitness(&self) -> f64 {
        self.result().map_or(f64::NEG_INFINITY, |result| result.score)
    }

    pub fn into_result(self) -> Result<EvolutionResult> {
        match self {
            RunOutcome::Completed { result, .. } => Ok(result),
            RunOutcome::Failed { error, .. } => Err(error),
            RunOutcome::TimedOut { run, timeout } => Err(GeneticError::RunTimeout { run, timeout }),
        }
    }
}

/// Picks the completed outcome with the highest best fitness.
pub fn best_outcome(outcomes: &[RunOutcome]) -> Option<&RunOutcome> {
    outcomes
        .iter()
        .filter(|outcome| outcome.best_individual().is_some())
        .max_by(|a, b| a.best_fitness().total_cmp(&b.best_fitness()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ParamValue;

    fn completed(run: usize, score: f64) -> RunOutcome {
        let best: Individual = [("x".to_string(), ParamValue::Real(score))].into_iter().collect();
        RunOutcome::Completed {
            run,
            result: EvolutionResult {
                best: Some(best),
                score,
                generations: 1,
                reached_threshold: false,
                history: Vec::new(),
            },
        }
    }

    #[test]
    fn test_failed_outcome_is_distinguished() {
        let outcome = RunOutcome::Failed {
            run: 2,
            error: GeneticError::RunFailure {
                run: 2,
                reason: "boom".to_string(),
            },
        };

        assert!(!outcome.is_success());
        assert_eq!(outcome.run_index(), 2);
        assert!(outcome.best_individual().is_none());
        assert_eq!(outcome.best_fitness(), f64::NEG_INFINITY);
        assert!(matches!(outcome.into_result(), Err(GeneticError::RunFailure { .. })));
    }

    #[test]
    fn test_timed_out_into_result() {
        let outcome = RunOutcome::TimedOut {
            run: 4,
            timeout: Duration::from_millis(10),
        };

        assert!(matches!(
            outcome.into_result(),
            Err(GeneticError::RunTimeout { run: 4, .. })
        ));
    }

    #[test]
    fn test_best_outcome() {
        let outcomes = vec![
            completed(1, 0.4),
            RunOutcome::TimedOut {
                run: 2,
                timeout: Duration::from_secs(1),
            },
            completed(3, 0.9),
            completed(4, 0.2),
        ];

        assert_eq!(best_outcome(&outcomes).map(RunOutcome::run_index), Some(3));
        assert!(best_outcome(&[]).is_none());
    }
}
