//! # MultiRunSearch
//!
//! Runs the same search several times, independently, to reduce the chance of
//! every answer coming from the same local optimum.
//!
//! Runs are launched in batches of at most `cores`. Each run gets its own named
//! thread, its own random number generator and whatever state its search builds;
//! nothing mutable is shared between runs. The only shared structure is the result
//! channel, to which every run publishes exactly one message, success or failure.
//! A batch is complete once every member has reported (or its timeout has elapsed),
//! and only then does the next batch start, so a batch costs as much wall-clock
//! time as its slowest member.
//!
//! Each batch has its own channel and the coordinator keeps no sender of it. A
//! worker that dies without publishing therefore disconnects the channel instead
//! of leaving the coordinator waiting, and its run is recorded as failed.
//!
//! ## Timeouts
//!
//! A thread cannot be killed. When a run exceeds its timeout the coordinator
//! records it as timed out and detaches the thread, which keeps running until its
//! search returns. Such a thread can overlap the next batch, so while it lives
//! more than `cores` searches may be in flight and the strict batch ordering only
//! holds for runs that reported in time. Its eventual result is discarded.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    mpsc::{self, Receiver, RecvTimeoutError},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::config::SearchConfig;
use super::outcome::RunOutcome;
use crate::{
    breeding::BreedStrategy,
    error::{GeneticError, Result},
    evolution::{Challenge, EvolutionLauncher, EvolutionOptions, EvolutionResult},
    rng::RandomNumberGenerator,
    selection::SelectionStrategy,
};

/// One independent search, invoked once per run with its 1-based index and
/// its own random number generator.
///
/// Any `Fn(usize, &mut RandomNumberGenerator) -> Result<EvolutionResult>` that
/// can be sent to another thread is a `SearchRun`.
pub trait SearchRun: Send + Sync + 'static {
    fn search(&self, index: usize, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult>;
}

impl<F> SearchRun for F
where
    F: Fn(usize, &mut RandomNumberGenerator) -> Result<EvolutionResult> + Send + Sync + 'static,
{
    fn search(&self, index: usize, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
        self(index, rng)
    }
}

/// Launches `times` independent runs, at most `cores` at a time.
#[derive(Debug, Clone)]
pub struct MultiRunSearch {
    cores: usize,
    times: usize,
    run_timeout: Option<Duration>,
    base_seed: Option<u64>,
}

impl MultiRunSearch {
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `cores` or `times` is zero.
    pub fn new(cores: usize, times: usize) -> Result<Self> {
        if cores == 0 {
            return Err(GeneticError::Configuration(
                "Core budget cannot be zero".to_string(),
            ));
        }

        if times == 0 {
            return Err(GeneticError::Configuration(
                "Number of runs cannot be zero".to_string(),
            ));
        }

        Ok(Self {
            cores,
            times,
            run_timeout: None,
            base_seed: None,
        })
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cores: config.cores,
            times: config.times,
            run_timeout: config.run_timeout,
            base_seed: config.base_seed,
        })
    }

    /// Gives up on a run that has not reported back `timeout` after its batch started.
    ///
    /// The thread of a timed-out run cannot be killed; it is detached and its
    /// late result is discarded.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `timeout` is zero.
    pub fn with_run_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(GeneticError::Configuration(
                "Run timeout cannot be zero".to_string(),
            ));
        }

        self.run_timeout = Some(timeout);
        Ok(self)
    }

    /// Seeds run `i` with `seed + i`, making the whole search reproducible.
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    pub fn cores(&self) -> usize {
        self.cores
    }

    pub fn times(&self) -> usize {
        self.times
    }

    /// Runs `search` `times` times and returns one outcome per run, ordered by run index.
    ///
    /// Failed and timed-out runs are reported as such in their slot; they never stop
    /// sibling runs or later batches.
    ///
    /// # Errors
    ///
    /// Only configuration problems are returned as errors; per-run problems are
    /// part of the outcomes.
    pub fn run<R>(&self, search: R) -> Result<Vec<RunOutcome>>
    where
        R: SearchRun,
    {
        let search = Arc::new(search);
        let mut slots: Vec<Option<RunOutcome>> = (0..self.times).map(|_| None).collect();

        let indices: Vec<usize> = (1..=self.times).collect();
        for (batch_no, batch) in indices.chunks(self.cores).enumerate() {
            debug!(batch = batch_no + 1, runs = ?batch, "starting batch");

            let started = Instant::now();
            let (tx, rx) = mpsc::channel::<RunOutcome>();
            let mut handles: HashMap<usize, JoinHandle<()>> = HashMap::with_capacity(batch.len());
            for &index in batch {
                match self.spawn_run(index, Arc::clone(&search), tx.clone()) {
                    Ok(handle) => {
                        handles.insert(index, handle);
                    }
                    Err(e) => {
                        warn!(run = index, error = %e, "could not start run");
                        slots[index - 1] = Some(RunOutcome::Failed { run: index, error: e });
                    }
                }
            }
            // Only the workers hold senders from here on
            drop(tx);

            let pending: HashSet<usize> = handles.keys().copied().collect();
            for outcome in collect_batch(&rx, pending, self.run_timeout, started) {
                let index = outcome.run_index();
                if let RunOutcome::TimedOut { .. } = outcome {
                    // Detached: the thread cannot be stopped and is not waited for
                    handles.remove(&index);
                }
                slots[index - 1] = Some(outcome);
            }

            for (_, handle) in handles {
                let _ = handle.join();
            }
            debug!(batch = batch_no + 1, "batch complete");
        }

        Ok(slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.unwrap_or_else(|| RunOutcome::Failed {
                    run: i + 1,
                    error: GeneticError::RunFailure {
                        run: i + 1,
                        reason: "run was never collected".to_string(),
                    },
                })
            })
            .collect())
    }

    /// Runs the same launcher configuration `times` times.
    ///
    /// Each run evolves its own clone of `launcher`. Runs without a title are
    /// labelled `Search Index {i}:`. Options and the parameter space are validated
    /// before anything is launched.
    pub fn run_evolution<B, S, C>(
        &self,
        launcher: EvolutionLauncher<B, S, C>,
        options: EvolutionOptions,
    ) -> Result<Vec<RunOutcome>>
    where
        B: BreedStrategy + 'static,
        S: SelectionStrategy + Clone + 'static,
        C: Challenge + Clone + Send + Sync + 'static,
    {
        options.validate()?;
        launcher.space().validate()?;

        self.run(move |index: usize, rng: &mut RandomNumberGenerator| {
            let launcher = launcher.clone();
            let mut options = options.clone();
            if options.get_title().is_empty() {
                options.set_title(format!("Search Index {}:", index));
            }
            launcher.evolve(&options, rng)
        })
    }

    fn spawn_run<R>(
        &self,
        index: usize,
        search: Arc<R>,
        tx: mpsc::Sender<RunOutcome>,
    ) -> Result<JoinHandle<()>>
    where
        R: SearchRun,
    {
        let mut rng = match self.base_seed {
            Some(seed) => RandomNumberGenerator::from_seed(seed.wrapping_add(index as u64)),
            None => RandomNumberGenerator::new(),
        };

        let handle = thread::Builder::new()
            .name(format!("search-{}", index))
            .spawn(move || {
                info!(run = index, "Search Index {} Start", index);

                let outcome =
                    match panic::catch_unwind(AssertUnwindSafe(|| search.search(index, &mut rng))) {
                        Ok(Ok(result)) => RunOutcome::Completed { run: index, result },
                        Ok(Err(error)) => {
                            warn!(run = index, %error, "run failed");
                            RunOutcome::Failed { run: index, error }
                        }
                        Err(payload) => {
                            let reason = panic_message(payload.as_ref());
                            // A payload may panic again while it is dropped
                            let _ = panic::catch_unwind(AssertUnwindSafe(move || drop(payload)));
                            warn!(run = index, %reason, "run panicked");
                            RunOutcome::Failed {
                                run: index,
                                error: GeneticError::RunFailure { run: index, reason },
                            }
                        }
                    };

                info!(run = index, "Search Index {} End", index);
                // The coordinator may have stopped listening after a timeout
                let _ = tx.send(outcome);
            })?;

        Ok(handle)
    }
}

/// Waits for one outcome per `pending` run of a batch.
///
/// Runs still pending when the deadline passes are timed out. Runs still pending
/// when every sender is gone exited without publishing and are failed.
fn collect_batch(
    rx: &Receiver<RunOutcome>,
    mut pending: HashSet<usize>,
    run_timeout: Option<Duration>,
    started: Instant,
) -> Vec<RunOutcome> {
    let deadline = run_timeout.map(|timeout| started + timeout);
    let mut collected = Vec::with_capacity(pending.len());
    let mut disconnected = false;

    while !pending.is_empty() {
        let received = match deadline {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(outcome) => {
                if pending.remove(&outcome.run_index()) {
                    collected.push(outcome);
                }
            }
            Err(RecvTimeoutError::Timeout) => break,
            Err(RecvTimeoutError::Disconnected) => {
                disconnected = true;
                break;
            }
        }
    }

    let mut missing: Vec<usize> = pending.into_iter().collect();
    missing.sort_unstable();
    for index in missing {
        let outcome = match run_timeout {
            Some(timeout) if !disconnected => {
                warn!(run = index, ?timeout, "run timed out");
                RunOutcome::TimedOut { run: index, timeout }
            }
            _ => {
                warn!(run = index, "run exited without reporting a result");
                RunOutcome::Failed {
                    run: index,
                    error: GeneticError::RunFailure {
                        run: index,
                        reason: "run exited without reporting a result".to_string(),
                    },
                }
            }
        };
        collected.push(outcome);
    }

    collected
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "run panicked".to_string()
    }
}
