use crate::individual::Individual;

/// The fitness function being maximised.
///
/// A challenge is opaque to the search: it may be arbitrarily expensive and is
/// only ever called through `score`. Scores should be finite; fitness-proportionate
/// selection additionally needs them to be non-negative.
///
/// Any `Fn(&Individual) -> f64` is a challenge.
pub trait Challenge {
    fn score(&self, individual: &Individual) -> f64;
}

impl<F> Challenge for F
where
    F: Fn(&Individual) -> f64,
{
    fn score(&self, individual: &Individual) -> f64 {
        self(individual)
    }
}
