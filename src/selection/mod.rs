pub mod rank;
pub mod roulette;
pub mod selection_strategy;

pub use rank::RankBasedSelection;
pub use roulette::{NegativeFitnessPolicy, RouletteWheelSelection, EPSILON};
pub use selection_strategy::SelectionStrategy;

/// Draws an index from a cumulative probability vector whose last entry is 1.0.
pub(crate) fn draw_index(cumulative_probs: &[f64], r: f64) -> usize {
    cumulative_probs
        .partition_point(|&p| p <= r)
        .min(cumulative_probs.len().saturating_sub(1))
}
