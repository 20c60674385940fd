use crate::{
    caching::{CachedChallenge, ThreadLocalCachedChallenge},
    evolution::Challenge,
};

/// Trait for wrapping a challenge with caching functionality.
///
/// # Example
///
/// ```
/// use gasearch::evolution::{caching_challenge::CachingChallenge, Challenge};
/// use gasearch::individual::Individual;
///
/// let backtest = |individual: &Individual| individual.len() as f64;
/// let cached = backtest.with_global_cache();
///
/// assert_eq!(cached.score(&Individual::new()), 0.0);
/// assert_eq!(cached.cache_size(), 1);
/// ```
pub trait CachingChallenge: Challenge + Sized + Clone {
    /// Wraps this challenge in a `CachedChallenge`, which uses a mutex-protected
    /// cache shared across all threads.
    fn with_global_cache(&self) -> CachedChallenge<Self>;

    /// Wraps this challenge in a `ThreadLocalCachedChallenge`, which uses
    /// a separate cache for each thread to avoid mutex contention.
    fn with_thread_local_cache(&self) -> ThreadLocalCachedChallenge<Self>;
}

impl<C> CachingChallenge for C
where
    C: Challenge + Clone,
{
    fn with_global_cache(&self) -> CachedChallenge<Self> {
        CachedChallenge::new(self.clone())
    }

    fn with_thread_local_cache(&self) -> ThreadLocalCachedChallenge<Self> {
        ThreadLocalCachedChallenge::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::individual::Individual;
    use crate::space::ParamValue;

    #[derive(Clone)]
    struct LengthChallenge;

    impl Challenge for LengthChallenge {
        fn score(&self, individual: &Individual) -> f64 {
            individual.len() as f64
        }
    }

    #[test]
    fn test_with_global_cache() {
        let cached = LengthChallenge.with_global_cache();
        let individual: Individual = [("a".to_string(), ParamValue::Integer(1))]
            .into_iter()
            .collect();

        assert_eq!(cached.score(&individual), 1.0);
        assert_eq!(cached.score(&individual), 1.0);
        assert_eq!(cached.cache_size(), 1);
    }

    #[test]
    fn test_with_thread_local_cache() {
        let cached = LengthChallenge.with_thread_local_cache();

        assert_eq!(cached.score(&Individual::new()), 0.0);
        assert_eq!(cached.cache_size(), 1);
    }
}
