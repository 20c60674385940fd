//! # Caching Module
//!
//! This module provides caching mechanisms for fitness evaluations. Crossover and
//! reroll mutation over categorical and integer parameters regularly reproduce an
//! individual that has already been scored, and the fitness function is usually the
//! most expensive part of a run.
//!
//! A cache belongs to exactly one challenge value and is never shared by clones.
//! Cloning a cached challenge copies or resets its map, so concurrent runs that
//! each evolve a clone of the same launcher never observe each other's entries.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::evolution::Challenge;
use crate::individual::Individual;
use crate::space::ParamValue;

/// A trait for values that can be used as cache keys.
pub trait CacheKey {
    /// The type of the cache key.
    type Key: Eq + std::hash::Hash + Clone + std::fmt::Debug + Send + Sync;

    /// Individuals that would get the same fitness must produce the same key.
    fn cache_key(&self) -> Self::Key;
}

/// Hashable form of a single gene. Reals are keyed by their bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeneKey {
    Categorical(String),
    Integer(i64),
    Real(u64),
}

impl From<&ParamValue> for GeneKey {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Categorical(v) => GeneKey::Categorical(v.clone()),
            ParamValue::Integer(v) => GeneKey::Integer(*v),
            ParamValue::Real(v) => GeneKey::Real(v.to_bits()),
        }
    }
}

/// Cache key of an individual: its genes in key order.
pub type IndividualKey = Vec<(String, GeneKey)>;

impl CacheKey for Individual {
    type Key = IndividualKey;

    fn cache_key(&self) -> Self::Key {
        self.iter()
            .map(|(name, value)| (name.to_string(), GeneKey::from(value)))
            .collect()
    }
}

/// A wrapper around a challenge that caches fitness evaluations in a
/// mutex-protected map shared by all threads scoring through it.
///
/// A clone starts from a snapshot of the current entries and then fills its own map.
#[derive(Debug)]
pub struct CachedChallenge<C>
where
    C: Challenge,
{
    challenge: C,
    cache: Mutex<HashMap<IndividualKey, f64>>,
}

impl<C> Clone for CachedChallenge<C>
where
    C: Challenge + Clone,
{
    fn clone(&self) -> Self {
        Self::with_cache(self.challenge.clone(), self.get_cache())
    }
}

impl<C> CachedChallenge<C>
where
    C: Challenge,
{
    pub fn new(challenge: C) -> Self {
        Self::with_cache(challenge, HashMap::new())
    }

    /// Creates a new cached challenge with a pre-populated cache.
    pub fn with_cache(challenge: C, cache: HashMap<IndividualKey, f64>) -> Self {
        Self {
            challenge,
            cache: Mutex::new(cache),
        }
    }

    pub fn inner(&self) -> &C {
        &self.challenge
    }

    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<IndividualKey, f64> {
        self.lock().clone()
    }

    // A poisoned lock only means another scorer panicked; the map itself is intact.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<IndividualKey, f64>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C> Challenge for CachedChallenge<C>
where
    C: Challenge,
{
    fn score(&self, individual: &Individual) -> f64 {
        let key = individual.cache_key();

        if let Some(score) = self.lock().get(&key) {
            return *score;
        }

        // Score outside the lock so parallel evaluation is not serialised
        let score = self.challenge.score(individual);
        self.lock().insert(key, score);

        score
    }
}

/// A thread-local cache for fitness evaluations.
///
/// Each thread has its own map, so there is no contention between threads.
#[derive(Debug, Default)]
pub struct ThreadLocalCache {
    cache: thread_local::ThreadLocal<RefCell<HashMap<IndividualKey, f64>>>,
}

impl ThreadLocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &IndividualKey) -> Option<f64> {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .and_then(|cache| cache.get(key).copied())
    }

    pub fn insert(&self, key: IndividualKey, value: f64) {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));
        if let Ok(mut cache) = cell.try_borrow_mut() {
            cache.insert(key, value);
        }
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }

    /// Returns the number of cached fitness evaluations for the current thread.
    pub fn len(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A wrapper around a challenge that uses a thread-local cache for fitness evaluations.
///
/// A clone starts with empty caches on every thread.
#[derive(Debug)]
pub struct ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    challenge: C,
    cache: ThreadLocalCache,
}

impl<C> Clone for ThreadLocalCachedChallenge<C>
where
    C: Challenge + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.challenge.clone())
    }
}

impl<C> ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    pub fn new(challenge: C) -> Self {
        Self {
            challenge,
            cache: ThreadLocalCache::new(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Clears the cache for the current thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns the number of cached fitness evaluations for the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<C> Challenge for ThreadLocalCachedChallenge<C>
where
    C: Challenge,
{
    fn score(&self, individual: &Individual) -> f64 {
        let key = individual.cache_key();

        if let Some(score) = self.cache.get(&key) {
            return score;
        }

        let score = self.challenge.score(individual);
        self.cache.insert(key, score);

        score
    }
}
