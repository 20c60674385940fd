//! # Individual
//!
//! An `Individual` is one candidate parameter assignment: a mapping from
//! parameter name to a concrete value. Individuals are value objects; the
//! genetic operators here always hand back a fresh individual and never alias
//! the state of a parent.
//!
//! ## Example
//!
//! ```rust
//! use gasearch::individual::initialize_population;
//! use gasearch::space::{ParameterSpace, ParameterSpec};
//! use gasearch::rng::RandomNumberGenerator;
//!
//! # fn main() -> gasearch::Result<()> {
//! let space = ParameterSpace::new(vec![ParameterSpec::real("x", 0.0, 1.0)?])?;
//! let mut rng = RandomNumberGenerator::from_seed(5);
//!
//! let population = initialize_population(10, &space, &mut rng);
//! let child = population[0].crossover(&population[1], &mut rng);
//! let child = child.mutate(&space, 0.1, &mut rng);
//! assert!(space.admits(&child));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng::RandomNumberGenerator;
use crate::space::{ParamValue, ParameterSpace};

/// A population is an ordered list of individuals.
pub type Population = Vec<Individual>;

/// One candidate parameter assignment.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Individual {
    genes: BTreeMap<String, ParamValue>,
}

impl Individual {
    /// Creates an individual with no genes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.genes.get(name)
    }

    /// Sets a gene, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.genes.insert(name.into(), value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.genes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.genes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Uniform crossover: every gene is taken from `self` or `other` on an
    /// independent fair coin.
    ///
    /// The child has `self`'s key set. Both parents are expected to share a
    /// schema; a key missing from `other` keeps `self`'s value.
    pub fn crossover(&self, other: &Individual, rng: &mut RandomNumberGenerator) -> Individual {
        self.genes
            .iter()
            .map(|(name, value)| {
                let inherited = if rng.chance(0.5) {
                    value
                } else {
                    other.genes.get(name).unwrap_or(value)
                };
                (name.clone(), inherited.clone())
            })
            .collect()
    }

    /// Reroll mutation: each parameter of `space` is, with probability
    /// `mutation_rate`, replaced by a fresh sample from its whole domain.
    ///
    /// Consumes the individual. A rate of 0 leaves every gene untouched and a
    /// rate of 1 resamples every gene.
    pub fn mutate(
        mut self,
        space: &ParameterSpace,
        mutation_rate: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Individual {
        for spec in space {
            if rng.unit() < mutation_rate {
                self.genes.insert(spec.name().to_string(), spec.sample(rng));
            }
        }
        self
    }
}

impl FromIterator<(String, ParamValue)> for Individual {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self {
            genes: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

/// Builds `pop_size` individuals, each sampled independently from `space`.
///
/// Individuals are not required to be distinct.
pub fn initialize_population(
    pop_size: usize,
    space: &ParameterSpace,
    rng: &mut RandomNumberGenerator,
) -> Population {
    (0..pop_size).map(|_| space.sample(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ParameterSpec;

    fn mixed_space() -> ParameterSpace {
        ParameterSpace::new(vec![
            ParameterSpec::categorical("param1", ["c1", "c2", "c3"]).unwrap(),
            ParameterSpec::integer("param2", 1, 100).unwrap(),
            ParameterSpec::real("param3", 0.0, 1.0).unwrap(),
        ])
        .unwrap()
    }

    fn individual(p1: &str, p2: i64, p3: f64) -> Individual {
        [
            ("param1".to_string(), ParamValue::Categorical(p1.to_string())),
            ("param2".to_string(), ParamValue::Integer(p2)),
            ("param3".to_string(), ParamValue::Real(p3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_initialize_population_schema() {
        let space = mixed_space();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let population = initialize_population(41, &space, &mut rng);

        assert_eq!(population.len(), 41);
        for ind in &population {
            assert!(ind.keys().eq(space.names()));
            assert!(space.admits(ind));
        }
    }

    #[test]
    fn test_initialize_population_is_reproducible() {
        let space = mixed_space();
        let a = initialize_population(10, &space, &mut RandomNumberGenerator::from_seed(8));
        let b = initialize_population(10, &space, &mut RandomNumberGenerator::from_seed(8));
        assert_eq!(a, b);
    }

    #[test]
    fn test_crossover_takes_genes_from_parents() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let p1 = individual("c1", 1, 0.1);
        let p2 = individual("c2", 99, 0.9);

        for _ in 0..200 {
            let child = p1.crossover(&p2, &mut rng);
            assert!(child.keys().eq(p1.keys()));
            for (name, value) in child.iter() {
                assert!(value == p1.get(name).unwrap() || value == p2.get(name).unwrap());
            }
        }
    }

    #[test]
    fn test_crossover_mixes_parents() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let p1 = individual("c1", 1, 0.1);
        let p2 = individual("c2", 99, 0.9);

        let children: Vec<Individual> = (0..50).map(|_| p1.crossover(&p2, &mut rng)).collect();
        assert!(children.iter().any(|c| c != &p1 && c != &p2));
        // Parents are never modified
        assert_eq!(p1, individual("c1", 1, 0.1));
        assert_eq!(p2, individual("c2", 99, 0.9));
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let space = mixed_space();
        let mut rng = RandomNumberGenerator::from_seed(3);
        let original = individual("c3", 50, 0.5);

        let mutated = original.clone().mutate(&space, 0.0, &mut rng);
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_mutation_rate_one_rerolls_everything() {
        let space = ParameterSpace::new(vec![
            ParameterSpec::real("a", 0.0, 1.0).unwrap(),
            ParameterSpec::real("b", 10.0, 20.0).unwrap(),
        ])
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(4);
        let original: Individual = [
            ("a".to_string(), ParamValue::Real(0.25)),
            ("b".to_string(), ParamValue::Real(15.0)),
        ]
        .into_iter()
        .collect();

        let mutated = original.clone().mutate(&space, 1.0, &mut rng);
        assert!(space.admits(&mutated));
        assert_ne!(mutated.get("a"), original.get("a"));
        assert_ne!(mutated.get("b"), original.get("b"));
    }

    #[test]
    fn test_display() {
        let ind = individual("c1", 7, 0.5);
        assert_eq!(ind.to_string(), "{param1: c1, param2: 7, param3: 0.5}");
    }
}
