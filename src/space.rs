//! # Parameter Space
//!
//! A `ParameterSpace` is the declarative description of what is being searched:
//! an ordered list of named parameters, each with a kind and a domain. It is the
//! genotype schema shared by every individual of every run.
//!
//! ## Example
//!
//! ```rust
//! use gasearch::space::{ParameterSpace, ParameterSpec};
//! use gasearch::rng::RandomNumberGenerator;
//!
//! # fn main() -> gasearch::Result<()> {
//! let space = ParameterSpace::new(vec![
//!     ParameterSpec::categorical("param1", ["c1", "c2", "c3"])?,
//!     ParameterSpec::integer("param2", 1, 100)?,
//!     ParameterSpec::real("param3", 0.0, 1.0)?,
//! ])?;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let individual = space.sample(&mut rng);
//! assert!(space.admits(&individual));
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// A concrete value for one parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    Categorical(String),
    Integer(i64),
    Real(f64),
}

impl ParamValue {
    /// Returns the numeric value for integer and real parameters.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(v) => Some(*v as f64),
            ParamValue::Real(v) => Some(*v),
            ParamValue::Categorical(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Categorical(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Categorical(v) => write!(f, "{}", v),
            ParamValue::Integer(v) => write!(f, "{}", v),
            ParamValue::Real(v) => write!(f, "{}", v),
        }
    }
}

/// The kind of a parameter together with its domain.
///
/// Numeric bounds are inclusive. A categorical domain is an ordered,
/// non-empty list of candidates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParamKind {
    Categorical(Vec<String>),
    Integer { lower: i64, upper: i64 },
    Real { lower: f64, upper: f64 },
}

/// A single named parameter of the search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterSpec {
    name: String,
    kind: ParamKind,
}

impl ParameterSpec {
    /// Creates a spec after checking that its domain is well formed.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for an empty categorical domain,
    /// inverted numeric bounds, or real bounds that are non-finite or whose
    /// width overflows.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Result<Self> {
        let spec = Self {
            name: name.into(),
            kind,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn categorical<I, S>(name: impl Into<String>, candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ParamKind::Categorical(candidates.into_iter().map(Into::into).collect()),
        )
    }

    pub fn integer(name: impl Into<String>, lower: i64, upper: i64) -> Result<Self> {
        Self::new(name, ParamKind::Integer { lower, upper })
    }

    pub fn real(name: impl Into<String>, lower: f64, upper: f64) -> Result<Self> {
        Self::new(name, ParamKind::Real { lower, upper })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    /// Checks the domain. Specs built through the constructors are already
    /// valid; this is re-run by `ParameterSpace::new` for deserialized specs.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(GeneticError::Configuration(
                "Parameter name cannot be empty".to_string(),
            ));
        }

        match &self.kind {
            ParamKind::Categorical(candidates) if candidates.is_empty() => {
                Err(GeneticError::Configuration(format!(
                    "Categorical parameter '{}' has an empty domain",
                    self.name
                )))
            }
            ParamKind::Integer { lower, upper } if lower > upper => {
                Err(GeneticError::Configuration(format!(
                    "Integer parameter '{}' has inverted bounds [{}, {}]",
                    self.name, lower, upper
                )))
            }
            ParamKind::Real { lower, upper } if !lower.is_finite() || !upper.is_finite() => {
                Err(GeneticError::Configuration(format!(
                    "Real parameter '{}' has non-finite bounds [{}, {}]",
                    self.name, lower, upper
                )))
            }
            ParamKind::Real { lower, upper } if lower > upper => {
                Err(GeneticError::Configuration(format!(
                    "Real parameter '{}' has inverted bounds [{}, {}]",
                    self.name, lower, upper
                )))
            }
            ParamKind::Real { lower, upper } if !(upper - lower).is_finite() => {
                Err(GeneticError::Configuration(format!(
                    "Real parameter '{}' has a domain too wide to sample [{}, {}]",
                    self.name, lower, upper
                )))
            }
            _ => Ok(()),
        }
    }

    /// Draws a uniformly random value from the domain.
    ///
    /// Integers are uniform over `[lower, upper]`, reals over `[lower, upper)`
    /// (a degenerate interval yields `lower`), categoricals pick each candidate
    /// with equal probability.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> ParamValue {
        match &self.kind {
            ParamKind::Integer { lower, upper } => ParamValue::Integer(rng.gen_range(*lower..=*upper)),
            ParamKind::Real { lower, upper } => {
                if lower < upper {
                    ParamValue::Real(rng.gen_range(*lower..*upper))
                } else {
                    ParamValue::Real(*lower)
                }
            }
            ParamKind::Categorical(candidates) => {
                let idx = rng.gen_range(0..candidates.len());
                ParamValue::Categorical(candidates[idx].clone())
            }
        }
    }

    /// Whether `value` has this parameter's kind and lies inside its domain.
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (&self.kind, value) {
            (ParamKind::Integer { lower, upper }, ParamValue::Integer(v)) => (lower..=upper).contains(&v),
            (ParamKind::Real { lower, upper }, ParamValue::Real(v)) => (lower..=upper).contains(&v),
            (ParamKind::Categorical(candidates), ParamValue::Categorical(v)) => candidates.contains(v),
            _ => false,
        }
    }
}

/// An ordered sequence of parameter specs with unique names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParameterSpace {
    specs: Vec<ParameterSpec>,
}

impl ParameterSpace {
    /// Creates a space from its specs.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the list is empty, a name is
    /// repeated, or any spec has a malformed domain.
    pub fn new(specs: Vec<ParameterSpec>) -> Result<Self> {
        let space = Self { specs };
        space.validate()?;
        Ok(space)
    }

    pub fn validate(&self) -> Result<()> {
        if self.specs.is_empty() {
            return Err(GeneticError::Configuration(
                "Parameter space must declare at least one parameter".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.specs.len());
        for spec in &self.specs {
            spec.validate()?;
            if !seen.insert(spec.name()) {
                return Err(GeneticError::Configuration(format!(
                    "Duplicate parameter name '{}'",
                    spec.name()
                )));
            }
        }

        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.specs.iter().find(|spec| spec.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(ParameterSpec::name)
    }

    /// Builds an individual by sampling every parameter independently.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> Individual {
        self.specs
            .iter()
            .map(|spec| (spec.name().to_string(), spec.sample(rng)))
            .collect()
    }

    /// Whether `individual` has exactly this space's keys and every value is in its domain.
    pub fn admits(&self, individual: &Individual) -> bool {
        individual.len() == self.specs.len()
            && self.specs.iter().all(|spec| {
                individual
                    .get(spec.name())
                    .is_some_and(|value| spec.contains(value))
            })
    }
}

impl<'a> IntoIterator for &'a ParameterSpace {
    type Item = &'a ParameterSpec;
    type IntoIter = std::slice::Iter<'a, ParameterSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
