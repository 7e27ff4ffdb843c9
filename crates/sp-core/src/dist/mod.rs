//! Discrete probability distributions with an explicit invalid bucket.
//!
//! A [`Distribution`] maps [`Outcome`]s to non-negative mass in insertion
//! order. Masses need not sum to 1 until [`Distribution::normalize`] is
//! called. Conditioning on evidence routes rejected mass to
//! [`Outcome::Invalid`] instead of dropping it, so every intermediate result
//! keeps an honest account of where the probability went; the invalid bucket
//! is discarded only at `normalize`.
//!
//! # Example
//!
//! ```rust
//! use sp_core::dist::Distribution;
//!
//! // P(rain) = 0.3; observe "wet grass", which rain always causes and
//! // dry weather causes 10% of the time.
//! let weather = Distribution::choose(0.3, "rain", "dry").unwrap();
//! let posterior = weather
//!     .try_dependent(|w| {
//!         let p_wet = if *w == "rain" { 1.0 } else { 0.1 };
//!         let w = *w;
//!         Ok::<_, sp_core::dist::ProbError>(
//!             Distribution::choose(p_wet, true, false)?
//!                 .event_dependent(|wet| *wet, |_| Distribution::point(w)),
//!         )
//!     })
//!     .unwrap()
//!     .normalize()
//!     .unwrap();
//! assert_eq!(posterior.most_probable(), Some(&"rain"));
//! ```

mod error;
mod outcome;

pub use error::ProbError;
pub use outcome::Outcome;

use serde::{Serialize, Serializer};
use std::fmt;

/// Immutable distribution over outcomes of type `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<T> {
    entries: Vec<(Outcome<T>, f64)>,
}

impl<T> Distribution<T> {
    /// Every entry, the invalid bucket included, in insertion order.
    pub fn entries(&self) -> &[(Outcome<T>, f64)] {
        &self.entries
    }

    /// Valid (outcome, mass) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.entries
            .iter()
            .filter_map(|(outcome, mass)| outcome.valid().map(|value| (value, *mass)))
    }

    /// Valid outcomes in insertion order.
    pub fn outcomes(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(value, _)| value)
    }

    /// Number of valid outcomes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when no valid outcome is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mass currently held by the invalid bucket.
    pub fn invalid_mass(&self) -> f64 {
        self.entries
            .iter()
            .filter(|(outcome, _)| outcome.is_invalid())
            .map(|(_, mass)| mass)
            .sum()
    }

    /// Total mass over valid outcomes.
    pub fn valid_mass(&self) -> f64 {
        self.iter().map(|(_, mass)| mass).sum()
    }

    /// Outcome with the largest mass.
    ///
    /// Ties go to the outcome inserted first. Returns `None` when there is no
    /// valid outcome.
    pub fn most_probable(&self) -> Option<&T> {
        let mut best: Option<(&T, f64)> = None;
        for (value, mass) in self.iter() {
            if best.map_or(true, |(_, top)| mass > top) {
                best = Some((value, mass));
            }
        }
        best.map(|(value, _)| value)
    }
}

impl<T: Clone + PartialEq> Distribution<T> {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add mass to an outcome, merging with an existing entry.
    fn insert(&mut self, outcome: Outcome<T>, mass: f64) {
        match self.entries.iter_mut().find(|(key, _)| *key == outcome) {
            Some((_, existing)) => *existing += mass,
            None => self.entries.push((outcome, mass)),
        }
    }

    /// Distribution holding only the given entries (merged, unnormalized).
    fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Outcome<T>, f64)>,
    {
        let mut dist = Self::empty();
        for (outcome, mass) in entries {
            dist.insert(outcome, mass);
        }
        dist
    }

    /// Certain outcome: all mass on `value`.
    pub fn point(value: T) -> Self {
        Self {
            entries: vec![(Outcome::Valid(value), 1.0)],
        }
    }

    /// All mass in the invalid bucket ("this path cannot happen").
    pub fn invalid() -> Self {
        Self {
            entries: vec![(Outcome::Invalid, 1.0)],
        }
    }

    /// Equal mass `1/n` on each of `n` outcomes.
    ///
    /// # Errors
    ///
    /// [`ProbError::EmptyDomain`] if `outcomes` is empty.
    pub fn uniform<I>(outcomes: I) -> Result<Self, ProbError>
    where
        I: IntoIterator<Item = T>,
    {
        let outcomes: Vec<T> = outcomes.into_iter().collect();
        if outcomes.is_empty() {
            return Err(ProbError::EmptyDomain);
        }
        let mass = 1.0 / outcomes.len() as f64;
        Ok(Self::from_entries(
            outcomes
                .into_iter()
                .map(|value| (Outcome::Valid(value), mass)),
        ))
    }

    /// Mass proportional to non-negative weights, normalized to sum to 1.
    ///
    /// # Errors
    ///
    /// - [`ProbError::EmptyDomain`] for no outcomes
    /// - [`ProbError::InvalidProbability`] for a negative or non-finite weight
    /// - [`ProbError::DegenerateDistribution`] when every weight is zero
    pub fn from_weights<I>(weights: I) -> Result<Self, ProbError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let weights: Vec<(T, f64)> = weights.into_iter().collect();
        if weights.is_empty() {
            return Err(ProbError::EmptyDomain);
        }
        if let Some((_, bad)) = weights.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(ProbError::InvalidProbability { value: *bad });
        }

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return Err(ProbError::DegenerateDistribution);
        }

        Ok(Self::from_entries(
            weights
                .into_iter()
                .map(|(value, w)| (Outcome::Valid(value), w / total)),
        ))
    }

    /// Mass proportional to integer counts.
    pub fn from_counts<I>(counts: I) -> Result<Self, ProbError>
    where
        I: IntoIterator<Item = (T, u64)>,
    {
        Self::from_weights(counts.into_iter().map(|(value, n)| (value, n as f64)))
    }

    /// Pair `outcomes` with `counts` positionally and weight by count.
    pub fn enum_dist<I, C>(outcomes: I, counts: C) -> Result<Self, ProbError>
    where
        I: IntoIterator<Item = T>,
        C: IntoIterator<Item = u64>,
    {
        Self::from_counts(outcomes.into_iter().zip(counts))
    }

    /// Two-outcome distribution: `p` on `if_true`, `1 - p` on `if_false`.
    ///
    /// # Errors
    ///
    /// [`ProbError::InvalidProbability`] unless `0 <= p <= 1`.
    pub fn choose(p: f64, if_true: T, if_false: T) -> Result<Self, ProbError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(ProbError::InvalidProbability { value: p });
        }
        Ok(Self::from_entries([
            (Outcome::Valid(if_true), p),
            (Outcome::Valid(if_false), 1.0 - p),
        ]))
    }

    /// Unnormalized scores kept exactly as given (ranking use only).
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        Self::from_entries(
            scores
                .into_iter()
                .map(|(value, score)| (Outcome::Valid(value), score)),
        )
    }

    /// Monadic bind.
    ///
    /// The mass of `b` in the result is `Σ_a self(a) · f(a)(b)`. Invalid mass
    /// in `self` stays invalid; invalid mass returned by `f(a)` is scaled by
    /// `self(a)` and accumulated in the invalid bucket.
    pub fn dependent<U, F>(&self, mut f: F) -> Distribution<U>
    where
        U: Clone + PartialEq,
        F: FnMut(&T) -> Distribution<U>,
    {
        let mut out = Distribution::empty();
        for (outcome, mass) in &self.entries {
            match outcome {
                Outcome::Valid(value) => {
                    for (inner, inner_mass) in f(value).entries {
                        out.insert(inner, mass * inner_mass);
                    }
                }
                Outcome::Invalid => out.insert(Outcome::Invalid, *mass),
            }
        }
        out
    }

    /// Fallible [`dependent`](Self::dependent): stops at the first error.
    pub fn try_dependent<U, E, F>(&self, mut f: F) -> Result<Distribution<U>, E>
    where
        U: Clone + PartialEq,
        F: FnMut(&T) -> Result<Distribution<U>, E>,
    {
        let mut out = Distribution::empty();
        for (outcome, mass) in &self.entries {
            match outcome {
                Outcome::Valid(value) => {
                    for (inner, inner_mass) in f(value)?.entries {
                        out.insert(inner, mass * inner_mass);
                    }
                }
                Outcome::Invalid => out.insert(Outcome::Invalid, *mass),
            }
        }
        Ok(out)
    }

    /// Bind restricted to an observed event.
    ///
    /// Outcomes satisfying `event` continue through `f`; the mass of all
    /// others moves to the invalid bucket.
    pub fn event_dependent<U, P, F>(&self, event: P, mut f: F) -> Distribution<U>
    where
        U: Clone + PartialEq,
        P: Fn(&T) -> bool,
        F: FnMut(&T) -> Distribution<U>,
    {
        self.dependent(|value| {
            if event(value) {
                f(value)
            } else {
                Distribution::invalid()
            }
        })
    }

    /// Relabel every valid outcome.
    pub fn map<U, F>(&self, mut f: F) -> Distribution<U>
    where
        U: Clone + PartialEq,
        F: FnMut(&T) -> U,
    {
        self.dependent(|value| Distribution::point(f(value)))
    }

    /// Relabel outcomes, sending those mapped to `None` to the invalid bucket.
    pub fn filter_map<U, F>(&self, mut f: F) -> Distribution<U>
    where
        U: Clone + PartialEq,
        F: FnMut(&T) -> Option<U>,
    {
        self.dependent(|value| match f(value) {
            Some(mapped) => Distribution::point(mapped),
            None => Distribution::invalid(),
        })
    }

    /// Drop the invalid bucket and rescale valid masses to sum to 1.
    ///
    /// # Errors
    ///
    /// [`ProbError::ZeroMass`] if no (finite, positive) valid mass remains.
    pub fn normalize(&self) -> Result<Self, ProbError> {
        let total = self.valid_mass();
        if !(total > 0.0 && total.is_finite()) {
            return Err(ProbError::ZeroMass);
        }
        Ok(Self {
            entries: self
                .entries
                .iter()
                .filter(|(outcome, _)| !outcome.is_invalid())
                .map(|(outcome, mass)| (outcome.clone(), mass / total))
                .collect(),
        })
    }

    /// Mass of a single outcome (0 if absent).
    pub fn probability(&self, value: &T) -> f64 {
        self.iter()
            .filter(|(candidate, _)| *candidate == value)
            .map(|(_, mass)| mass)
            .sum()
    }

    /// Total variation distance: `½ Σ |p(x) − q(x)|` over the union of valid
    /// outcomes. Outcomes missing on one side count as zero mass there.
    pub fn distance_from(&self, other: &Self) -> f64 {
        let shared: f64 = self
            .iter()
            .map(|(value, mass)| (mass - other.probability(value)).abs())
            .sum();
        let only_other: f64 = other
            .iter()
            .filter(|(value, _)| !self.outcomes().any(|mine| mine == *value))
            .map(|(_, mass)| mass)
            .sum();
        0.5 * (shared + only_other)
    }

    /// Raise every valid mass below `floor` to `floor`.
    ///
    /// Keeps zero-likelihood evidence from collapsing later products to zero.
    pub fn adjust_minimums(&self, floor: f64) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(outcome, mass)| match outcome {
                    Outcome::Valid(_) if *mass < floor => (outcome.clone(), floor),
                    _ => (outcome.clone(), *mass),
                })
                .collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Distribution<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (value, mass) in self.iter() {
            writeln!(f, "{}: {:.6}", value, mass)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct EntryRef<'a, T> {
    outcome: &'a T,
    probability: f64,
}

impl<T: Serialize> Serialize for Distribution<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.iter()
                .map(|(outcome, probability)| EntryRef {
                    outcome,
                    probability,
                }),
        )
    }
}
