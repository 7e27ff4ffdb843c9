//! Combination strategies.
//!
//! A strategy turns the selected per-word distributions, a prior over the
//! categories, the requested classifier count and the raw query words into a
//! final distribution over categories. Strategies are pure: they never mutate
//! their inputs and hold no state, so one instance can serve any number of
//! classifiers.

mod fisher;
mod naive_bayes;

pub use fisher::Fisher;
pub use naive_bayes::NaiveBayes;

use std::fmt;

use sp_config::StrategyName;

use crate::dist::{Distribution, ProbError};

/// Combines per-word evidence into a distribution over categories.
pub trait Strategy<C>: fmt::Debug + Send + Sync {
    /// Stable name used in logs and reports.
    fn name(&self) -> StrategyName;

    /// Combine `classifiers` under `prior`.
    ///
    /// `n` is the classifier count the caller asked for (at least
    /// `classifiers.len()`); `words` is the unfiltered query.
    fn combine(
        &self,
        classifiers: &[&Distribution<C>],
        prior: &Distribution<C>,
        n: usize,
        words: &[&str],
    ) -> Result<Distribution<C>, ProbError>;
}

/// Build the strategy registered under `name`.
pub fn strategy_for<C>(name: StrategyName) -> Box<dyn Strategy<C>>
where
    C: Clone + PartialEq + 'static,
{
    match name {
        StrategyName::NaiveBayes => Box::new(NaiveBayes),
        StrategyName::Fisher => Box::new(Fisher),
    }
}
