//! Fisher's-method combination.
//!
//! The naive-Bayes posterior is the hypothesis. Each category probability `p`
//! becomes the statistic `-2 ln p`, whose chi-square upper tail (with one
//! half-degree of freedom per classifier used) measures how surprising the
//! category is. A category scores the summed "non-surprise" `1 - tail` of all
//! the other categories.
//!
//! Scores are a ranking, not probabilities: the result is left unnormalized.

use tracing::trace;

use sp_config::StrategyName;
use sp_math::{fisher_statistic, inverse_chi_square};

use super::{NaiveBayes, Strategy};
use crate::dist::{Distribution, ProbError};

/// Inverse chi-square ranking over the naive-Bayes hypothesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fisher;

impl Fisher {
    /// Upper tail for every category of `hypothesis`, in its order.
    pub fn tails<C: Clone>(hypothesis: &Distribution<C>, half_dof: usize) -> Vec<(C, f64)> {
        hypothesis
            .iter()
            .map(|(category, p)| {
                (category.clone(), inverse_chi_square(fisher_statistic(p), half_dof))
            })
            .collect()
    }
}

impl<C: Clone + PartialEq> Strategy<C> for Fisher {
    fn name(&self) -> StrategyName {
        StrategyName::Fisher
    }

    fn combine(
        &self,
        classifiers: &[&Distribution<C>],
        prior: &Distribution<C>,
        _n: usize,
        _words: &[&str],
    ) -> Result<Distribution<C>, ProbError> {
        let hypothesis = NaiveBayes.posterior(classifiers, prior)?;
        let tails = Self::tails(&hypothesis, classifiers.len());

        let scores = tails.iter().enumerate().map(|(i, (category, _))| {
            let score: f64 = tails
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, (_, tail))| 1.0 - tail)
                .sum();
            (category.clone(), score)
        });
        let result = Distribution::from_scores(scores);

        trace!(
            half_dof = classifiers.len(),
            categories = result.len(),
            "fisher scores computed"
        );
        Ok(result)
    }
}
