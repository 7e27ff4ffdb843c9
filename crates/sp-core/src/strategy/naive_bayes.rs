//! Naive-Bayes combination.
//!
//! Each per-word classifier is a smoothed P_uniform(category | word). Every
//! classifier is first weighted by the prior with a tagging bind: category `t`
//! keeps its mass only where the classifier also lands on `t`, everything else
//! goes to the invalid bucket. The weighted classifiers are then reduced
//! pairwise with the same tagging bind and normalized once, so the joint mass
//! of `t` is `P(t)^k * prod P_uniform(t | w_i)` for `k` classifiers.

use tracing::trace;

use sp_config::StrategyName;

use super::Strategy;
use crate::dist::{Distribution, ProbError};

/// Product-of-evidence combiner, normalized once.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveBayes;

/// Keep the mass of `belief` only where `evidence` agrees on the category.
fn tag_matching<C: Clone + PartialEq>(
    belief: &Distribution<C>,
    evidence: &Distribution<C>,
) -> Distribution<C> {
    belief.dependent(|category| {
        evidence.filter_map(|candidate| (candidate == category).then(|| category.clone()))
    })
}

impl NaiveBayes {
    /// Weight each classifier by `prior`, reduce pairwise and normalize.
    ///
    /// With no classifiers the result is the normalized prior.
    pub fn posterior<C: Clone + PartialEq>(
        &self,
        classifiers: &[&Distribution<C>],
        prior: &Distribution<C>,
    ) -> Result<Distribution<C>, ProbError> {
        let mut weighted = classifiers
            .iter()
            .map(|classifier| tag_matching(prior, classifier));

        let Some(first) = weighted.next() else {
            return prior.normalize();
        };
        let joint = weighted.fold(first, |acc, next| tag_matching(&acc, &next));

        trace!(
            classifiers = classifiers.len(),
            invalid_mass = joint.invalid_mass(),
            "naive bayes joint computed"
        );
        joint.normalize()
    }
}

impl<C: Clone + PartialEq> Strategy<C> for NaiveBayes {
    fn name(&self) -> StrategyName {
        StrategyName::NaiveBayes
    }

    fn combine(
        &self,
        classifiers: &[&Distribution<C>],
        prior: &Distribution<C>,
        _n: usize,
        _words: &[&str],
    ) -> Result<Distribution<C>, ProbError> {
        self.posterior(classifiers, prior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn no_classifiers_returns_normalized_prior() {
        let prior = Distribution::from_scores([("spam", 3.0), ("ham", 1.0)]);
        let result = NaiveBayes.posterior::<&str>(&[], &prior).unwrap();
        assert!((result.probability(&"spam") - 0.75).abs() < TOL);
        assert!((result.probability(&"ham") - 0.25).abs() < TOL);
    }

    #[test]
    fn product_of_evidence() {
        let prior = Distribution::uniform(["spam", "ham"]).unwrap();
        let a = Distribution::choose(0.8, "spam", "ham").unwrap();
        let b = Distribution::choose(0.6, "spam", "ham").unwrap();
        let result = NaiveBayes.posterior(&[&a, &b], &prior).unwrap();

        let spam = 0.5 * 0.8 * 0.6;
        let ham = 0.5 * 0.2 * 0.4;
        assert!((result.probability(&"spam") - spam / (spam + ham)).abs() < TOL);
        assert_eq!(result.invalid_mass(), 0.0);
    }

    #[test]
    fn prior_weights_every_classifier() {
        let prior = Distribution::from_scores([("spam", 0.75), ("ham", 0.25)]);
        let a = Distribution::choose(0.8, "spam", "ham").unwrap();
        let b = Distribution::choose(0.6, "spam", "ham").unwrap();
        let result = NaiveBayes.posterior(&[&a, &b], &prior).unwrap();

        let spam = 0.75 * 0.8 * 0.75 * 0.6;
        let ham = 0.25 * 0.2 * 0.25 * 0.4;
        assert!((result.probability(&"spam") - spam / (spam + ham)).abs() < TOL);
    }

    #[test]
    fn single_classifier_is_bayes_rule() {
        let prior = Distribution::from_scores([("spam", 0.75), ("ham", 0.25)]);
        let a = Distribution::choose(0.8, "spam", "ham").unwrap();
        let result = NaiveBayes.posterior(&[&a], &prior).unwrap();
        let spam = 0.75 * 0.8;
        assert!((result.probability(&"spam") - spam / (spam + 0.25 * 0.2)).abs() < TOL);
    }

    #[test]
    fn order_of_classifiers_is_irrelevant() {
        let prior = Distribution::enum_dist(["a", "b", "c"], [5, 3, 2]).unwrap();
        let x = Distribution::from_weights([("a", 0.2), ("b", 0.5), ("c", 0.3)]).unwrap();
        let y = Distribution::from_weights([("a", 0.7), ("b", 0.1), ("c", 0.2)]).unwrap();

        let forward = NaiveBayes.posterior(&[&x, &y], &prior).unwrap();
        let backward = NaiveBayes.posterior(&[&y, &x], &prior).unwrap();
        assert!(forward.distance_from(&backward) < 1e-12);
    }

    #[test]
    fn contradicting_certain_evidence_is_zero_mass() {
        let prior = Distribution::uniform(["spam", "ham"]).unwrap();
        let only_spam = Distribution::point("spam");
        let only_ham = Distribution::point("ham");
        assert_eq!(
            NaiveBayes.posterior(&[&only_spam, &only_ham], &prior),
            Err(ProbError::ZeroMass)
        );
    }
}
