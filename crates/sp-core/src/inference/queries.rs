//! Derived probability queries: prior, likelihood and Bayes updates.
//!
//! Every knowledge base gets these for free through the blanket
//! [`ProbabilityQueries`] implementation.
//!
//! `posterior_given_words` folds single-word updates left to right. Under
//! exact arithmetic word order does not matter; in floating point the
//! intermediate normalizations may round differently for different orders.

use crate::dist::{Distribution, ProbError};
use crate::knowledge::KnowledgeBase;

/// Bayesian queries derived from word/category counts.
pub trait ProbabilityQueries: KnowledgeBase {
    /// P(category), proportional to message counts.
    fn prior_over_categories(&self) -> Result<Distribution<Self::Category>, ProbError> {
        let categories = self.categories();
        let counts: Vec<u64> = categories.iter().map(|c| self.message_count(c)).collect();
        Distribution::enum_dist(categories, counts)
    }

    /// Uniform distribution over the categories.
    fn uniform_over_categories(&self) -> Result<Distribution<Self::Category>, ProbError> {
        Distribution::uniform(self.categories())
    }

    /// P(word present | category) as a true/false distribution.
    ///
    /// A category without messages has likelihood 0.
    fn likelihood(&self, word: &str, category: &Self::Category) -> Result<Distribution<bool>, ProbError> {
        let total = self.message_count(category);
        let p = if total == 0 {
            0.0
        } else {
            self.word_count(word, category) as f64 / total as f64
        };
        Distribution::choose(p, true, false)
    }

    /// P(category | word) ∝ P(word | category) · P(category).
    fn posterior_given_word(
        &self,
        word: &str,
        prior: &Distribution<Self::Category>,
    ) -> Result<Distribution<Self::Category>, ProbError> {
        prior
            .try_dependent(|category| {
                let observed = self
                    .likelihood(word, category)?
                    .event_dependent(|present| *present, |_| Distribution::point(category.clone()));
                Ok::<_, ProbError>(observed)
            })?
            .normalize()
    }

    /// P(category | w1, w2, ...) by iterated single-word updates.
    fn posterior_given_words<S: AsRef<str>>(
        &self,
        words: &[S],
        prior: &Distribution<Self::Category>,
    ) -> Result<Distribution<Self::Category>, ProbError> {
        words.iter().try_fold(prior.clone(), |belief, word| {
            self.posterior_given_word(word.as_ref(), &belief)
        })
    }
}

impl<K: KnowledgeBase + ?Sized> ProbabilityQueries for K {}
