//! Per-word classifiers and the classification orchestrator.
//!
//! At construction every known word gets a [`WordClassifier`]: its
//! uniform-prior posterior over categories (smoothed with
//! [`Distribution::adjust_minimums`]) and an informativeness score, the total
//! variation distance of that posterior from the uniform distribution.
//!
//! A query keeps the words that have a classifier, orders them by score,
//! takes the first `n` and hands their distributions to the configured
//! [`Strategy`] together with the prior.

use std::collections::HashMap;

use tracing::debug;

use sp_config::{SelectionOrder, Smoothing, StrategyName};

use crate::dist::{Distribution, ProbError};
use crate::inference::ProbabilityQueries;
use crate::knowledge::KnowledgeBase;
use crate::strategy::Strategy;

pub use sp_config::DEFAULT_TOP_N;

/// Evidence contributed by one known word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordClassifier<C> {
    /// Distance of the word's uniform-prior posterior from uniform.
    pub score: f64,
    /// Smoothed P_uniform(category | word).
    pub distribution: Distribution<C>,
}

/// Construction-time knobs for a [`Classifier`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifierOptions {
    pub smoothing: Smoothing,
    pub selection: SelectionOrder,
}

/// Word-evidence classifier over a knowledge base.
pub struct Classifier<K: KnowledgeBase> {
    knowledge: K,
    strategy: Box<dyn Strategy<K::Category>>,
    table: HashMap<String, WordClassifier<K::Category>>,
    /// Words with a classifier, in the knowledge base's order.
    words: Vec<String>,
    prior: Distribution<K::Category>,
    selection: SelectionOrder,
    floor: f64,
}

impl<K: KnowledgeBase> Classifier<K> {
    /// Build a classifier with default smoothing and selection order.
    pub fn new(knowledge: K, strategy: Box<dyn Strategy<K::Category>>) -> Result<Self, ProbError> {
        Self::with_options(knowledge, strategy, ClassifierOptions::default())
    }

    /// Build a classifier, computing every per-word classifier up front.
    pub fn with_options(
        knowledge: K,
        strategy: Box<dyn Strategy<K::Category>>,
        options: ClassifierOptions,
    ) -> Result<Self, ProbError> {
        let categories = knowledge.categories();
        let uniform = knowledge.uniform_over_categories()?;
        let prior = knowledge.prior_over_categories()?;
        let floor = options
            .smoothing
            .floor(knowledge.total_messages(), categories.len());

        let known: Vec<String> = knowledge
            .known_words()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let mut table = HashMap::with_capacity(known.len());
        let mut words = Vec::with_capacity(known.len());
        for word in known {
            let posterior = match knowledge.posterior_given_word(&word, &uniform) {
                Ok(posterior) => posterior,
                Err(ProbError::ZeroMass) => {
                    debug!(word = %word, "word never observed, no classifier built");
                    continue;
                }
                Err(err) => return Err(err),
            };
            let classifier = WordClassifier {
                score: posterior.distance_from(&uniform),
                distribution: posterior.adjust_minimums(floor),
            };
            table.insert(word.clone(), classifier);
            words.push(word);
        }

        debug!(
            strategy = %strategy.name(),
            classifiers = table.len(),
            categories = categories.len(),
            floor,
            selection = %options.selection,
            "word classifier table built"
        );

        Ok(Classifier {
            knowledge,
            strategy,
            table,
            words,
            prior,
            selection: options.selection,
            floor,
        })
    }

    pub fn knowledge(&self) -> &K {
        &self.knowledge
    }

    /// Prior over categories derived from message counts.
    pub fn prior(&self) -> &Distribution<K::Category> {
        &self.prior
    }

    pub fn strategy_name(&self) -> StrategyName {
        self.strategy.name()
    }

    pub fn selection(&self) -> SelectionOrder {
        self.selection
    }

    /// Smoothing floor applied to the per-word distributions.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Informativeness score of `word`, if it has a classifier.
    pub fn informativeness(&self, word: &str) -> Option<f64> {
        self.table.get(word).map(|c| c.score)
    }

    pub fn word_classifier(&self, word: &str) -> Option<&WordClassifier<K::Category>> {
        self.table.get(word)
    }

    /// Every per-word classifier in knowledge-base order.
    pub fn word_classifiers(&self) -> impl Iterator<Item = (&str, &WordClassifier<K::Category>)> + '_ {
        self.words
            .iter()
            .filter_map(|word| self.table.get(word).map(|c| (word.as_str(), c)))
    }

    /// All per-word classifiers ordered by score in the given direction.
    pub fn ranked_words(&self, order: SelectionOrder) -> Vec<(&str, &WordClassifier<K::Category>)> {
        let mut ranked: Vec<_> = self.word_classifiers().collect();
        sort_by_score(&mut ranked, order);
        ranked
    }

    /// The classifiers a query of `words` would feed to the strategy.
    ///
    /// Unknown words are dropped; duplicates are kept. The sort is stable, so
    /// equal scores keep their query order.
    pub fn select<'w, S: AsRef<str>>(
        &self,
        words: &'w [S],
        n: usize,
    ) -> Vec<(&'w str, &WordClassifier<K::Category>)> {
        let mut found: Vec<(&'w str, &WordClassifier<K::Category>)> = words
            .iter()
            .filter_map(|word| {
                let word: &'w str = word.as_ref();
                self.table.get(word).map(|c| (word, c))
            })
            .collect();
        sort_by_score(&mut found, self.selection);
        found.truncate(n);
        found
    }

    /// P(category | words) under the knowledge base's own prior.
    pub fn posterior_over_categories<S: AsRef<str>>(
        &self,
        words: &[S],
        n: usize,
    ) -> Result<Distribution<K::Category>, ProbError> {
        self.posterior_over_categories_with_prior(words, n, &self.prior)
    }

    /// P(category | words) under a caller-supplied prior.
    pub fn posterior_over_categories_with_prior<S: AsRef<str>>(
        &self,
        words: &[S],
        n: usize,
        prior: &Distribution<K::Category>,
    ) -> Result<Distribution<K::Category>, ProbError> {
        let selected = self.select(words, n);
        let distributions: Vec<&Distribution<K::Category>> =
            selected.iter().map(|(_, c)| &c.distribution).collect();
        let query: Vec<&str> = words.iter().map(AsRef::as_ref).collect();

        debug!(
            strategy = %self.strategy.name(),
            words = query.len(),
            selected = ?selected.iter().map(|(w, _)| *w).collect::<Vec<_>>(),
            n,
            "classifiers selected"
        );

        let result = self.strategy.combine(&distributions, prior, n, &query)?;
        debug!(
            most_probable = ?result.most_probable(),
            "strategy result"
        );
        Ok(result)
    }

    /// Most probable category for `words`, using at most `n` classifiers.
    ///
    /// `None` only when the combined distribution has no valid outcome.
    pub fn classify<S: AsRef<str>>(
        &self,
        words: &[S],
        n: usize,
    ) -> Result<Option<K::Category>, ProbError> {
        let posterior = self.posterior_over_categories(words, n)?;
        Ok(posterior.most_probable().cloned())
    }
}

fn sort_by_score<W, C>(entries: &mut [(W, &WordClassifier<C>)], order: SelectionOrder) {
    match order {
        SelectionOrder::LeastInformative => {
            entries.sort_by(|(_, a), (_, b)| a.score.total_cmp(&b.score))
        }
        SelectionOrder::MostInformative => {
            entries.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score))
        }
    }
}
