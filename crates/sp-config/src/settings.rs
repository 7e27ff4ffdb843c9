//! Classifier settings (classifier.json).

use serde::{Deserialize, Serialize};

/// Default number of per-word classifiers combined per query.
pub const DEFAULT_TOP_N: usize = 15;

/// Complete classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    pub schema_version: String,

    #[serde(default)]
    pub strategy: StrategyName,

    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub smoothing: Smoothing,

    #[serde(default)]
    pub selection: SelectionOrder,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        ClassifierSettings {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            strategy: StrategyName::default(),
            top_n: DEFAULT_TOP_N,
            smoothing: Smoothing::default(),
            selection: SelectionOrder::default(),
        }
    }
}

/// Combination strategy applied to the selected per-word classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    /// Product of likelihoods, normalized once.
    #[default]
    NaiveBayes,
    /// Fisher's inverse chi-square ranking.
    Fisher,
}

impl std::str::FromStr for StrategyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "naive_bayes" | "bayes" | "bayesian" => Ok(StrategyName::NaiveBayes),
            "fisher" => Ok(StrategyName::Fisher),
            _ => Err(format!("unknown strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for StrategyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyName::NaiveBayes => write!(f, "naive_bayes"),
            StrategyName::Fisher => write!(f, "fisher"),
        }
    }
}

/// Floor applied to zero-mass entries of per-word distributions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Smoothing {
    /// 1 / (total messages + number of categories).
    #[default]
    Laplace,
    /// A fixed epsilon in (0, 1).
    Fixed { epsilon: f64 },
}

impl Smoothing {
    /// Resolve the floor for a knowledge base of the given size.
    pub fn floor(&self, total_messages: u64, category_count: usize) -> f64 {
        match self {
            Smoothing::Laplace => 1.0 / (total_messages as f64 + category_count as f64),
            Smoothing::Fixed { epsilon } => *epsilon,
        }
    }
}

/// Which end of the informativeness ranking feeds the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Ascending score: the reference classifier's selection.
    #[default]
    LeastInformative,
    /// Descending score.
    MostInformative,
}

impl std::str::FromStr for SelectionOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "least_informative" | "least" | "ascending" => Ok(SelectionOrder::LeastInformative),
            "most_informative" | "most" | "descending" => Ok(SelectionOrder::MostInformative),
            _ => Err(format!("unknown selection order: {}", s)),
        }
    }
}

impl std::fmt::Display for SelectionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionOrder::LeastInformative => write!(f, "least_informative"),
            SelectionOrder::MostInformative => write!(f, "most_informative"),
        }
    }
}
