//! spamplan core library
//!
//! This library provides:
//! - A discrete distribution type with an explicit invalid bucket
//! - The knowledge-base interface and an in-memory word table
//! - Bayesian probability queries over any knowledge base
//! - Per-word classifiers and the classification orchestrator
//! - Naive-Bayes and Fisher's-method combination strategies
//! - Configuration loading, structured logging, exit codes and report output
//!
//! The binary entry point is in `main.rs`.

pub mod classify;
pub mod config;
pub mod dist;
pub mod exit_codes;
pub mod inference;
pub mod knowledge;
pub mod logging;
pub mod output;
pub mod strategy;

pub use classify::{Classifier, ClassifierOptions, WordClassifier, DEFAULT_TOP_N};
pub use dist::{Distribution, Outcome, ProbError};
pub use inference::ProbabilityQueries;
pub use knowledge::{KnowledgeBase, WordTable};
pub use strategy::{strategy_for, Fisher, NaiveBayes, Strategy};
