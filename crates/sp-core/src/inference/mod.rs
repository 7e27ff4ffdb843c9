//! Probability queries over a knowledge base.

pub mod queries;

pub use queries::ProbabilityQueries;
