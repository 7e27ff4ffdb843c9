//! Error types for distribution operations.

use thiserror::Error;

/// Errors raised by distribution construction and composition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbError {
    /// Uniform (or weighted) distribution over no outcomes.
    #[error("Distribution domain cannot be empty")]
    EmptyDomain,

    /// Every supplied count or weight is zero.
    #[error("Cannot build a distribution: all counts are zero")]
    DegenerateDistribution,

    /// Normalization found no valid mass left.
    #[error("Cannot normalize: no valid probability mass remains")]
    ZeroMass,

    /// A probability outside [0, 1] or a negative/non-finite weight.
    #[error("Invalid probability or weight: {value}")]
    InvalidProbability { value: f64 },
}
