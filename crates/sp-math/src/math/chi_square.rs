//! Chi-square tail helpers for Fisher's combined-probability test.
//!
//! Fisher's method turns a probability `p` into the statistic `-2 ln p`. Under
//! the null hypothesis the sum of `k` such statistics follows a chi-square
//! distribution with `2k` degrees of freedom, whose upper tail has a closed
//! form for even degrees of freedom:
//!
//! `Q(χ²; 2k) = e^(-χ²/2) · Σ_{i=0}^{k-1} (χ²/2)^i / i!`
//!
//! That finite sum is what [`inverse_chi_square`] evaluates.

use super::gamma::gamma_q;

/// Fisher statistic for a single probability: `-2 ln p`.
///
/// Returns +∞ for `p <= 0` and NaN for NaN input.
pub fn fisher_statistic(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::INFINITY;
    }
    -2.0 * p.ln()
}

/// Upper-tail probability of a chi-square variable with `2 * half_dof`
/// degrees of freedom at `chi`, clamped to at most 1.
///
/// Evaluated with the running-term recurrence `t *= (chi/2) / i` for
/// `i = 1 .. half_dof - 1`. A `half_dof` of zero keeps only the leading
/// `e^(-chi/2)` term.
///
/// An infinite `chi` (from `p = 0`) returns the limit 0 for every `half_dof`.
/// Running the recurrence there would compute `0 * inf = NaN` from the second
/// term on, and clamping that NaN would report a tail of 1; the limit keeps
/// the tail non-increasing in `chi`.
pub fn inverse_chi_square(chi: f64, half_dof: usize) -> f64 {
    if chi.is_nan() {
        return f64::NAN;
    }
    if chi == f64::INFINITY {
        return 0.0;
    }

    let m = 0.5 * chi;
    let mut term = (-m).exp();
    let mut sum = term;
    for i in 1..half_dof {
        term *= m / i as f64;
        sum += term;
    }

    sum.min(1.0)
}

/// Upper-tail probability of a chi-square distribution with arbitrary
/// (positive) degrees of freedom, via the regularized incomplete gamma.
pub fn chi_square_survival(chi: f64, dof: f64) -> f64 {
    if chi <= 0.0 {
        return 1.0;
    }
    gamma_q(0.5 * dof, 0.5 * chi)
}
