//! Numerical kernels for spamplan.

pub mod math;

pub use math::chi_square::*;
pub use math::gamma::*;
pub use math::stable::*;
