//! Core math modules.

pub mod chi_square;
pub mod gamma;
pub mod stable;
