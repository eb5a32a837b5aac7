//! Radial eigensolvers
//!
//! An [`Eigensolver`] turns a potential sampled on the logarithmic grid into
//! eigenfunctions and eigenvalues for every (spin, l, n) channel. The pipeline
//! depends only on the trait; [`MatrixSolver`] is the bundled backend.
//!
//! # Conventions
//!
//! Eigenfunctions are the transformed radial functions P(x) with
//! R(r) = exp(-x/2) P(x), normalised so that ∫ P² e^{2x} dx = ∫ R² r² dr = 1.
//! Within each (spin, l) block the eigenvalues are ascending in n.

mod matrix;
#[cfg(test)]
mod tests;

pub use matrix::MatrixSolver;

use crate::error::Result;
use crate::grid::LogGrid;
use ndarray::{Array3, Array4, ArrayView2};

/// Output of a solve: `eigfuncs[s, l, n, i]` and `eigvals[s, l, n]`.
#[derive(Clone, Debug)]
pub struct Eigenstates {
    pub eigfuncs: Array4<f64>,
    pub eigvals: Array3<f64>,
}

pub trait Eigensolver {
    /// Solve the radial problem for every spin row of `potential` (shape
    /// `[spindims, ngrid]`), for `l < lmax` and the lowest `nmax` states.
    fn solve(
        &self,
        potential: ArrayView2<'_, f64>,
        grid: &LogGrid,
        lmax: usize,
        nmax: usize,
    ) -> Result<Eigenstates>;
}
