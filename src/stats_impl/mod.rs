//! Finite-temperature statistics
//!
//! The occupation engine and the density builder only need three things from
//! a statistics backend: the Fermi-Dirac weight, the complete Fermi-Dirac
//! integral, and a monotone root-find for the chemical potential. They are
//! collected in the [`Statistics`] trait so an alternative numerical backend
//! can be dropped in.
//!
//! # Conventions
//!
//! f(ε; μ, β) = 1 / (exp(β(ε - μ)) + 1)
//!
//! I_j(μ, β) = ∫_0^∞ ε^j f(ε; μ, β) dε

mod fermi;

pub use fermi::FermiDirac;

use std::fmt;

/// Bracketing and stopping parameters for the chemical-potential search.
#[derive(Clone, Copy, Debug)]
pub struct RootSearch {
    /// Starting guess (usually the previous iteration's value)
    pub guess: f64,
    /// Accepted absolute error on the electron count
    pub tolerance: f64,
    pub max_iter: usize,
}

/// The root-find exhausted its iteration budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NonConvergence {
    pub iterations: usize,
    pub residual: f64,
}

impl fmt::Display for NonConvergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no root after {} iterations (residual {:.3e})",
            self.iterations, self.residual
        )
    }
}

pub trait Statistics {
    /// Fermi-Dirac occupation of a level at energy `eps`.
    fn fermi_dirac(&self, eps: f64, mu: f64, beta: f64) -> f64;

    /// Complete Fermi-Dirac integral I_order(μ, β); `order` must be at least -1/2.
    fn fd_int_complete(&self, mu: f64, beta: f64, order: f64) -> f64;

    /// Find μ such that `electron_count(μ) == target` within `search.tolerance`.
    ///
    /// `electron_count` must be non-decreasing in μ.
    fn find_chemical_potential(
        &self,
        electron_count: &dyn Fn(f64) -> f64,
        target: f64,
        search: RootSearch,
    ) -> std::result::Result<f64, NonConvergence>;
}
