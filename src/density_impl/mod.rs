//! Electron density from occupied orbitals
//!
//! The density is split into a bound part, built from the occupied bound
//! orbitals, and an unbound part describing the continuum electrons.
//!
//! # Bound density
//!
//! ρ_b(r) = Σ_{l,n} occ_{nl} |R_{nl}(r)|²,   R_{nl}(r) = e^{-x/2} P_{nl}(x)
//!
//! where occ already carries the (2l+1) degeneracy.
//!
//! # Unbound density (ideal approximation)
//!
//! ρ_ub = nele / (√2 π²) · I_{1/2}(μ, β), uniform over the cavity.

mod density;

pub use density::Density;

use crate::stats_impl::Statistics;
use std::f64::consts::PI;

/// Uniform free-electron density for one spin channel with `nele` target electrons.
pub fn ideal_unbound_density<S: Statistics + ?Sized>(
    stats: &S,
    nele: f64,
    mu: f64,
    beta: f64,
) -> f64 {
    let prefac = nele / (2.0f64.sqrt() * PI * PI);
    prefac * stats.fd_int_complete(mu, beta, 0.5)
}
