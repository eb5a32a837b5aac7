//! Kohn-Sham orbitals and their finite-temperature occupations
//!
//! [`Orbitals`] holds the eigenfunctions, eigenvalues, boundedness mask and
//! occupation numbers for every (spin, l, n) channel, and walks through the
//! stages `Uninitialized -> Solved -> Occupied` as the pipeline runs.

mod orbitals;

pub use orbitals::Orbitals;

/// Progress of the orbitals through one SCF iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitalStage {
    Uninitialized,
    /// Eigenfunctions, eigenvalues and lbound are current
    Solved,
    /// Chemical potential and occupation numbers are current
    Occupied,
}
