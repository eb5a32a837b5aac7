//! Finite-temperature average-atom model
//!
//! A single ion sits in a spherical cavity of electrons. This crate solves the
//! radial Kohn-Sham problem on a logarithmic grid, fills the orbitals with
//! Fermi-Dirac occupations at fixed electron count, and builds the bound and
//! unbound electron densities.

pub mod density_impl;
pub mod error;
pub mod grid;
pub mod orbitals_impl;
pub mod pipeline;
pub mod session;
pub mod solver_impl;
pub mod stats_impl;

pub use density_impl::Density;
pub use error::{AvAtomError, Result};
pub use grid::LogGrid;
pub use orbitals_impl::{OrbitalStage, Orbitals};
pub use pipeline::run_step;
pub use session::{BoundaryCondition, Session, SessionParams, UnboundTreatment};
pub use solver_impl::{Eigensolver, Eigenstates, MatrixSolver};
pub use stats_impl::{FermiDirac, Statistics};
