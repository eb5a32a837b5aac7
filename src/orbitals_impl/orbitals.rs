//! Orbital state and occupation engine

use super::OrbitalStage;
use crate::density_impl::ideal_unbound_density;
use crate::error::{AvAtomError, Result};
use crate::session::{Session, UnboundTreatment};
use crate::solver_impl::Eigensolver;
use crate::stats_impl::{RootSearch, Statistics};
use ndarray::{Array1, Array2, Array3, Array4, ArrayView1, ArrayView2, Axis};
use tracing::{debug, info, warn};

#[derive(Clone, Debug)]
pub struct Orbitals {
    /// P(x) on the grid, `[spin, l, n, grid]`
    pub eigfuncs: Array4<f64>,
    /// `[spin, l, n]`, ascending in n
    pub eigvals: Array3<f64>,
    /// Degeneracy-weighted occupations, `(2l+1) f(ε)` for bound states
    pub occnums: Array3<f64>,
    /// `2l+1` for bound states, 0 otherwise
    pub lbound: Array3<f64>,
    stage: OrbitalStage,
}

impl Orbitals {
    pub fn new(session: &Session) -> Self {
        let shape = (session.spindims, session.lmax, session.nmax);
        Orbitals {
            eigfuncs: Array4::zeros((shape.0, shape.1, shape.2, session.ngrid())),
            eigvals: Array3::zeros(shape),
            occnums: Array3::zeros(shape),
            lbound: Array3::zeros(shape),
            stage: OrbitalStage::Uninitialized,
        }
    }

    pub fn stage(&self) -> OrbitalStage {
        self.stage
    }

    /// Solve the bare nuclear potential V(r) = -Z/r to seed an SCF cycle.
    ///
    /// Resets the chemical potential to zero in every spin channel. A
    /// non-positive `nuclear_charge` has no bound states and is left to the
    /// caller to avoid.
    pub fn initialize<E: Eigensolver + ?Sized>(
        &mut self,
        session: &mut Session,
        solver: &E,
        nuclear_charge: f64,
    ) -> Result<()> {
        let v_row = session.grid.xgrid().mapv(|x| -nuclear_charge * (-x).exp());
        let mut v_en = Array2::<f64>::zeros((session.spindims, session.ngrid()));
        for mut row in v_en.axis_iter_mut(Axis(0)) {
            row.assign(&v_row);
        }

        info!("Solving bare Coulomb potential for Z = {}", nuclear_charge);
        self.solve(session, solver, v_en.view())?;
        session.reset_chemical_potential();
        Ok(())
    }

    /// Re-solve for a new effective potential of shape `[spindims, ngrid]`.
    pub fn solve<E: Eigensolver + ?Sized>(
        &mut self,
        session: &Session,
        solver: &E,
        potential: ArrayView2<'_, f64>,
    ) -> Result<()> {
        let expected = (session.spindims, session.ngrid());
        if potential.dim() != expected {
            return Err(AvAtomError::Configuration(format!(
                "potential shape {:?} does not match [spindims, ngrid] = {:?}",
                potential.dim(),
                expected
            )));
        }

        let states = solver.solve(potential, &session.grid, session.lmax, session.nmax)?;
        if states.eigvals.dim() != self.eigvals.dim()
            || states.eigfuncs.dim() != self.eigfuncs.dim()
        {
            return Err(AvAtomError::Configuration(format!(
                "eigensolver returned shape {:?}, expected {:?}",
                states.eigvals.dim(),
                self.eigvals.dim()
            )));
        }

        self.eigfuncs = states.eigfuncs;
        self.eigvals = states.eigvals;
        self.make_lbound();
        self.occnums.fill(0.0);
        self.stage = OrbitalStage::Solved;

        debug!(
            "{} bound states across all channels",
            self.lbound.iter().filter(|&&w| w > 0.0).count()
        );
        Ok(())
    }

    /// lbound[s, l, n] = (2l+1) Θ(-ε[s, l, n])
    pub fn make_lbound(&mut self) {
        for (l, mut block) in self.lbound.axis_iter_mut(Axis(1)).enumerate() {
            let degeneracy = 2.0 * l as f64 + 1.0;
            let eigvals = self.eigvals.index_axis(Axis(1), l);
            block.zip_mut_with(&eigvals, |w, &e| {
                *w = if e < 0.0 { degeneracy } else { 0.0 };
            });
        }
    }

    /// Find the chemical potential for each spin channel and fill the
    /// occupation numbers with Fermi-Dirac statistics.
    ///
    /// Nothing is written unless every channel converges.
    pub fn occupy<S: Statistics + ?Sized>(
        &mut self,
        session: &mut Session,
        stats: &S,
    ) -> Result<()> {
        if self.stage == OrbitalStage::Uninitialized {
            return Err(AvAtomError::PreconditionViolation(
                "occupy() called before the orbitals were solved".to_string(),
            ));
        }
        if session.unbound != UnboundTreatment::Ideal {
            return Err(AvAtomError::Configuration(format!(
                "unbound treatment '{}' is not implemented",
                session.unbound
            )));
        }

        let mu = self.chem_pot(session, stats)?;
        self.occnums = self.calc_occnums(session, stats, mu.view());
        session.mu = mu;
        self.stage = OrbitalStage::Occupied;

        for s in 0..session.spindims {
            info!(
                "spin {}: mu = {:.8} Ha, bound occupation = {:.8}",
                s,
                session.mu[s],
                self.occnums.index_axis(Axis(0), s).sum()
            );
        }
        Ok(())
    }

    /// Chemical potential per spin satisfying
    /// Σ lbound f(ε; μ) + N_unbound(μ) = nele.
    fn chem_pot<S: Statistics + ?Sized>(&self, session: &Session, stats: &S) -> Result<Array1<f64>> {
        let mut mu = session.mu.clone();

        for s in 0..session.spindims {
            let target = session.nele[s];
            if target == 0.0 {
                continue;
            }

            let eigvals = self.eigvals.index_axis(Axis(0), s);
            let lbound = self.lbound.index_axis(Axis(0), s);
            let beta = session.beta;
            let volume = session.cavity_volume;

            let electron_count = |trial: f64| -> f64 {
                let bound: f64 = lbound
                    .iter()
                    .zip(eigvals.iter())
                    .map(|(&w, &e)| w * stats.fermi_dirac(e, trial, beta))
                    .sum();
                let unbound = ideal_unbound_density(stats, target, trial, beta) * volume;
                bound + unbound
            };

            let search = RootSearch {
                guess: mu[s],
                tolerance: session.numconv,
                max_iter: session.max_iter,
            };
            mu[s] = stats
                .find_chemical_potential(&electron_count, target, search)
                .map_err(|failure| {
                    warn!("chemical potential search failed for spin {}: {}", s, failure);
                    AvAtomError::ConvergenceFailure {
                        spin: s,
                        iterations: failure.iterations,
                        residual: failure.residual,
                    }
                })?;
        }

        Ok(mu)
    }

    /// Occupation numbers for a given chemical potential; zero for empty spin channels.
    pub fn calc_occnums<S: Statistics + ?Sized>(
        &self,
        session: &Session,
        stats: &S,
        mu: ArrayView1<'_, f64>,
    ) -> Array3<f64> {
        let mut occnums = Array3::zeros(self.eigvals.dim());

        for s in 0..session.spindims {
            if session.nele[s] == 0.0 {
                continue;
            }
            let mut block = occnums.index_axis_mut(Axis(0), s);
            let eigvals = self.eigvals.index_axis(Axis(0), s);
            let lbound = self.lbound.index_axis(Axis(0), s);
            ndarray::Zip::from(&mut block)
                .and(&lbound)
                .and(&eigvals)
                .for_each(|occ, &w, &e| {
                    *occ = w * stats.fermi_dirac(e, mu[s], session.beta);
                });
        }

        occnums
    }
}
