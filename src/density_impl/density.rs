use super::ideal_unbound_density;
use crate::error::{AvAtomError, Result};
use crate::orbitals_impl::{OrbitalStage, Orbitals};
use crate::session::{Session, UnboundTreatment};
use crate::stats_impl::Statistics;
use ndarray::{Array1, Array2, Axis};
use tracing::info;

#[derive(Clone, Debug)]
pub struct Density {
    /// `[spin, grid]`
    pub rho_bound: Array2<f64>,
    /// `[spin, grid]`, constant along the grid in the ideal approximation
    pub rho_unbound: Array2<f64>,
    pub n_bound: Array1<f64>,
    pub n_unbound: Array1<f64>,
    built: bool,
}

impl Density {
    pub fn new(session: &Session) -> Self {
        let shape = (session.spindims, session.ngrid());
        Density {
            rho_bound: Array2::zeros(shape),
            rho_unbound: Array2::zeros(shape),
            n_bound: Array1::zeros(session.spindims),
            n_unbound: Array1::zeros(session.spindims),
            built: false,
        }
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Rebuild the bound and unbound densities from occupied orbitals.
    ///
    /// Leaves the density untouched on error.
    pub fn construct<S: Statistics + ?Sized>(
        &mut self,
        session: &Session,
        orbs: &Orbitals,
        stats: &S,
    ) -> Result<()> {
        if orbs.stage() != OrbitalStage::Occupied {
            return Err(AvAtomError::PreconditionViolation(format!(
                "construct() needs occupied orbitals, found {:?}",
                orbs.stage()
            )));
        }
        if session.unbound != UnboundTreatment::Ideal {
            return Err(AvAtomError::Configuration(format!(
                "unbound treatment '{}' is not implemented",
                session.unbound
            )));
        }
        if orbs.eigfuncs.dim().3 != session.ngrid() || orbs.occnums.dim().0 != session.spindims {
            return Err(AvAtomError::Configuration(
                "orbitals were built for a different session".to_string(),
            ));
        }

        let (rho_bound, n_bound) = Self::construct_rho_bound(session, orbs);
        let (rho_unbound, n_unbound) = Self::construct_rho_unbound(session, stats);

        self.rho_bound = rho_bound;
        self.n_bound = n_bound;
        self.rho_unbound = rho_unbound;
        self.n_unbound = n_unbound;
        self.built = true;

        for s in 0..session.spindims {
            info!(
                "spin {}: N_bound = {:.8}, N_unbound = {:.8}",
                s, self.n_bound[s], self.n_unbound[s]
            );
        }
        Ok(())
    }

    fn construct_rho_bound(session: &Session, orbs: &Orbitals) -> (Array2<f64>, Array1<f64>) {
        let (spindims, lmax, nmax, ngrid) = orbs.eigfuncs.dim();
        // |R|² = e^{-x} P²
        let jacobian = session.grid.xgrid().mapv(|x| (-x).exp());

        let mut rho = Array2::<f64>::zeros((spindims, ngrid));
        for s in 0..spindims {
            for l in 0..lmax {
                for n in 0..nmax {
                    let occ = orbs.occnums[[s, l, n]];
                    for i in 0..ngrid {
                        let p = orbs.eigfuncs[[s, l, n, i]];
                        rho[[s, i]] += occ * jacobian[i] * p * p;
                    }
                }
            }
        }

        let n_bound = orbs.occnums.sum_axis(Axis(2)).sum_axis(Axis(1));
        (rho, n_bound)
    }

    fn construct_rho_unbound<S: Statistics + ?Sized>(
        session: &Session,
        stats: &S,
    ) -> (Array2<f64>, Array1<f64>) {
        let mut rho = Array2::<f64>::zeros((session.spindims, session.ngrid()));
        let mut n_unbound = Array1::<f64>::zeros(session.spindims);

        for s in 0..session.spindims {
            if session.nele[s] == 0.0 {
                continue;
            }
            let n_ub = ideal_unbound_density(stats, session.nele[s], session.mu[s], session.beta);
            rho.index_axis_mut(Axis(0), s).fill(n_ub);
            n_unbound[s] = n_ub * session.cavity_volume;
        }

        (rho, n_unbound)
    }

    /// Bound plus unbound electrons per spin channel.
    pub fn total_electrons(&self) -> Array1<f64> {
        &self.n_bound + &self.n_unbound
    }

    /// Total density on the grid, `[spin, grid]`.
    pub fn total(&self) -> Array2<f64> {
        &self.rho_bound + &self.rho_unbound
    }
}
