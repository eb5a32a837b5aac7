//! One pass of the static average-atom pipeline
//!
//! A self-consistent driver calls [`run_step`] once per iteration with the
//! current potential; the first pass uses the bare nuclear potential.

use crate::density_impl::Density;
use crate::error::Result;
use crate::orbitals_impl::Orbitals;
use crate::session::Session;
use crate::solver_impl::Eigensolver;
use crate::stats_impl::Statistics;
use tracing::info;

/// Initialize, occupy and build the density for `nuclear_charge`.
///
/// On error the orbitals and density keep whatever state the failing stage
/// left untouched, so the caller can inspect them.
pub fn run_step<E, S>(
    session: &mut Session,
    orbs: &mut Orbitals,
    density: &mut Density,
    solver: &E,
    stats: &S,
    nuclear_charge: f64,
) -> Result<()>
where
    E: Eigensolver + ?Sized,
    S: Statistics + ?Sized,
{
    info!(
        "Static step: Z = {}, {} electrons, {} spin channel(s)",
        nuclear_charge,
        session.total_electrons(),
        session.spindims
    );
    orbs.initialize(session, solver, nuclear_charge)?;
    orbs.occupy(session, stats)?;
    density.construct(session, orbs, stats)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AvAtomError;
    use crate::orbitals_impl::OrbitalStage;
    use crate::session::{SessionParams, UnboundTreatment};
    use crate::solver_impl::MatrixSolver;
    use crate::stats_impl::FermiDirac;

    fn session(unbound: UnboundTreatment) -> Session {
        Session::new(SessionParams {
            radius: 8.0,
            temperature: 0.05,
            nele: 2.0,
            ngrid: 200,
            x0: -8.0,
            lmax: 2,
            nmax: 3,
            unbound,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_helium_like_step_is_neutral() {
        let mut session = session(UnboundTreatment::Ideal);
        let mut orbs = Orbitals::new(&session);
        let mut density = Density::new(&session);
        let solver = MatrixSolver::new(session.bc);

        run_step(&mut session, &mut orbs, &mut density, &solver, &FermiDirac::new(), 2.0).unwrap();

        assert_eq!(orbs.stage(), OrbitalStage::Occupied);
        assert!(density.is_built());
        let total = density.total_electrons()[0];
        assert!((total - 2.0).abs() < 1e-5, "total = {}", total);
        // 1s of Z = 2 sits near -2 Ha
        assert!((orbs.eigvals[[0, 0, 0]] + 2.0).abs() < 5e-2);
    }

    #[test]
    fn test_step_stops_at_unsupported_unbound() {
        let mut session = session(UnboundTreatment::Quantum);
        let mut orbs = Orbitals::new(&session);
        let mut density = Density::new(&session);
        let solver = MatrixSolver::new(session.bc);

        let result = run_step(&mut session, &mut orbs, &mut density, &solver, &FermiDirac::new(), 2.0);
        assert!(matches!(result, Err(AvAtomError::Configuration(_))));
        assert_eq!(orbs.stage(), OrbitalStage::Solved);
        assert!(!density.is_built());
    }
}
