use crate::config::{Args, Config};
use avatom::{run_step, Density, FermiDirac, MatrixSolver, Orbitals, Session};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

/// Everything a finished static step leaves behind.
pub struct StaticResult {
    pub nuclear_charge: f64,
    pub session: Session,
    pub orbitals: Orbitals,
    pub density: Density,
}

pub fn run_static(args: &Args, config: &Config) -> Result<StaticResult> {
    let nuclear_charge = config.nuclear_charge()?;
    let params = config.session_params(args)?;
    info!(
        "Cavity radius {:.4} Bohr, temperature {:.6} Ha, {} grid points",
        params.radius, params.temperature, params.ngrid
    );
    info!(
        "Unbound electrons: {}, boundary condition: {:?}",
        params.unbound, params.bc
    );

    let mut session = Session::new(params).wrap_err("Invalid calculation parameters")?;
    let mut orbitals = Orbitals::new(&session);
    let mut density = Density::new(&session);
    let solver = MatrixSolver::new(session.bc);
    let stats = FermiDirac::new();

    info!("\nStarting static average-atom step...");
    run_step(
        &mut session,
        &mut orbitals,
        &mut density,
        &solver,
        &stats,
        nuclear_charge,
    )
    .wrap_err("Average-atom step failed")?;

    Ok(StaticResult {
        nuclear_charge,
        session,
        orbitals,
        density,
    })
}
