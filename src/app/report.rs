use super::StaticResult;
use tracing::info;

pub fn report_summary(result: &StaticResult) {
    let session = &result.session;
    let orbs = &result.orbitals;
    let density = &result.density;

    info!("\nAverage-atom step finished for Z = {}.", result.nuclear_charge);

    for s in 0..session.spindims {
        if session.spindims == 2 {
            info!("\nSpin {}:", if s == 0 { "up" } else { "down" });
        }
        info!("  Chemical potential: {:.8} Ha", session.mu[s]);
        info!("  Bound eigenvalues (Ha) and occupations:");
        for l in 0..session.lmax {
            for n in 0..session.nmax {
                if orbs.lbound[[s, l, n]] == 0.0 {
                    continue;
                }
                info!(
                    "    n={:>2} l={}: {:>14.8} {:>10.6}",
                    n + l + 1,
                    l,
                    orbs.eigvals[[s, l, n]],
                    orbs.occnums[[s, l, n]]
                );
            }
        }
        info!(
            "  N_bound = {:.8}, N_unbound = {:.8}",
            density.n_bound[s], density.n_unbound[s]
        );
    }

    let total = density.total_electrons().sum();
    info!(
        "\nTotal electrons: {:.8} (target {:.8})",
        total,
        session.total_electrons()
    );
}
