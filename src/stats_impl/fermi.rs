//! Default Fermi-Dirac backend

use super::{NonConvergence, RootSearch, Statistics};
use tracing::debug;

/// Initial half-width of the bracket around the starting guess (Hartree).
const INITIAL_BRACKET: f64 = 1.0;

/// Number of Simpson intervals used for the complete Fermi-Dirac integral.
const QUADRATURE_INTERVALS: usize = 4000;

/// How far past the Fermi edge (in units of kT) the integrand is followed.
const TAIL_WIDTH: f64 = 60.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct FermiDirac;

impl FermiDirac {
    pub fn new() -> Self {
        FermiDirac
    }

    /// Dimensionless integral F_j(η) = ∫_0^∞ t^j / (1 + exp(t - η)) dt.
    ///
    /// Integrated in u = √t, which removes the t^j cusp at the origin for
    /// half-integer orders.
    pub fn dimensionless_integral(eta: f64, order: f64) -> f64 {
        let u_max = (eta.max(0.0) + TAIL_WIDTH).sqrt();
        let h = u_max / QUADRATURE_INTERVALS as f64;
        let power = 2.0 * order + 1.0;

        let integrand = |u: f64| -> f64 {
            if u == 0.0 {
                return if power > 0.0 {
                    0.0
                } else {
                    2.0 / (1.0 + (-eta).exp())
                };
            }
            2.0 * u.powf(power) / (1.0 + (u * u - eta).exp())
        };

        let mut sum = integrand(0.0) + integrand(u_max);
        for k in 1..QUADRATURE_INTERVALS {
            let weight = if k % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * integrand(k as f64 * h);
        }
        sum * h / 3.0
    }
}

impl Statistics for FermiDirac {
    fn fermi_dirac(&self, eps: f64, mu: f64, beta: f64) -> f64 {
        // exp overflows to +inf for very unoccupied levels, giving exactly 0
        1.0 / ((beta * (eps - mu)).exp() + 1.0)
    }

    fn fd_int_complete(&self, mu: f64, beta: f64, order: f64) -> f64 {
        debug_assert!(order >= -0.5, "quadrature needs order >= -1/2");
        let eta = beta * mu;
        beta.powf(-(order + 1.0)) * Self::dimensionless_integral(eta, order)
    }

    fn find_chemical_potential(
        &self,
        electron_count: &dyn Fn(f64) -> f64,
        target: f64,
        search: RootSearch,
    ) -> std::result::Result<f64, NonConvergence> {
        let residual = |mu: f64| electron_count(mu) - target;

        let mut lower = search.guess - INITIAL_BRACKET;
        let mut upper = search.guess + INITIAL_BRACKET;
        let mut f_lower = residual(lower);
        let mut f_upper = residual(upper);

        // Walk the bracket outwards until it straddles the root
        let mut width = INITIAL_BRACKET;
        let mut expansions = 0;
        while f_lower > 0.0 {
            if expansions >= search.max_iter {
                return Err(NonConvergence {
                    iterations: expansions,
                    residual: f_lower,
                });
            }
            width *= 2.0;
            upper = lower;
            f_upper = f_lower;
            lower -= width;
            f_lower = residual(lower);
            expansions += 1;
        }
        width = INITIAL_BRACKET;
        while f_upper < 0.0 {
            if expansions >= search.max_iter {
                return Err(NonConvergence {
                    iterations: expansions,
                    residual: f_upper,
                });
            }
            width *= 2.0;
            lower = upper;
            upper += width;
            f_upper = residual(upper);
            expansions += 1;
        }
        if f_lower.abs() < search.tolerance {
            return Ok(lower);
        }
        if f_upper.abs() < search.tolerance {
            return Ok(upper);
        }

        debug!(
            "chemical potential bracketed in [{:.6}, {:.6}] after {} expansions",
            lower, upper, expansions
        );

        let mut mid = 0.5 * (lower + upper);
        let mut f_mid = residual(mid);
        for iteration in 1..=search.max_iter {
            if f_mid.abs() < search.tolerance {
                debug!(
                    "chemical potential {:.10} found in {} bisection steps",
                    mid, iteration
                );
                return Ok(mid);
            }
            if f_mid > 0.0 {
                upper = mid;
            } else {
                lower = mid;
            }
            mid = 0.5 * (lower + upper);
            f_mid = residual(mid);
        }

        if f_mid.abs() < search.tolerance {
            return Ok(mid);
        }
        Err(NonConvergence {
            iterations: search.max_iter,
            residual: f_mid,
        })
    }
}
