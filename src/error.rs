//! Error kinds raised by the average-atom pipeline

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AvAtomError {
    /// Unsupported model selection or invalid sizing, reported before any work is done
    #[error("unsupported configuration: {0}")]
    Configuration(String),

    /// The chemical-potential root-find ran out of iterations
    #[error(
        "chemical potential did not converge for spin {spin} after {iterations} iterations \
         (residual {residual:.3e})"
    )]
    ConvergenceFailure {
        spin: usize,
        iterations: usize,
        residual: f64,
    },

    /// An operation was called before its prerequisite stage was reached
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

pub type Result<T> = std::result::Result<T, AvAtomError>;
