//! Grid and physical state for a single calculation
//!
//! Everything the pipeline would otherwise read from process-wide settings
//! lives on a [`Session`], which the caller owns and passes explicitly.

use crate::error::{AvAtomError, Result};
use crate::grid::LogGrid;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Treatment of the electrons in continuum (non-negative energy) states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnboundTreatment {
    /// Free-electron gas filling the cavity uniformly
    Ideal,
    /// Explicit continuum orbitals (recognised but not implemented)
    Quantum,
}

impl FromStr for UnboundTreatment {
    type Err = AvAtomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ideal" => Ok(UnboundTreatment::Ideal),
            "quantum" => Ok(UnboundTreatment::Quantum),
            other => Err(AvAtomError::Configuration(format!(
                "unknown unbound treatment '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for UnboundTreatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnboundTreatment::Ideal => write!(f, "ideal"),
            UnboundTreatment::Quantum => write!(f, "quantum"),
        }
    }
}

/// Boundary condition imposed on the orbitals at the cavity wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCondition {
    /// Radial function vanishes at the wall
    Dirichlet,
    /// Radial derivative of R(r) vanishes at the wall
    Neumann,
}

impl FromStr for BoundaryCondition {
    type Err = AvAtomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dirichlet" => Ok(BoundaryCondition::Dirichlet),
            "neumann" => Ok(BoundaryCondition::Neumann),
            other => Err(AvAtomError::Configuration(format!(
                "unknown boundary condition '{}'",
                other
            ))),
        }
    }
}

/// Plain inputs used to build a [`Session`].
#[derive(Clone, Debug)]
pub struct SessionParams {
    pub radius: f64,
    pub temperature: f64,
    pub nele: f64,
    pub spinmag: f64,
    pub spinpol: bool,
    pub ngrid: usize,
    pub x0: f64,
    pub lmax: usize,
    pub nmax: usize,
    pub unbound: UnboundTreatment,
    pub bc: BoundaryCondition,
    pub numconv: f64,
    pub max_iter: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        SessionParams {
            radius: 5.0,
            temperature: 0.1,
            nele: 1.0,
            spinmag: 0.0,
            spinpol: false,
            ngrid: 1000,
            x0: -10.0,
            lmax: 3,
            nmax: 20,
            unbound: UnboundTreatment::Ideal,
            bc: BoundaryCondition::Dirichlet,
            numconv: 1e-6,
            max_iter: 100,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub grid: LogGrid,
    pub spindims: usize,
    pub lmax: usize,
    pub nmax: usize,
    /// Target electron count per spin channel
    pub nele: Array1<f64>,
    /// Inverse temperature (1/Hartree)
    pub beta: f64,
    pub cavity_volume: f64,
    pub unbound: UnboundTreatment,
    pub bc: BoundaryCondition,
    /// Tolerance on the electron count in the chemical-potential search
    pub numconv: f64,
    pub max_iter: usize,
    /// Chemical potential per spin channel
    pub mu: Array1<f64>,
}

impl Session {
    pub fn new(params: SessionParams) -> Result<Self> {
        if params.lmax == 0 || params.nmax == 0 {
            return Err(AvAtomError::Configuration(format!(
                "lmax and nmax must be at least 1 (lmax={}, nmax={})",
                params.lmax, params.nmax
            )));
        }
        if !(params.temperature > 0.0) {
            return Err(AvAtomError::Configuration(format!(
                "temperature must be positive, got {}",
                params.temperature
            )));
        }
        if !(params.numconv > 0.0) || params.max_iter == 0 {
            return Err(AvAtomError::Configuration(
                "root-find tolerance and iteration cap must be positive".to_string(),
            ));
        }

        let grid = LogGrid::new(params.x0, params.radius, params.ngrid)?;
        let spindims = if params.spinpol { 2 } else { 1 };
        let nele = split_electrons(params.nele, params.spinmag, params.spinpol)?;
        let cavity_volume = sphere_volume(grid.r_max());

        Ok(Session {
            grid,
            spindims,
            lmax: params.lmax,
            nmax: params.nmax,
            nele,
            beta: 1.0 / params.temperature,
            cavity_volume,
            unbound: params.unbound,
            bc: params.bc,
            numconv: params.numconv,
            max_iter: params.max_iter,
            mu: Array1::zeros(spindims),
        })
    }

    /// Replace the cavity volume derived from the grid's outer radius.
    pub fn with_cavity_volume(mut self, volume: f64) -> Self {
        self.cavity_volume = volume;
        self
    }

    pub fn ngrid(&self) -> usize {
        self.grid.len()
    }

    pub fn total_electrons(&self) -> f64 {
        self.nele.sum()
    }

    pub fn reset_chemical_potential(&mut self) {
        self.mu = Array1::zeros(self.spindims);
    }
}

pub fn sphere_volume(radius: f64) -> f64 {
    4.0 * PI * radius.powi(3) / 3.0
}

fn split_electrons(nele: f64, spinmag: f64, spinpol: bool) -> Result<Array1<f64>> {
    if nele < 0.0 {
        return Err(AvAtomError::Configuration(format!(
            "electron count must be non-negative, got {}",
            nele
        )));
    }
    if !spinpol {
        return Ok(Array1::from_vec(vec![nele]));
    }

    let up = 0.5 * (nele + spinmag);
    let down = 0.5 * (nele - spinmag);
    if up < 0.0 || down < 0.0 {
        return Err(AvAtomError::Configuration(format!(
            "spin magnetisation {} is incompatible with {} electrons",
            spinmag, nele
        )));
    }
    Ok(Array1::from_vec(vec![up, down]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_split() {
        let params = SessionParams {
            nele: 5.0,
            spinmag: 1.0,
            spinpol: true,
            ngrid: 50,
            ..Default::default()
        };
        let session = Session::new(params).unwrap();
        assert_eq!(session.spindims, 2);
        assert_eq!(session.nele.to_vec(), vec![3.0, 2.0]);
        assert_eq!(session.mu.len(), 2);
    }

    #[test]
    fn test_unpolarized_keeps_total() {
        let params = SessionParams {
            nele: 4.0,
            spinmag: 2.0,
            ngrid: 50,
            ..Default::default()
        };
        let session = Session::new(params).unwrap();
        assert_eq!(session.spindims, 1);
        assert_eq!(session.nele.to_vec(), vec![4.0]);
    }

    #[test]
    fn test_cavity_volume_matches_radius() {
        let params = SessionParams {
            radius: 3.0,
            temperature: 0.5,
            ngrid: 50,
            ..Default::default()
        };
        let session = Session::new(params).unwrap();
        assert!((session.cavity_volume - 36.0 * PI).abs() < 1e-8);
        assert!((session.beta - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let bad_spin = SessionParams {
            nele: 1.0,
            spinmag: 3.0,
            spinpol: true,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(bad_spin),
            Err(AvAtomError::Configuration(_))
        ));

        let bad_cutoff = SessionParams {
            nmax: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(bad_cutoff),
            Err(AvAtomError::Configuration(_))
        ));

        let bad_temp = SessionParams {
            temperature: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(bad_temp),
            Err(AvAtomError::Configuration(_))
        ));
    }

    #[test]
    fn test_parse_model_options() {
        assert_eq!("Ideal".parse::<UnboundTreatment>().unwrap(), UnboundTreatment::Ideal);
        assert_eq!(
            "quantum".parse::<UnboundTreatment>().unwrap(),
            UnboundTreatment::Quantum
        );
        assert!("tf".parse::<UnboundTreatment>().is_err());
        assert_eq!(
            "neumann".parse::<BoundaryCondition>().unwrap(),
            BoundaryCondition::Neumann
        );
    }
}
