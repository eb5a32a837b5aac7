//! Configuration management for average-atom calculations
//!
//! This module handles the YAML configuration structures, their defaults, and
//! the translation into the parameters of a calculation session.

mod args;

pub use args::Args;

use avatom::session::{BoundaryCondition, SessionParams, UnboundTreatment};
use color_eyre::eyre::{eyre, Result, WrapErr};
use periodic_table_on_an_enum::Element;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub atom: AtomParams,
    #[serde(default)]
    pub model: ModelParams,
    #[serde(default)]
    pub grid_params: GridParams,
    #[serde(default)]
    pub quantum_numbers: QuantumNumbers,
    #[serde(default)]
    pub conv_params: ConvParams,
}

/// The atom and its plasma environment
#[derive(Debug, Deserialize, Serialize)]
pub struct AtomParams {
    /// Element symbol, used for the nuclear charge when `at_chrg` is absent
    pub species: Option<String>,
    pub at_chrg: Option<f64>,
    /// Cavity (Wigner-Seitz) radius in Bohr
    pub radius: f64,
    /// Temperature in Hartree
    pub temperature: f64,
    /// Total electron count; defaults to the nuclear charge
    pub nele: Option<f64>,
    /// Up minus down electrons in spin-polarised runs
    pub spinmag: Option<f64>,
}

/// Model choices
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ModelParams {
    pub spinpol: Option<bool>,
    pub unbound: Option<String>,
    pub bc: Option<String>,
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams {
            spinpol: Some(false),
            unbound: Some("ideal".to_string()),
            bc: Some("dirichlet".to_string()),
        }
    }
}

impl ModelParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.spinpol.is_none() {
            self.spinpol = defaults.spinpol;
        }
        if self.unbound.is_none() {
            self.unbound = defaults.unbound;
        }
        if self.bc.is_none() {
            self.bc = defaults.bc;
        }
        self
    }
}

/// Logarithmic grid parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GridParams {
    pub ngrid: Option<usize>,
    pub x0: Option<f64>,
}

impl Default for GridParams {
    fn default() -> Self {
        GridParams {
            ngrid: Some(1000),
            x0: Some(-10.0),
        }
    }
}

impl GridParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.ngrid.is_none() {
            self.ngrid = defaults.ngrid;
        }
        if self.x0.is_none() {
            self.x0 = defaults.x0;
        }
        self
    }
}

/// Cutoffs on the orbital quantum numbers
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuantumNumbers {
    pub nmax: Option<usize>,
    pub lmax: Option<usize>,
}

impl Default for QuantumNumbers {
    fn default() -> Self {
        QuantumNumbers {
            nmax: Some(20),
            lmax: Some(3),
        }
    }
}

impl QuantumNumbers {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.nmax.is_none() {
            self.nmax = defaults.nmax;
        }
        if self.lmax.is_none() {
            self.lmax = defaults.lmax;
        }
        self
    }
}

/// Numerical convergence parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConvParams {
    pub numconv: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Default for ConvParams {
    fn default() -> Self {
        ConvParams {
            numconv: Some(1e-6),
            max_iter: Some(100),
        }
    }
}

impl ConvParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.numconv.is_none() {
            self.numconv = defaults.numconv;
        }
        if self.max_iter.is_none() {
            self.max_iter = defaults.max_iter;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.model = self.model.with_defaults();
        self.grid_params = self.grid_params.with_defaults();
        self.quantum_numbers = self.quantum_numbers.with_defaults();
        self.conv_params = self.conv_params.with_defaults();
        self
    }

    /// Nuclear charge from `at_chrg`, or from the element symbol.
    pub fn nuclear_charge(&self) -> Result<f64> {
        if let Some(z) = self.atom.at_chrg {
            return Ok(z);
        }
        let symbol = self
            .atom
            .species
            .as_ref()
            .ok_or_else(|| eyre!("Either atom.species or atom.at_chrg must be given"))?;
        let element = Element::from_symbol(symbol)
            .ok_or_else(|| eyre!("Invalid element symbol: {}", symbol))?;
        Ok(element.get_atomic_number() as f64)
    }

    /// Resolve the session parameters, letting command-line values win.
    pub fn session_params(&self, args: &Args) -> Result<SessionParams> {
        let z = self.nuclear_charge()?;
        if z <= 0.0 {
            return Err(eyre!("Nuclear charge must be positive, got {}", z));
        }

        let unbound = self
            .model
            .unbound
            .as_deref()
            .unwrap_or("ideal")
            .parse::<UnboundTreatment>()
            .wrap_err("Invalid model.unbound")?;
        let bc = self
            .model
            .bc
            .as_deref()
            .unwrap_or("dirichlet")
            .parse::<BoundaryCondition>()
            .wrap_err("Invalid model.bc")?;
        let defaults = SessionParams::default();

        Ok(SessionParams {
            radius: args.radius.unwrap_or(self.atom.radius),
            temperature: args.temperature.unwrap_or(self.atom.temperature),
            nele: self.atom.nele.unwrap_or(z),
            spinmag: self.atom.spinmag.unwrap_or(0.0),
            spinpol: args.spinpol || self.model.spinpol.unwrap_or(false),
            ngrid: args
                .ngrid
                .or(self.grid_params.ngrid)
                .unwrap_or(defaults.ngrid),
            x0: self.grid_params.x0.unwrap_or(defaults.x0),
            lmax: args
                .lmax
                .or(self.quantum_numbers.lmax)
                .unwrap_or(defaults.lmax),
            nmax: args
                .nmax
                .or(self.quantum_numbers.nmax)
                .unwrap_or(defaults.nmax),
            unbound,
            bc,
            numconv: self.conv_params.numconv.unwrap_or(defaults.numconv),
            max_iter: self.conv_params.max_iter.unwrap_or(defaults.max_iter),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(yaml: &str) -> Config {
        serde_yml::from_str::<Config>(yaml).unwrap().with_defaults()
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = parse(
            "atom:\n  species: Al\n  radius: 5.0\n  temperature: 0.1\n",
        );
        assert_eq!(config.grid_params.ngrid, Some(1000));
        assert_eq!(config.quantum_numbers.nmax, Some(20));
        assert_eq!(config.quantum_numbers.lmax, Some(3));
        assert_eq!(config.model.unbound.as_deref(), Some("ideal"));
        assert_eq!(config.nuclear_charge().unwrap(), 13.0);

        let args = Args::parse_from(["avatom"]);
        let params = config.session_params(&args).unwrap();
        assert_eq!(params.nele, 13.0);
        assert_eq!(params.unbound, UnboundTreatment::Ideal);
        assert_eq!(params.bc, BoundaryCondition::Dirichlet);
        assert!(!params.spinpol);
    }

    #[test]
    fn test_command_line_overrides() {
        let config = parse(
            "atom:\n  at_chrg: 4\n  nele: 3.5\n  radius: 2.0\n  temperature: 1.0\n\
             model:\n  bc: neumann\n\
             grid_params:\n  ngrid: 500\n",
        );
        let args = Args::parse_from([
            "avatom",
            "--temperature",
            "0.25",
            "--ngrid",
            "120",
            "--spinpol",
        ]);
        let params = config.session_params(&args).unwrap();
        assert_eq!(params.temperature, 0.25);
        assert_eq!(params.radius, 2.0);
        assert_eq!(params.ngrid, 120);
        assert_eq!(params.nele, 3.5);
        assert!(params.spinpol);
        assert_eq!(params.bc, BoundaryCondition::Neumann);
    }

    #[test]
    fn test_unknown_options_rejected() {
        let args = Args::parse_from(["avatom"]);

        let config = parse(
            "atom:\n  species: H\n  radius: 1.0\n  temperature: 1.0\nmodel:\n  unbound: thomas-fermi\n",
        );
        assert!(config.session_params(&args).is_err());

        let config = parse("atom:\n  species: Xx\n  radius: 1.0\n  temperature: 1.0\n");
        assert!(config.nuclear_charge().is_err());

        let config = parse("atom:\n  radius: 1.0\n  temperature: 1.0\n");
        assert!(config.nuclear_charge().is_err());
    }
}
