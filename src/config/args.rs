//! Command-line argument parsing for average-atom calculations

use clap::Parser;

/// Finite-temperature average-atom calculation with YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// File receiving the radial density table
    #[arg(long, default_value = "density.csv")]
    pub density_file: String,

    /// Override temperature (Hartree)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Override cavity radius (Bohr)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Override number of grid points
    #[arg(long)]
    pub ngrid: Option<usize>,

    /// Override number of states per angular momentum
    #[arg(long)]
    pub nmax: Option<usize>,

    /// Override number of angular momentum channels
    #[arg(long)]
    pub lmax: Option<usize>,

    /// Use spin-polarized orbitals
    #[arg(long)]
    pub spinpol: bool,
}
