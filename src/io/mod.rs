//! Input/Output operations for average-atom calculations
//!
//! This module handles logging setup and the radial density table.

mod output;

pub use output::{setup_output, write_density_table};
