//! Average-atom Command-Line Interface
//!
//! Runs one static average-atom step from a YAML configuration and writes the
//! radial density table.

use color_eyre::eyre::Result;

mod app;
mod config;
mod io;

use app::AvAtomApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    AvAtomApplication::from_cli()?.run()
}
