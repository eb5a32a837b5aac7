//! Output formatting and logging utilities

use avatom::{Density, Session};
use color_eyre::eyre::{eyre, Result};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup output logging to file or stdout
pub fn setup_output(output_path: Option<&String>) {
    match output_path {
        Some(path) => {
            if let Ok(log) = File::create(path) {
                let file_layer = layer()
                    .with_writer(log)
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false);
                Registry::default().with(file_layer).init();
                info!("Output will be written to: {}", path);
            } else {
                eprintln!("Could not create output file: {}", path);
            }
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default().with(stdout_layer).init();
            info!("Output will be printed to stdout");
        }
    }
}

/// Write the radial density table, one row per grid point.
///
/// Columns are r followed by the bound and unbound density of each spin channel.
pub fn write_density_table<W: Write>(
    writer: &mut W,
    session: &Session,
    density: &Density,
) -> Result<()> {
    if !density.is_built() {
        return Err(eyre!("Density has not been constructed"));
    }

    let header: &[&str] = if session.spindims == 2 {
        &["r", "n^up_b", "n^up_ub", "n^dw_b", "n^dw_ub"]
    } else {
        &["r", "n_b", "n_ub"]
    };
    write!(writer, "#")?;
    for name in header {
        write!(writer, " {:>10}", name)?;
    }
    writeln!(writer)?;

    for (i, r) in session.grid.rgrid().iter().enumerate() {
        write!(writer, "  {:>10.3e}", r)?;
        for s in 0..session.spindims {
            write!(
                writer,
                " {:>10.3e} {:>10.3e}",
                density.rho_bound[[s, i]],
                density.rho_unbound[[s, i]]
            )?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
