mod report;
mod runner;

pub use runner::{run_static, StaticResult};

use self::report::report_summary;
use crate::config::{Args, Config};
use crate::io::{setup_output, write_density_table};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs::{self, File};
use std::io::BufWriter;
use tracing::info;

pub struct AvAtomApplication {
    args: Args,
    config: Config,
}

impl AvAtomApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());
        info!("Configuration loaded:\n{:?}", self.config);

        let result = run_static(&self.args, &self.config)?;
        report_summary(&result);

        let file = File::create(&self.args.density_file)
            .wrap_err_with(|| format!("Unable to create density file: {}", self.args.density_file))?;
        let mut writer = BufWriter::new(file);
        write_density_table(&mut writer, &result.session, &result.density)?;
        info!("Density table written to: {}", self.args.density_file);

        Ok(())
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
