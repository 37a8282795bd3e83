use anyhow::Result;
use clap::Args;
use delta_ik::config::Config;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// Path to a configuration file (TOML or JSON). Omit to show the defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        print!("{}", config.to_toml()?);
        Ok(())
    }
}
