use anyhow::{Context, Result};
use clap::Args;
use delta_ik::{batch::run_batch, config::Config, report::Format};
use delta_ik_core::DeltaTripod;
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

#[derive(Args)]
pub struct BatchArgs {
    /// File with one `x y z` target per line.
    pub input: PathBuf,

    /// Where to write results. Defaults to stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to a configuration file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl BatchArgs {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let input = fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read input {}", self.input.display()))?;

        let mut out: Box<dyn Write> = match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create output directory {}", parent.display())
                    })?;
                }
                let file = fs::File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };

        let tripod = DeltaTripod::new(config.geometry());
        let summary = run_batch(
            &input,
            &tripod,
            &config.stepper(),
            self.format,
            config.output.precision,
            &mut out,
        )
        .with_context(|| format!("failed to process {}", self.input.display()))?;
        out.flush().context("failed to flush batch output")?;

        if let Some(path) = &self.output {
            eprintln!(
                "Wrote {} results to {} ({} unreachable)",
                summary.solved + summary.failed,
                path.display(),
                summary.failed
            );
        }

        Ok(())
    }
}
