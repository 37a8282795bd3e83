use anyhow::{Context, Result};
use clap::Args;
use delta_ik::{
    config::Config,
    report::{Format, SolveReport},
};
use delta_ik_core::{Coord, DeltaTripod};
use std::path::PathBuf;

#[derive(Args)]
pub struct SolveArgs {
    /// Effector x in millimeters.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Effector y in millimeters.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// Effector z in millimeters, negative below the bicep pivots.
    #[arg(allow_negative_numbers = true)]
    pub z: f64,

    /// Path to a configuration file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Treat z as the effector height above the floor.
    #[arg(long)]
    pub floor: bool,
}

impl SolveArgs {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let geometry = config.geometry();

        let z = if self.floor {
            geometry.floor_to_base(self.z)
        } else {
            self.z
        };
        let target = Coord::new(self.x, self.y, z);
        tracing::debug!(?target, ?geometry, "solving");

        let result = DeltaTripod::new(geometry).solve(target);
        let report = SolveReport::new(target, &result, &config.stepper());

        match self.format {
            Format::Text => {
                if report.is_ok() {
                    print!("{}", report.render_text(config.output.precision));
                }
            }
            Format::Json => {
                let json =
                    serde_json::to_string_pretty(&report).context("failed to render report")?;
                println!("{json}");
            }
        }

        result.with_context(|| {
            format!(
                "no solution for x={} y={} z={}",
                target.x, target.y, target.z
            )
        })?;
        Ok(())
    }
}
