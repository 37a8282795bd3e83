use anyhow::{Context, Result};
use delta_ik_core::{RobotGeometry, StepperMap, steps::DEFAULT_STEPS_PER_REV};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

const MAX_PRECISION: usize = 17;

/// Configuration for the `delta-ik` tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rig dimensions
    #[serde(default)]
    pub geometry: GeometryConfig,

    /// Stepper drive settings
    #[serde(default)]
    pub motor: MotorConfig,

    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rig dimensions in millimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryConfig {
    #[serde(default = "default_effector_radius")]
    pub effector_radius: f64,

    #[serde(default = "default_base_radius")]
    pub base_radius: f64,

    #[serde(default = "default_forearm_length")]
    pub forearm_length: f64,

    #[serde(default = "default_bicep_length")]
    pub bicep_length: f64,

    #[serde(default = "default_base_to_floor")]
    pub base_to_floor: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            effector_radius: default_effector_radius(),
            base_radius: default_base_radius(),
            forearm_length: default_forearm_length(),
            bicep_length: default_bicep_length(),
            base_to_floor: default_base_to_floor(),
        }
    }
}

/// Stepper drive configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotorConfig {
    /// Microsteps per bicep revolution
    #[serde(default = "default_steps_per_rev")]
    pub steps_per_rev: u32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            steps_per_rev: default_steps_per_rev(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Decimal places for printed angles
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_effector_radius() -> f64 {
    RobotGeometry::REFERENCE.effector_radius
}

fn default_base_radius() -> f64 {
    RobotGeometry::REFERENCE.base_radius
}

fn default_forearm_length() -> f64 {
    RobotGeometry::REFERENCE.forearm_length
}

fn default_bicep_length() -> f64 {
    RobotGeometry::REFERENCE.bicep_length
}

fn default_base_to_floor() -> f64 {
    RobotGeometry::REFERENCE.base_to_floor
}

fn default_steps_per_rev() -> u32 {
    DEFAULT_STEPS_PER_REV
}

fn default_precision() -> usize {
    5
}

impl Config {
    /// Load the file at `path`, or the reference rig when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            // Try TOML first, fall back to JSON
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to render config as TOML")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        for (name, value) in [
            ("geometry.effector_radius", g.effector_radius),
            ("geometry.base_radius", g.base_radius),
            ("geometry.forearm_length", g.forearm_length),
            ("geometry.bicep_length", g.bicep_length),
            ("geometry.base_to_floor", g.base_to_floor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("{name} must be a positive length, got {value}");
            }
        }

        if self.motor.steps_per_rev == 0 {
            anyhow::bail!("motor.steps_per_rev cannot be zero");
        }

        if self.output.precision > MAX_PRECISION {
            anyhow::bail!(
                "output.precision must be at most {MAX_PRECISION}, got {}",
                self.output.precision
            );
        }

        Ok(())
    }

    pub fn geometry(&self) -> RobotGeometry {
        let g = &self.geometry;
        RobotGeometry::new(
            g.effector_radius,
            g.base_radius,
            g.forearm_length,
            g.bicep_length,
            g.base_to_floor,
        )
    }

    pub fn stepper(&self) -> StepperMap {
        StepperMap::new(self.motor.steps_per_rev)
    }
}
