//! Rendering of solve results for people and for other programs.

use clap::ValueEnum;
use delta_ik_core::{ArmAngles, Coord, IkError, StepperMap};
use serde::Serialize;
use std::fmt;

/// Output format of a solve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Coord> for Target {
    fn from(c: Coord) -> Self {
        Self {
            x: c.x,
            y: c.y,
            z: c.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    /// 1-based arm number
    pub arm: u8,
    pub reason: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arm {}: {}", self.arm, self.reason)
    }
}

/// Outcome of solving one target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    pub target: Target,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angles: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<[i32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Failure>,
}

impl SolveReport {
    pub fn new(target: Coord, result: &Result<ArmAngles, IkError>, stepper: &StepperMap) -> Self {
        match result {
            Ok(angles) => Self {
                target: target.into(),
                angles: Some(angles.to_array()),
                steps: Some(stepper.to_steps(angles)),
                error: None,
            },
            Err(err) => Self {
                target: target.into(),
                angles: None,
                steps: None,
                error: Some(Failure {
                    arm: err.arm.number(),
                    reason: err.source.to_string(),
                }),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// One line per arm, as shown after a single solve.
    pub fn render_text(&self, precision: usize) -> String {
        match (&self.angles, &self.steps, &self.error) {
            (Some(angles), Some(steps), _) => angles
                .iter()
                .zip(steps)
                .enumerate()
                .map(|(i, (theta, step))| {
                    format!("theta{}: {theta:.precision$} (step {step})\n", i + 1)
                })
                .collect(),
            (_, _, Some(failure)) => format!("{failure}\n"),
            _ => String::new(),
        }
    }

    /// Compact single-line form used by batch output.
    pub fn render_line(&self, precision: usize) -> String {
        let Target { x, y, z } = self.target;
        let outcome = match (&self.angles, &self.steps, &self.error) {
            (Some([a1, a2, a3]), Some([s1, s2, s3]), _) => format!(
                "{a1:.precision$} {a2:.precision$} {a3:.precision$} [{s1} {s2} {s3}]"
            ),
            (_, _, Some(failure)) => failure.to_string(),
            _ => String::new(),
        };
        format!("{x} {y} {z} -> {outcome}")
    }

    pub fn render(&self, format: Format, precision: usize) -> serde_json::Result<String> {
        match format {
            Format::Text => Ok(self.render_line(precision)),
            Format::Json => serde_json::to_string(self),
        }
    }
}
