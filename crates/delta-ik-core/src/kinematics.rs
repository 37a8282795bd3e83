// Inverse kinematics for the three-arm rotary delta

use crate::coord::Coord;
use std::fmt;
use thiserror::Error;

pub mod rotary_delta;
pub mod tripod;

pub(crate) const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// One of the three actuated arms, 120 degrees apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    One,
    Two,
    Three,
}

impl Arm {
    /// Arms in evaluation order.
    pub const ALL: [Arm; 3] = [Arm::One, Arm::Two, Arm::Three];

    /// 1-based arm number.
    pub const fn number(self) -> u8 {
        match self {
            Arm::One => 1,
            Arm::Two => 2,
            Arm::Three => 3,
        }
    }

    pub const fn slot(self) -> usize {
        self.number() as usize - 1
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arm {}", self.number())
    }
}

/// Why a single arm has no angle for a target.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ArmError {
    /// The forearm cannot reach the bicep circle; no real junction exists.
    #[error("target is outside the reachable workspace (discriminant {discriminant})")]
    Unreachable { discriminant: f64 },
    /// The target lies in the pivot plane, where the junction equations
    /// divide by zero.
    #[error("target lies in the bicep pivot plane (z = 0)")]
    BasePlane,
    #[error("target coordinates are not finite")]
    NonFinite,
}

/// Failure of a full solve, tagged with the first arm that failed.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("{arm}: {source}")]
pub struct IkError {
    pub arm: Arm,
    pub source: ArmError,
}

/// Solves one arm given a target already expressed in that arm's frame.
///
/// The arm frame puts the arm's plane of motion in y/z, with the bicep pivot
/// on the negative y side of the base center.
pub trait ArmSolver {
    /// Bicep angle in degrees.
    fn solve_arm(&self, local: Coord) -> Result<f64, ArmError>;
}
