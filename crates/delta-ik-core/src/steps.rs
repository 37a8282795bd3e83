//! Conversion from bicep angles to stepper motor positions.
//!
//! Positions are absolute microstep counts with 0 at a bicep angle of 0
//! degrees. Nothing here drives hardware.

use crate::kinematics::{Arm, tripod::ArmAngles};

/// Microsteps per revolution of the reference drivers.
pub const DEFAULT_STEPS_PER_REV: u32 = 3200;

/// Which way a motor has to turn to reach its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
    Hold,
}

/// Steps a single motor has to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepMove {
    pub direction: Direction,
    pub count: u32,
}

impl StepMove {
    pub fn between(current: i32, target: i32) -> Self {
        let direction = match current.cmp(&target) {
            std::cmp::Ordering::Less => Direction::Increase,
            std::cmp::Ordering::Greater => Direction::Decrease,
            std::cmp::Ordering::Equal => Direction::Hold,
        };
        Self {
            direction,
            count: current.abs_diff(target),
        }
    }

    /// Signed step delta.
    pub fn delta(&self) -> i64 {
        match self.direction {
            Direction::Increase => i64::from(self.count),
            Direction::Decrease => -i64::from(self.count),
            Direction::Hold => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperMap {
    steps_per_rev: u32,
}

impl Default for StepperMap {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS_PER_REV)
    }
}

impl StepperMap {
    pub const fn new(steps_per_rev: u32) -> Self {
        Self { steps_per_rev }
    }

    pub fn steps_per_rev(&self) -> u32 {
        self.steps_per_rev
    }

    /// Step position for an angle in degrees, truncated toward zero.
    pub fn angle_to_step(&self, theta: f64) -> i32 {
        (theta * f64::from(self.steps_per_rev) / 360.0) as i32
    }

    pub fn to_steps(&self, angles: &ArmAngles) -> [i32; 3] {
        Arm::ALL.map(|arm| self.angle_to_step(angles[arm]))
    }

    /// Moves taking each motor from `current` to the position for `angles`.
    pub fn plan_moves(&self, current: [i32; 3], angles: &ArmAngles) -> [StepMove; 3] {
        let target = self.to_steps(angles);
        Arm::ALL.map(|arm| StepMove::between(current[arm.slot()], target[arm.slot()]))
    }
}
