//! Inverse kinematics for a three-arm rotary delta robot.
//!
//! This crate is pure computation: no I/O, no shared state. Callers supply a
//! target effector position and receive three bicep angles or the arm that
//! could not reach the target.

pub mod coord;
pub mod geometry;
pub mod kinematics;
pub mod steps;

pub use coord::Coord;
pub use geometry::RobotGeometry;
pub use kinematics::{
    Arm, ArmError, ArmSolver, IkError,
    rotary_delta::RotaryArm,
    tripod::{ArmAngles, DeltaTripod, solve_inverse_kinematics},
};
pub use steps::{Direction, StepMove, StepperMap};
