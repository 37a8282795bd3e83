// Rotary delta kinematics - one arm in its own frame

use crate::{
    coord::Coord,
    geometry::RobotGeometry,
    kinematics::{ArmError, ArmSolver, SQRT_3},
};

const TAN30: f64 = 1.0 / SQRT_3;

/// Discriminants down to `-DISCRIMINANT_TOLERANCE * bicep^2` count as tangent.
const DISCRIMINANT_TOLERANCE: f64 = 1e-12;

/// Forearm/bicep junction in the arm frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Junction {
    pub y: f64,
    pub z: f64,
}

/// Rotary delta arm - a bicep rotating about a pivot on the base edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotaryArm {
    geometry: RobotGeometry,
}

impl RotaryArm {
    pub const fn new(geometry: RobotGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &RobotGeometry {
        &self.geometry
    }

    /// y of the bicep pivot in the arm frame.
    pub(crate) fn pivot_y(&self) -> f64 {
        -0.5 * TAN30 * self.geometry.base_radius
    }

    /// y offset from the effector center to its forearm attachment edge.
    pub(crate) fn effector_edge_offset(&self) -> f64 {
        0.5 * TAN30 * self.geometry.effector_radius
    }

    /// Intersect the bicep circle (in the arm plane) with the forearm sphere
    /// around the effector edge, keeping the outward elbow.
    pub(crate) fn solve_junction(&self, local: Coord) -> Result<Junction, ArmError> {
        if !local.is_finite() {
            return Err(ArmError::NonFinite);
        }
        let Coord { x: x0, y, z: z0 } = local;
        if z0 == 0.0 {
            return Err(ArmError::BasePlane);
        }

        let bicep = self.geometry.bicep_length;
        let forearm = self.geometry.forearm_length;
        let y1 = self.pivot_y();
        let y0 = y - self.effector_edge_offset();

        // z = a + b*y
        let a = (x0 * x0 + y0 * y0 + z0 * z0 + bicep * bicep - forearm * forearm - y1 * y1)
            / (2.0 * z0);
        let b = (y1 - y0) / z0;

        // Finite targets far enough out overflow to -inf or NaN here.
        let mut d = -(a + b * y1) * (a + b * y1) + bicep * (b * b * bicep + bicep);
        if d.is_nan() || d < 0.0 {
            if d.is_nan() || d < -DISCRIMINANT_TOLERANCE * bicep * bicep {
                return Err(ArmError::Unreachable { discriminant: d });
            }
            d = 0.0;
        }

        // Smaller root only. The larger one is the inverted elbow.
        let yj = (y1 - a * b - d.sqrt()) / (b * b + 1.0);
        let zj = a + b * yj;
        Ok(Junction { y: yj, z: zj })
    }
}

impl ArmSolver for RotaryArm {
    fn solve_arm(&self, local: Coord) -> Result<f64, ArmError> {
        let j = self.solve_junction(local)?;
        Ok((-j.z).atan2(self.pivot_y() - j.y).to_degrees())
    }
}
