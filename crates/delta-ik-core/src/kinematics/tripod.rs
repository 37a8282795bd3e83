// Three-arm solve: rotate the target into each arm frame in turn

use crate::{
    coord::Coord,
    geometry::RobotGeometry,
    kinematics::{Arm, ArmSolver, IkError, SQRT_3, rotary_delta::RotaryArm},
};
use std::ops::Index;

const SIN120: f64 = SQRT_3 / 2.0;
const COS120: f64 = -0.5;

/// Bicep angles in degrees, in arm order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmAngles(pub [f64; 3]);

impl ArmAngles {
    pub fn get(&self, arm: Arm) -> f64 {
        self.0[arm.slot()]
    }

    pub fn to_array(self) -> [f64; 3] {
        self.0
    }
}

impl Index<Arm> for ArmAngles {
    type Output = f64;

    fn index(&self, arm: Arm) -> &f64 {
        &self.0[arm.slot()]
    }
}

impl Arm {
    /// Express a base-frame target in this arm's frame.
    ///
    /// Arm 2 sits at +120 degrees, so its frame is reached by rotating the
    /// target through -120 degrees; arm 3 the other way.
    pub fn to_local(self, target: Coord) -> Coord {
        match self {
            Arm::One => target,
            Arm::Two => target.rotate_z(COS120, -SIN120),
            Arm::Three => target.rotate_z(COS120, SIN120),
        }
    }
}

/// Delta robot with three identical arms 120 degrees apart
#[derive(Debug, Clone)]
pub struct DeltaTripod<S = RotaryArm> {
    solver: S,
}

impl DeltaTripod<RotaryArm> {
    pub fn new(geometry: RobotGeometry) -> Self {
        Self::with_solver(RotaryArm::new(geometry))
    }
}

impl<S: ArmSolver> DeltaTripod<S> {
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Solve arms 1, 2, 3 in order, stopping at the first arm that fails.
    pub fn solve(&self, target: Coord) -> Result<ArmAngles, IkError> {
        let mut angles = [0.0; 3];
        for arm in Arm::ALL {
            let local = arm.to_local(target);
            angles[arm.slot()] = self.solver.solve_arm(local).map_err(|source| {
                tracing::debug!(%arm, ?target, error = %source, "arm cannot reach target");
                IkError { arm, source }
            })?;
        }
        Ok(ArmAngles(angles))
    }
}

/// Solve all three bicep angles for an effector at `(x, y, z)`.
pub fn solve_inverse_kinematics(
    geometry: &RobotGeometry,
    x: f64,
    y: f64,
    z: f64,
) -> Result<ArmAngles, IkError> {
    DeltaTripod::new(*geometry).solve(Coord::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::ArmError;
    use std::cell::Cell;

    const HOME_ANGLE: f64 = 31.653_558_199_950_723;

    /// Counts calls before delegating to the real arm solver.
    struct CountingArm {
        inner: RotaryArm,
        calls: Cell<usize>,
    }

    impl CountingArm {
        fn new() -> Self {
            Self {
                inner: RotaryArm::new(RobotGeometry::REFERENCE),
                calls: Cell::new(0),
            }
        }
    }

    impl ArmSolver for CountingArm {
        fn solve_arm(&self, local: Coord) -> Result<f64, ArmError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.solve_arm(local)
        }
    }

    /// Fails only for the given 1-based call.
    struct FailOnCall {
        fail_on: usize,
        calls: Cell<usize>,
    }

    impl ArmSolver for FailOnCall {
        fn solve_arm(&self, _local: Coord) -> Result<f64, ArmError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call == self.fail_on {
                Err(ArmError::Unreachable { discriminant: -1.0 })
            } else {
                Ok(call as f64)
            }
        }
    }

    fn rotate(c: Coord, degrees: f64) -> Coord {
        let t = degrees.to_radians();
        c.rotate_z(t.cos(), t.sin())
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "{actual} differs from {expected} by more than {tol}"
        );
    }

    #[test]
    fn solvers_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RotaryArm>();
        assert_send_sync::<DeltaTripod>();

        let tripod = DeltaTripod::new(RobotGeometry::REFERENCE);
        let expected = tripod.solve(Coord::new(20.0, -15.0, -300.0)).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let angles = tripod.solve(Coord::new(20.0, -15.0, -300.0)).unwrap();
                    assert_eq!(angles, expected);
                });
            }
        });
    }

    #[test]
    fn home_position_angles_are_equal() {
        let angles = solve_inverse_kinematics(&RobotGeometry::REFERENCE, 0.0, 0.0, -250.0)
            .unwrap()
            .to_array();
        for theta in angles {
            assert_close(theta, HOME_ANGLE, 1e-9);
        }
        assert_eq!(angles[0], angles[1]);
        assert_eq!(angles[1], angles[2]);
    }

    #[test]
    fn too_deep_fails_at_arm_one() {
        let err =
            solve_inverse_kinematics(&RobotGeometry::REFERENCE, 0.0, 0.0, -1000.0).unwrap_err();
        assert_eq!(err.arm, Arm::One);
        assert!(matches!(err.source, ArmError::Unreachable { .. }));
    }

    #[test]
    fn arm_one_failure_skips_remaining_arms() {
        let tripod = DeltaTripod::with_solver(CountingArm::new());
        let err = tripod.solve(Coord::new(10_000.0, 0.0, -50.0)).unwrap_err();
        assert_eq!(err.arm, Arm::One);
        assert_eq!(tripod.solver().calls.get(), 1);
    }

    #[test]
    fn success_evaluates_every_arm_once() {
        let tripod = DeltaTripod::with_solver(CountingArm::new());
        tripod.solve(Coord::new(0.0, 0.0, -250.0)).unwrap();
        assert_eq!(tripod.solver().calls.get(), 3);
    }

    #[test]
    fn failure_is_tagged_with_the_failing_arm() {
        for (fail_on, arm) in [(1, Arm::One), (2, Arm::Two), (3, Arm::Three)] {
            let tripod = DeltaTripod::with_solver(FailOnCall {
                fail_on,
                calls: Cell::new(0),
            });
            let err = tripod.solve(Coord::new(0.0, 0.0, -250.0)).unwrap_err();
            assert_eq!(err.arm, arm);
            assert_eq!(tripod.solver().calls.get(), fail_on);
        }
    }

    #[test]
    fn angles_come_back_in_arm_order() {
        let tripod = DeltaTripod::with_solver(FailOnCall {
            fail_on: 0,
            calls: Cell::new(0),
        });
        let angles = tripod.solve(Coord::new(0.0, 0.0, -250.0)).unwrap();
        assert_eq!(angles.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(angles[Arm::Two], 2.0);
        assert_eq!(angles.get(Arm::Three), 3.0);
    }

    #[test]
    fn off_center_target_matches_reference() {
        let angles = solve_inverse_kinematics(&RobotGeometry::REFERENCE, 20.0, -15.0, -300.0)
            .unwrap()
            .to_array();
        assert_close(angles[0], 33.758_194_049_231_18, 1e-9);
        assert_close(angles[1], 34.810_999_515_819_76, 1e-9);
        assert_close(angles[2], 41.512_645_810_582_356, 1e-9);
    }

    #[test]
    fn arm_frames_match_explicit_rotation() {
        let (x, y) = (50.0, 30.0);
        let two = Arm::Two.to_local(Coord::new(x, y, -1.0));
        assert_eq!(two.x, x * COS120 + y * SIN120);
        assert_eq!(two.y, y * COS120 - x * SIN120);
        let three = Arm::Three.to_local(Coord::new(x, y, -1.0));
        assert_eq!(three.x, x * COS120 - y * SIN120);
        assert_eq!(three.y, y * COS120 + x * SIN120);
    }

    #[test]
    fn pivot_plane_fails_at_arm_one() {
        let err = solve_inverse_kinematics(&RobotGeometry::REFERENCE, 5.0, 5.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            IkError {
                arm: Arm::One,
                source: ArmError::BasePlane
            }
        );
    }

    #[test]
    fn rotating_the_target_cycles_the_angles() {
        // Every target in this box is reachable by the reference rig.
        let tripod = DeltaTripod::new(RobotGeometry::REFERENCE);
        bolero::check!()
            .with_type::<(i8, i8, u8)>()
            .for_each(|input| {
                let (x, y, depth) = *input;
                let target = Coord::new(f64::from(x), f64::from(y), -150.0 - f64::from(depth));

                let [a1, a2, a3] = tripod.solve(target).unwrap().to_array();
                let [p1, p2, p3] = tripod.solve(rotate(target, 120.0)).unwrap().to_array();
                let [m1, m2, m3] = tripod.solve(rotate(target, -120.0)).unwrap().to_array();

                for (actual, expected) in [(p1, a3), (p2, a1), (p3, a2)] {
                    assert_close(actual, expected, 1e-9);
                }
                for (actual, expected) in [(m1, a2), (m2, a3), (m3, a1)] {
                    assert_close(actual, expected, 1e-9);
                }
            });
    }
}
