/// Fixed dimensions of a rotary delta rig, all in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotGeometry {
    /// Size of the effector triangle. The forearm attachment edge sits
    /// `0.5 * tan30 * effector_radius` from the effector center.
    pub effector_radius: f64,
    /// Size of the base triangle, measured the same way as the effector.
    pub base_radius: f64,
    pub forearm_length: f64,
    pub bicep_length: f64,
    /// Height of the pivot plane above the floor.
    pub base_to_floor: f64,
}

impl RobotGeometry {
    /// The poker chip sorter rig.
    pub const REFERENCE: Self = Self::new(35.0, 100.0, 280.0, 285.0, 200.0);

    pub const fn new(
        effector_radius: f64,
        base_radius: f64,
        forearm_length: f64,
        bicep_length: f64,
        base_to_floor: f64,
    ) -> Self {
        Self {
            effector_radius,
            base_radius,
            forearm_length,
            bicep_length,
            base_to_floor,
        }
    }

    /// Convert a height above the floor into a pivot-plane `z`.
    pub fn floor_to_base(&self, height: f64) -> f64 {
        height - self.base_to_floor
    }
}

impl Default for RobotGeometry {
    fn default() -> Self {
        Self::REFERENCE
    }
}
