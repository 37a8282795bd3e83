/// Cartesian position in millimeters.
///
/// `z` is measured from the plane of the bicep pivots and is negative below
/// the base.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate about the vertical axis given the cosine and sine of the angle.
    ///
    /// `z` is left untouched.
    pub fn rotate_z(self, cos: f64, sin: f64) -> Self {
        Self {
            x: self.x * cos - self.y * sin,
            y: self.y * cos + self.x * sin,
            z: self.z,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Coord {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}
