use std::fmt;

/// A Cartesian target for the arm's end effector.
///
/// Coordinates share the unit of the arm's reach (centimetres for the
/// reference arm). No range is enforced here; the daemon decides what is
/// reachable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TargetPoint {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance from the arm's origin.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<[f64; 3]> for TargetPoint {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<(f64, f64, f64)> for TargetPoint {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for TargetPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Decoded answer of the daemon to a single [`TargetPoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Joint solution, angles quantized to whole degrees.
    Pose {
        shoulder: u8,
        elbow: u8,
        rotation: u16,
    },
    /// The daemon could not solve the request.
    Rejected { code: u16 },
}

impl Outcome {
    pub fn is_pose(&self) -> bool {
        matches!(self, Self::Pose { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pose {
                shoulder,
                elbow,
                rotation,
            } => write!(f, "shoulder {shoulder}, elbow {elbow}, rotation {rotation}"),
            Self::Rejected { code } => write!(f, "request invalid (error {code})"),
        }
    }
}
