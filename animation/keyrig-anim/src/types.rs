//! Common value types for rigid-part animation

use glam::Vec3;

/// Euler angles in degrees, applied in X, then Y, then Z order in parent space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(from = "[f32; 3]", into = "[f32; 3]"))]
pub struct EulerDegrees {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerDegrees {
    /// No rotation
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new rotation
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Angles converted to radians, as a vector
    pub fn to_radians(self) -> Vec3 {
        Vec3::new(self.x.to_radians(), self.y.to_radians(), self.z.to_radians())
    }
}

impl From<[f32; 3]> for EulerDegrees {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<EulerDegrees> for [f32; 3] {
    fn from(v: EulerDegrees) -> Self {
        [v.x, v.y, v.z]
    }
}

/// Resolved pose of one bone: parent-space offset and rotation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: EulerDegrees,
}

impl Pose {
    /// Zero offset, zero rotation. Returned for bones with missing data.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: EulerDegrees::ZERO,
    };

    /// Create a new pose
    pub const fn new(position: Vec3, rotation: EulerDegrees) -> Self {
        Self { position, rotation }
    }
}

/// Trait for types that can be linearly interpolated
pub trait Lerp: Clone {
    /// Linear interpolation between self and other
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            self.x.lerp(&other.x, t),
            self.y.lerp(&other.y, t),
            self.z.lerp(&other.z, t),
        )
    }
}

// Plain per-axis blend of degrees. Not shortest-arc: content keeps
// consecutive keyframes within a half-turn per axis.
impl Lerp for EulerDegrees {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: self.x.lerp(&other.x, t),
            y: self.y.lerp(&other.y, t),
            z: self.z.lerp(&other.z, t),
        }
    }
}

impl Lerp for Pose {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: Lerp::lerp(&self.position, &other.position, t),
            rotation: self.rotation.lerp(&other.rotation, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_lerp() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, 20.0, 30.0);

        let mid = Lerp::lerp(&a, &b, 0.5);
        assert!((mid.x - 5.0).abs() < 0.001);
        assert!((mid.y - 10.0).abs() < 0.001);
        assert!((mid.z - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_euler_lerp_takes_long_arc() {
        // 350 -> 10 swings back through 180 rather than wrapping through 0
        let a = EulerDegrees::new(350.0, 0.0, 0.0);
        let b = EulerDegrees::new(10.0, 0.0, 0.0);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.x - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_pose_lerp_endpoints() {
        let a = Pose::new(Vec3::new(1.0, 2.0, 3.0), EulerDegrees::new(0.0, 90.0, 0.0));
        let b = Pose::new(Vec3::new(3.0, 2.0, 1.0), EulerDegrees::new(90.0, 0.0, 0.0));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn test_euler_to_radians() {
        let r = EulerDegrees::new(180.0, 90.0, 0.0).to_radians();
        assert!((r.x - std::f32::consts::PI).abs() < 0.0001);
        assert!((r.y - std::f32::consts::FRAC_PI_2).abs() < 0.0001);
        assert_eq!(r.z, 0.0);
    }
}
