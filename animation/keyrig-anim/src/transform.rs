//! Pose to matrix conversion
//!
//! A bone transform is `T(position) * Rx * Ry * Rz`: the rotation about X is
//! applied last to the part's vertices, matching the order rig content is
//! authored against.

use glam::{Mat4, Quat, Vec3};

use crate::types::{EulerDegrees, Pose};

/// Up axis of authored rig content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum UpAxis {
    /// Z up, as exported from Blender
    #[default]
    ZUp,
    /// Y up, as consumed by the renderer
    YUp,
}

impl UpAxis {
    /// Root correction that brings this basis into the renderer's Y-up space
    pub fn to_y_up(self) -> Mat4 {
        match self {
            UpAxis::ZUp => Mat4::from_rotation_x(-90f32.to_radians()),
            UpAxis::YUp => Mat4::IDENTITY,
        }
    }
}

/// Rotation of Euler degrees composed as `Rx * Ry * Rz`
pub fn euler_to_quat(rotation: EulerDegrees) -> Quat {
    let r = rotation.to_radians();
    Quat::from_rotation_x(r.x) * Quat::from_rotation_y(r.y) * Quat::from_rotation_z(r.z)
}

/// Local transform of a translation followed by an Euler rotation
pub fn offset_matrix(offset: Vec3, rotation: EulerDegrees) -> Mat4 {
    Mat4::from_rotation_translation(euler_to_quat(rotation), offset)
}

/// Bone-local transform of a resolved pose
pub fn pose_matrix(pose: &Pose) -> Mat4 {
    offset_matrix(pose.position, pose.rotation)
}
