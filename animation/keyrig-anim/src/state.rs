//! Per-character animation runtime state
//!
//! The behavior layer owns `state` and `progress`; the animation pass owns
//! the transform caches. Both are reached only through `&mut self`, so a
//! cache can never be read while a pass is writing it. Hosts that render on a
//! separate thread must double-buffer the whole state or serialize update
//! and draw per character.

use glam::Mat4;
use log::warn;

use crate::attachment::{ItemAttachment, SpriteAttachment};
use crate::range::StateId;
use crate::types::Pose;

/// Maximum bones per rig; one cached transform is kept per bone per character
pub const MAX_ANIM_MESH_PARTS: usize = 12;

/// What happens to `progress` when the active state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum StateChangePolicy {
    /// Progress carries over into the new clip
    #[default]
    KeepProgress,
    /// Progress restarts at 0 whenever the state actually changes
    ResetProgress,
}

/// Mutable animation record owned by exactly one character
#[derive(Debug, Clone)]
pub struct AnimationRuntimeState {
    state: StateId,
    progress: f32,
    pub(crate) bone_poses: [Pose; MAX_ANIM_MESH_PARTS],
    pub(crate) bone_transforms: [Mat4; MAX_ANIM_MESH_PARTS],
    pub(crate) posed_bones: usize,
    pub(crate) attachment_transform: Option<Mat4>,
    pub(crate) sprite_attachment_transform: Option<Mat4>,
    pub(crate) attachment: Option<ItemAttachment>,
    pub(crate) sprite_attachment: Option<SpriteAttachment>,
}

impl AnimationRuntimeState {
    /// Initialize with zero progress, no attachments, and the given state
    pub fn new(default_state: StateId) -> Self {
        Self {
            state: default_state,
            progress: 0.0,
            bone_poses: [Pose::IDENTITY; MAX_ANIM_MESH_PARTS],
            bone_transforms: [Mat4::IDENTITY; MAX_ANIM_MESH_PARTS],
            posed_bones: 0,
            attachment_transform: None,
            sprite_attachment_transform: None,
            attachment: None,
            sprite_attachment: None,
        }
    }

    /// Active animation state
    pub fn state(&self) -> StateId {
        self.state
    }

    /// Normalized playback position, nominally in `[0, 1)`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Switch the active state, applying the given progress policy
    pub fn set_state(&mut self, state: StateId, policy: StateChangePolicy) {
        if state != self.state && policy == StateChangePolicy::ResetProgress {
            self.progress = 0.0;
        }
        self.state = state;
    }

    /// Set playback progress directly
    ///
    /// The value is stored as given; the interpolation step clamps anything
    /// outside `[0, 1)`.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress;
    }

    /// Advance progress by `delta`, wrapping into `[0, 1)` since clips loop
    pub fn advance(&mut self, delta: f32) {
        let next = self.progress + delta;
        if !next.is_finite() {
            warn!("Non-finite progress advance ({} + {}), restarting clip", self.progress, delta);
            self.progress = 0.0;
            return;
        }
        let wrapped = next.rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs
        self.progress = if wrapped >= 1.0 { 0.0 } else { wrapped };
    }

    /// Currently bound item attachment
    pub fn attachment(&self) -> Option<&ItemAttachment> {
        self.attachment.as_ref()
    }

    /// Currently bound sprite attachment
    pub fn sprite_attachment(&self) -> Option<&SpriteAttachment> {
        self.sprite_attachment.as_ref()
    }

    /// Bone transforms resolved by the last pass, one per rig bone
    pub fn bone_transforms(&self) -> &[Mat4] {
        &self.bone_transforms[..self.posed_bones]
    }

    /// Sampled poses from the last pass, matching [`Self::bone_transforms`]
    pub fn bone_poses(&self) -> &[Pose] {
        &self.bone_poses[..self.posed_bones]
    }

    /// Resolved transform of one bone from the last pass
    pub fn bone_transform(&self, bone: usize) -> Option<&Mat4> {
        self.bone_transforms().get(bone)
    }

    /// Item attachment transform from the last pass, if one was bound
    pub fn attachment_transform(&self) -> Option<&Mat4> {
        self.attachment_transform.as_ref()
    }

    /// Sprite attachment transform from the last pass, if one was bound
    pub fn sprite_attachment_transform(&self) -> Option<&Mat4> {
        self.sprite_attachment_transform.as_ref()
    }

    /// Drop the caches written by a pass before writing a new one
    pub(crate) fn begin_pass(&mut self, bone_count: usize) {
        self.posed_bones = bone_count.min(MAX_ANIM_MESH_PARTS);
        self.attachment_transform = None;
        self.sprite_attachment_transform = None;
    }
}

impl Default for AnimationRuntimeState {
    fn default() -> Self {
        Self::new(StateId::default())
    }
}
