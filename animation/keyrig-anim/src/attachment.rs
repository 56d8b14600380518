//! Attachment binder: items and sprites riding on an animated bone
//!
//! A character has exactly one item slot and one sprite slot. Binding into
//! an occupied slot replaces the previous binding; an empty slot means
//! nothing is attached.

use glam::{Mat4, Vec3};
use log::warn;

use crate::error::{AnimError, Result};
use crate::state::AnimationRuntimeState;
use crate::transform::offset_matrix;
use crate::types::EulerDegrees;

/// Model drawn for an attached item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelId(pub u16);

/// Sprite sheet drawn for an attached billboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteId(pub u16);

/// A held item rigidly following a bone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemAttachment {
    pub bone_index: usize,
    pub model: ModelId,
    /// Offset from the bone origin, in bone space
    pub offset: Vec3,
    pub rotation: EulerDegrees,
}

impl ItemAttachment {
    /// Create a new item attachment
    pub const fn new(bone_index: usize, model: ModelId, offset: Vec3, rotation: EulerDegrees) -> Self {
        Self {
            bone_index,
            model,
            offset,
            rotation,
        }
    }

    /// Attachment transform for the given bone, if this attachment rides on it
    pub fn transform_for(&self, bone: usize, bone_transform: &Mat4) -> Option<Mat4> {
        (self.bone_index == bone)
            .then(|| *bone_transform * offset_matrix(self.offset, self.rotation))
    }
}

/// A billboard sprite riding on a bone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAttachment {
    pub bone_index: usize,
    pub sprite: SpriteId,
    /// Tick the sprite started on; picks the sprite frame, not used for placement
    pub start_tick: u32,
    pub offset: Vec3,
}

impl SpriteAttachment {
    /// Create a new sprite attachment
    pub const fn new(bone_index: usize, sprite: SpriteId, start_tick: u32, offset: Vec3) -> Self {
        Self {
            bone_index,
            sprite,
            start_tick,
            offset,
        }
    }

    /// Sprite anchor transform for the given bone, if this sprite rides on it
    pub fn transform_for(&self, bone: usize, bone_transform: &Mat4) -> Option<Mat4> {
        (self.bone_index == bone).then(|| *bone_transform * Mat4::from_translation(self.offset))
    }

    /// Ticks elapsed since the sprite started, for frame selection
    pub fn age(&self, tick: u32) -> u32 {
        tick.saturating_sub(self.start_tick)
    }
}

fn check_bone(bone_index: usize, bone_count: usize) -> Result<()> {
    if bone_index >= bone_count {
        let err = AnimError::BoneOutOfRange {
            index: bone_index,
            bone_count,
        };
        warn!("Rejected attachment binding: {err}");
        return Err(err);
    }
    Ok(())
}

/// Bind an item to a bone, replacing any previous item
///
/// An out-of-range bone leaves the current binding untouched.
pub fn bind_item(
    state: &mut AnimationRuntimeState,
    bone_count: usize,
    attachment: ItemAttachment,
) -> Result<()> {
    check_bone(attachment.bone_index, bone_count)?;
    state.attachment = Some(attachment);
    Ok(())
}

/// Clear the item slot
pub fn unbind_item(state: &mut AnimationRuntimeState) {
    state.attachment = None;
}

/// Bind a sprite to a bone, replacing any previous sprite
///
/// An out-of-range bone leaves the current binding untouched.
pub fn bind_sprite(
    state: &mut AnimationRuntimeState,
    bone_count: usize,
    attachment: SpriteAttachment,
) -> Result<()> {
    check_bone(attachment.bone_index, bone_count)?;
    state.sprite_attachment = Some(attachment);
    Ok(())
}

/// Clear the sprite slot
pub fn unbind_sprite(state: &mut AnimationRuntimeState) {
    state.sprite_attachment = None;
}

/// Write attachment caches for a bone whose transform was just resolved
pub(crate) fn resolve_for_bone(state: &mut AnimationRuntimeState, bone: usize, bone_transform: &Mat4) {
    if let Some(t) = state
        .attachment
        .and_then(|a| a.transform_for(bone, bone_transform))
    {
        state.attachment_transform = Some(t);
    }
    if let Some(t) = state
        .sprite_attachment
        .and_then(|a| a.transform_for(bone, bone_transform))
    {
        state.sprite_attachment_transform = Some(t);
    }
}
