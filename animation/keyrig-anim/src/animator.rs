//! Per-character animation pass
//!
//! One pass runs the interpolation calculator once, samples every bone of
//! the rig into the character's transform cache, and only then resolves the
//! attachment slots against the finished bone transforms.

use glam::Mat4;
use log::{trace, warn};

use crate::attachment;
use crate::config::AnimConfig;
use crate::error::Result;
use crate::interpolation::{AnimationInterpolation, calc, progress_in_domain};
use crate::range::StateId;
use crate::rig::{RigDescriptor, RigId, RigRegistry};
use crate::sampler;
use crate::state::{AnimationRuntimeState, MAX_ANIM_MESH_PARTS};
use crate::transform::pose_matrix;
use crate::types::Pose;

/// Drives animation passes for any number of characters
#[derive(Debug, Clone, Copy, Default)]
pub struct Animator {
    config: AnimConfig,
}

impl Animator {
    pub fn new(config: AnimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnimConfig {
        &self.config
    }

    /// Switch a character's state using the configured progress policy
    pub fn set_state(&self, state: &mut AnimationRuntimeState, new_state: StateId) {
        state.set_state(new_state, self.config.state_change_policy);
    }

    /// Switch a character's state by clip name
    pub fn set_state_by_name(
        &self,
        rig: &RigDescriptor,
        state: &mut AnimationRuntimeState,
        clip: &str,
    ) -> Result<()> {
        let id = rig.state_id(clip)?;
        self.set_state(state, id);
        Ok(())
    }

    /// Pose every bone of a character and resolve its attachments
    ///
    /// Returns the interpolation used, or None when the rig has no clip for
    /// the character's state; every bone is then left at identity.
    pub fn pose_character(
        &self,
        rig: &RigDescriptor,
        state: &mut AnimationRuntimeState,
    ) -> Option<AnimationInterpolation> {
        let bone_count = rig.bone_count().min(MAX_ANIM_MESH_PARTS);
        state.begin_pass(bone_count);

        let Some(range) = rig.range_for(state.state()) else {
            warn!(
                "Rig '{}' has no clip for state {:?}; posing at identity",
                rig.name(),
                state.state()
            );
            state.bone_poses[..bone_count].fill(Pose::IDENTITY);
            state.bone_transforms[..bone_count].fill(Mat4::IDENTITY);
            resolve_attachments(state, bone_count);
            return None;
        };

        if self.config.warn_on_clamp && !progress_in_domain(state.progress()) {
            warn!(
                "Progress {} outside [0, 1) for rig '{}'; clamping",
                state.progress(),
                rig.name()
            );
        }

        let interp = calc(state, range);
        let mode = self.config.effective_mode(rig.sample_mode());
        trace!(
            "Posing rig '{}' at frame {} -> {} (t = {}), {:?}",
            rig.name(),
            interp.current_frame,
            interp.next_frame,
            interp.t,
            mode
        );

        for bone in 0..bone_count {
            let pose = sampler::sample(mode, &interp, rig.track(), bone_count, bone);
            state.bone_transforms[bone] = pose_matrix(&pose);
            state.bone_poses[bone] = pose;
        }
        resolve_attachments(state, bone_count);

        Some(interp)
    }

    /// Pose a character whose rig is selected from a registry
    pub fn pose_with(
        &self,
        registry: &RigRegistry,
        rig: RigId,
        state: &mut AnimationRuntimeState,
    ) -> Result<Option<AnimationInterpolation>> {
        let rig = registry.require(rig)?;
        Ok(self.pose_character(rig, state))
    }
}

fn resolve_attachments(state: &mut AnimationRuntimeState, bone_count: usize) {
    for bone in 0..bone_count {
        let bone_transform = state.bone_transforms[bone];
        attachment::resolve_for_bone(state, bone, &bone_transform);
    }
}
