//! Animator configuration

use crate::sampler::SampleMode;
use crate::state::StateChangePolicy;

/// Settings shared by every character pass an [`Animator`](crate::Animator) runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct AnimConfig {
    /// Progress handling when a character changes state
    pub state_change_policy: StateChangePolicy,
    /// Log a warning whenever progress outside `[0, 1)` has to be clamped
    pub warn_on_clamp: bool,
    /// Forces one sampling mode for every rig when set
    pub sample_mode_override: Option<SampleMode>,
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            state_change_policy: StateChangePolicy::KeepProgress,
            warn_on_clamp: true,
            sample_mode_override: None,
        }
    }
}

impl AnimConfig {
    /// Configuration for hardware paths that cannot afford blending
    pub fn held_only() -> Self {
        Self {
            sample_mode_override: Some(SampleMode::Held),
            ..Self::default()
        }
    }

    /// Sampling mode to use for a rig whose own preference is `rig_mode`
    pub fn effective_mode(&self, rig_mode: SampleMode) -> SampleMode {
        self.sample_mode_override.unwrap_or(rig_mode)
    }
}
