//! Rigid-part keyframe animation for multi-rig characters.
//!
//! Every character is posed from three pieces of data: a per-rig
//! [`KeyframeTrack`] of sparse per-bone samples, a per-rig
//! [`AnimationRangeTable`] mapping animation states to clip frame ranges,
//! and a per-character [`AnimationRuntimeState`] holding the active state,
//! playback progress, bound attachments and the resolved transform cache.
//!
//! ```no_run
//! use keyrig_anim::{AnimationRuntimeState, Animator, StateId, load_rig_json};
//!
//! # fn main() -> keyrig_anim::Result<()> {
//! let rig = load_rig_json(&std::fs::read_to_string("goose.json").unwrap_or_default())?;
//! let mut state = AnimationRuntimeState::new(StateId(0));
//! let animator = Animator::default();
//!
//! state.advance(1.0 / 60.0);
//! animator.pose_character(&rig, &mut state);
//! for (bone, transform) in state.bone_transforms().iter().enumerate() {
//!     println!("{:?}: {:?}", rig.mesh_name(bone), transform);
//! }
//! # Ok(())
//! # }
//! ```

pub mod animator;
pub mod attachment;
pub mod config;
#[cfg(feature = "serde-support")]
pub mod content;
pub mod error;
pub mod interpolation;
pub mod keyframe;
pub mod range;
pub mod rig;
pub mod sampler;
pub mod state;
pub mod transform;
pub mod types;

// Re-export common types
pub use animator::Animator;
pub use attachment::{ItemAttachment, ModelId, SpriteAttachment, SpriteId};
pub use config::AnimConfig;
#[cfg(feature = "serde-support")]
pub use content::{RigDocument, load_rig_json};
pub use error::{AnimError, Result};
pub use interpolation::{AnimationInterpolation, calc, calc_progress};
pub use keyframe::{KeyframeEntry, KeyframeTrack};
pub use range::{AnimationRange, AnimationRangeTable, StateId};
pub use rig::{ContentIssue, RigDescriptor, RigId, RigRegistry};
pub use sampler::SampleMode;
pub use state::{AnimationRuntimeState, MAX_ANIM_MESH_PARTS, StateChangePolicy};
pub use transform::UpAxis;
pub use types::{EulerDegrees, Lerp, Pose};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
