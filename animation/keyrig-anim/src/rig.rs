//! Rig descriptors and the registry that selects them by id
//!
//! A rig bundles everything shared by the characters built on one skeleton:
//! part names, the clip range table, the keyframe track, the preferred
//! sampling mode and the up axis of its authored content. Descriptors are
//! validated once when built and never mutated afterwards.

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

use crate::attachment::{self, ItemAttachment, SpriteAttachment};
use crate::error::{AnimError, Result};
use crate::keyframe::{KeyframeEntry, KeyframeTrack};
use crate::range::{AnimationRange, AnimationRangeTable, StateId, next_id};
use crate::sampler::SampleMode;
use crate::state::{AnimationRuntimeState, MAX_ANIM_MESH_PARTS};
use crate::transform::UpAxis;

/// Index of a rig within a [`RigRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RigId(pub u16);

/// A content problem that would show up as an identity pose at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    /// The bone has no keyframes at all
    NoKeyframes { bone: usize, part: String },
    /// The bone's first keyframe comes after the start of a clip
    MissingAtClipStart {
        bone: usize,
        part: String,
        state: String,
        start: u32,
        first_frame: u32,
    },
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoKeyframes { bone, part } => {
                write!(f, "bone {bone} ({part}) has no keyframes")
            }
            Self::MissingAtClipStart {
                bone,
                part,
                state,
                start,
                first_frame,
            } => write!(
                f,
                "bone {bone} ({part}) has no keyframe at or before frame {start} \
                 where clip '{state}' starts (first keyframe at {first_frame})"
            ),
        }
    }
}

/// Everything shared by the characters animated on one skeleton
#[derive(Debug, Clone)]
pub struct RigDescriptor {
    name: String,
    part_names: Vec<String>,
    ranges: AnimationRangeTable,
    track: KeyframeTrack,
    sample_mode: SampleMode,
    up_axis: UpAxis,
}

impl RigDescriptor {
    /// Build a descriptor, rejecting rigs a runtime state cannot hold
    ///
    /// The track must have been indexed for exactly `part_names.len()` bones.
    pub fn new(
        name: impl Into<String>,
        part_names: Vec<String>,
        ranges: AnimationRangeTable,
        track: KeyframeTrack,
    ) -> Result<Self> {
        let name = name.into();
        let bones = part_names.len();

        if bones == 0 {
            return Err(AnimError::EmptyRig(name));
        }
        if bones > MAX_ANIM_MESH_PARTS {
            return Err(AnimError::BoneCapacityExceeded {
                rig: name,
                bones,
                capacity: MAX_ANIM_MESH_PARTS,
            });
        }
        if track.bone_count() != bones {
            return Err(AnimError::BoneNameCount {
                rig: name,
                names: bones,
                bones: track.bone_count(),
            });
        }

        Ok(Self {
            name,
            part_names,
            ranges,
            track,
            sample_mode: SampleMode::default(),
            up_axis: UpAxis::default(),
        })
    }

    /// Build a descriptor for one of the built-in [`layouts`]
    pub fn from_layout(
        layout: &layouts::RigLayout,
        ranges: AnimationRangeTable,
        keyframes: Vec<KeyframeEntry>,
    ) -> Result<Self> {
        let track = KeyframeTrack::new(keyframes, layout.parts.len())?;
        let parts = layout.parts.iter().map(|p| (*p).to_string()).collect();
        Ok(Self::new(layout.name, parts, ranges, track)?
            .with_sample_mode(layout.sample_mode)
            .with_up_axis(layout.up_axis))
    }

    /// Set the preferred sampling mode
    pub fn with_sample_mode(mut self, mode: SampleMode) -> Self {
        self.sample_mode = mode;
        self
    }

    /// Set the up axis of the authored content
    pub fn with_up_axis(mut self, up_axis: UpAxis) -> Self {
        self.up_axis = up_axis;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bone_count(&self) -> usize {
        self.part_names.len()
    }

    pub fn part_names(&self) -> &[String] {
        &self.part_names
    }

    /// Part (mesh) name drawn for a bone
    pub fn mesh_name(&self, bone: usize) -> Option<&str> {
        self.part_names.get(bone).map(String::as_str)
    }

    /// Bone index of a part name
    pub fn bone_index(&self, part: &str) -> Option<usize> {
        self.part_names.iter().position(|p| p == part)
    }

    pub fn ranges(&self) -> &AnimationRangeTable {
        &self.ranges
    }

    pub fn track(&self) -> &KeyframeTrack {
        &self.track
    }

    pub fn sample_mode(&self) -> SampleMode {
        self.sample_mode
    }

    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    /// Clip range of a state
    pub fn range_for(&self, state: StateId) -> Option<&AnimationRange> {
        self.ranges.get(state)
    }

    /// State id of a clip name
    pub fn state_id(&self, name: &str) -> Result<StateId> {
        self.ranges
            .state_id(name)
            .ok_or_else(|| AnimError::UnknownState(name.to_string()))
    }

    /// Bind an item to one of this rig's bones
    pub fn bind_item(&self, state: &mut AnimationRuntimeState, item: ItemAttachment) -> Result<()> {
        attachment::bind_item(state, self.bone_count(), item)
    }

    /// Bind a sprite to one of this rig's bones
    pub fn bind_sprite(
        &self,
        state: &mut AnimationRuntimeState,
        sprite: SpriteAttachment,
    ) -> Result<()> {
        attachment::bind_sprite(state, self.bone_count(), sprite)
    }

    /// Find bones that would fall back to an identity pose in some clip
    ///
    /// A bone is covered for a whole clip once it has a keyframe at or before
    /// the clip start, since the sampler holds the last keyframe it passed.
    pub fn check_content(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        for (bone, part) in self.part_names.iter().enumerate() {
            let Some(first) = self.track.samples(bone).first() else {
                issues.push(ContentIssue::NoKeyframes {
                    bone,
                    part: part.clone(),
                });
                continue;
            };

            for (_, state, range) in self.ranges.iter() {
                if first.frame > range.start {
                    issues.push(ContentIssue::MissingAtClipStart {
                        bone,
                        part: part.clone(),
                        state: state.to_string(),
                        start: range.start,
                        first_frame: first.frame,
                    });
                }
            }
        }

        for issue in &issues {
            warn!("Rig '{}': {issue}", self.name);
        }
        issues
    }
}

/// Dispatch table of every rig known to the process, built once at startup
#[derive(Debug, Clone, Default)]
pub struct RigRegistry {
    rigs: Vec<RigDescriptor>,
    ids: HashMap<String, RigId>,
}

impl RigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rig, returning the id characters use to select it
    pub fn register(&mut self, rig: RigDescriptor) -> Result<RigId> {
        if self.id_of(rig.name()).is_some() {
            return Err(AnimError::DuplicateRig(rig.name().to_string()));
        }
        let id = RigId(next_id("rig", rig.name(), self.rigs.len())?);
        debug!(
            "Registered rig '{}' as {:?}: {} bones, {} clips, {} keyframes",
            rig.name(),
            id,
            rig.bone_count(),
            rig.ranges().len(),
            rig.track().len()
        );
        self.ids.insert(rig.name().to_string(), id);
        self.rigs.push(rig);
        Ok(id)
    }

    pub fn get(&self, id: RigId) -> Option<&RigDescriptor> {
        self.rigs.get(id.0 as usize)
    }

    /// Look up a rig, treating an unknown id as an error
    pub fn require(&self, id: RigId) -> Result<&RigDescriptor> {
        self.get(id)
            .ok_or_else(|| AnimError::UnknownRig(format!("#{}", id.0)))
    }

    pub fn id_of(&self, name: &str) -> Option<RigId> {
        self.ids.get(name).copied()
    }

    /// Look up a rig by name
    pub fn by_name(&self, name: &str) -> Result<(RigId, &RigDescriptor)> {
        let id = self
            .id_of(name)
            .ok_or_else(|| AnimError::UnknownRig(name.to_string()))?;
        Ok((id, &self.rigs[id.0 as usize]))
    }

    pub fn len(&self) -> usize {
        self.rigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rigs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RigId, &RigDescriptor)> {
        // A registry holds at most one rig per u16 id
        (0..=u16::MAX).map(RigId).zip(&self.rigs)
    }
}

/// Built-in rig layouts
pub mod layouts {
    use crate::sampler::SampleMode;
    use crate::transform::UpAxis;

    /// Static shape of a rig: its part names in bone order and defaults
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RigLayout {
        pub name: &'static str,
        pub parts: &'static [&'static str],
        pub sample_mode: SampleMode,
        pub up_axis: UpAxis,
    }

    /// Multi-legged creature rig; cheap enough to blend every frame
    pub const GOOSE: RigLayout = RigLayout {
        name: "goose",
        parts: &[
            "body", "head", "leg_l", "foot_l", "leg_r", "foot_r", "neck",
        ],
        sample_mode: SampleMode::Lerp,
        up_axis: UpAxis::ZUp,
    };

    /// Humanoid rig, played back held
    pub const CHARACTER: RigLayout = RigLayout {
        name: "character",
        parts: &[
            "bicep_l",
            "bicep_r",
            "foot_l",
            "foot_r",
            "forearm_l",
            "forearm_r",
            "head",
            "shin_l",
            "shin_r",
            "torso",
            "thigh_l",
            "thigh_r",
        ],
        sample_mode: SampleMode::Held,
        up_axis: UpAxis::ZUp,
    };

    pub static ALL: [RigLayout; 2] = [GOOSE, CHARACTER];

    /// Find a built-in layout by rig name
    pub fn find(name: &str) -> Option<&'static RigLayout> {
        ALL.iter().find(|l| l.name == name)
    }
}
