//! Keyframe track store
//!
//! A rig's track is authored as one flat list of sparse per-bone samples,
//! each tagged with an absolute frame number. At load time the list is
//! regrouped by bone so that the samplers can binary-search a single bone's
//! samples instead of scanning the whole track every bone every frame.

use std::ops::Range;

use glam::Vec3;
use log::debug;

use crate::error::{AnimError, Result};
use crate::types::{EulerDegrees, Pose};

/// One authored pose sample for one bone at one absolute frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyframeEntry {
    /// Absolute frame within the rig's full track (not clip-relative)
    pub frame: u32,
    /// Bone/part index this sample belongs to
    pub part: usize,
    /// Offset in the bone's parent space
    pub position: Vec3,
    /// Parent-space rotation
    pub rotation: EulerDegrees,
}

impl KeyframeEntry {
    /// Create a new keyframe entry
    pub const fn new(frame: u32, part: usize, position: Vec3, rotation: EulerDegrees) -> Self {
        Self {
            frame,
            part,
            position,
            rotation,
        }
    }

    /// The pose stored in this sample
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }
}

/// Read-only keyframe store for one rig, indexed per bone
#[derive(Debug, Clone)]
pub struct KeyframeTrack {
    /// Samples grouped by bone, each group in non-decreasing frame order
    samples: Vec<KeyframeEntry>,
    /// Range into `samples` for each bone
    spans: Vec<Range<usize>>,
}

impl KeyframeTrack {
    /// Build the track from authored entries
    ///
    /// Entries may interleave bones freely, but the entries of any one bone
    /// must appear in non-decreasing frame order.
    pub fn new(entries: Vec<KeyframeEntry>, bone_count: usize) -> Result<Self> {
        let mut last_frame: Vec<Option<u32>> = vec![None; bone_count];
        let mut counts = vec![0usize; bone_count];

        for entry in &entries {
            if entry.part >= bone_count {
                return Err(AnimError::BoneOutOfRange {
                    index: entry.part,
                    bone_count,
                });
            }
            if let Some(previous) = last_frame[entry.part]
                && entry.frame < previous
            {
                return Err(AnimError::TrackOrder {
                    part: entry.part,
                    previous,
                    frame: entry.frame,
                });
            }
            last_frame[entry.part] = Some(entry.frame);
            counts[entry.part] += 1;
        }

        let mut spans = Vec::with_capacity(bone_count);
        let mut start = 0;
        for count in counts {
            spans.push(start..start + count);
            start += count;
        }

        // Stable: keeps each bone's authored frame order
        let mut samples = entries;
        samples.sort_by_key(|e| e.part);

        debug!(
            "Indexed {} keyframes across {} bones",
            samples.len(),
            bone_count
        );

        Ok(Self { samples, spans })
    }

    /// Number of bones this track was indexed for
    pub fn bone_count(&self) -> usize {
        self.spans.len()
    }

    /// Total number of keyframe entries
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the track holds no keyframes at all
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All entries, grouped by bone
    pub fn entries(&self) -> &[KeyframeEntry] {
        &self.samples
    }

    /// The samples of one bone in frame order (empty for unknown bones)
    pub fn samples(&self, bone: usize) -> &[KeyframeEntry] {
        match self.spans.get(bone) {
            Some(span) => &self.samples[span.clone()],
            None => &[],
        }
    }

    /// Lowest and highest authored frame across all bones
    pub fn frame_extent(&self) -> Option<(u32, u32)> {
        let min = self.samples.iter().map(|e| e.frame).min()?;
        let max = self.samples.iter().map(|e| e.frame).max()?;
        Some((min, max))
    }
}

/// Find the index of the sample at or before the given frame
///
/// Returns the largest index whose frame is `<= frame`, or None if the
/// slice is empty or every sample lies after `frame`.
pub fn find_sample_index(samples: &[KeyframeEntry], frame: u32) -> Option<usize> {
    let after = samples.partition_point(|e| e.frame <= frame);
    after.checked_sub(1)
}
