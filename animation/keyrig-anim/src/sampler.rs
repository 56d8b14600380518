//! Frame sampler: resolves one bone's pose from the sparse keyframe track
//!
//! Both entry points share one lookup. The "current" sample is the bone's
//! last keyframe at or before `current_frame`; `lerp` additionally needs the
//! bone's next keyframe after `current_frame` inside the active clip, and
//! wraps to the bone's pose at the clip start when there is none, so looping
//! clips blend back into their first pose.
//!
//! The blend weight is measured across the whole bracket between the two
//! samples, so a bone keyed only every few frames still moves smoothly. A
//! sample keyed before the clip start stands in at the clip start, so each
//! loop starts and ends on that sample's pose.

use log::{trace, warn};

use crate::error::{AnimError, Result};
use crate::interpolation::AnimationInterpolation;
use crate::keyframe::{KeyframeEntry, KeyframeTrack, find_sample_index};
use crate::types::{Lerp, Pose};

/// How bone poses are resolved between keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum SampleMode {
    /// Blend between bracketing keyframes
    #[default]
    Lerp,
    /// Hold the last keyframe until the next one is reached (cheaper)
    Held,
}

/// The two samples bracketing the playback position for one bone
#[derive(Debug, Clone, Copy)]
struct Bracket<'a> {
    current: &'a KeyframeEntry,
    /// Frame the blend starts from: the current sample's, or the clip start
    from_frame: u32,
    /// Next sample and the frame distance to it along the looping clip
    next: Option<(&'a KeyframeEntry, u32)>,
}

fn bone_samples<'a>(
    track: &'a KeyframeTrack,
    num_bones: usize,
    bone: usize,
) -> Result<&'a [KeyframeEntry]> {
    let bone_count = num_bones.min(track.bone_count());
    if bone >= bone_count {
        return Err(AnimError::BoneOutOfRange {
            index: bone,
            bone_count,
        });
    }
    Ok(track.samples(bone))
}

fn current_index(samples: &[KeyframeEntry], bone: usize, frame: u32) -> Result<usize> {
    find_sample_index(samples, frame).ok_or(AnimError::MissingKeyframe { part: bone, frame })
}

fn resolve_bracket<'a>(
    interp: &AnimationInterpolation,
    samples: &'a [KeyframeEntry],
    bone: usize,
) -> Result<Bracket<'a>> {
    let range = interp.range;
    let index = current_index(samples, bone, interp.current_frame)?;
    let current = &samples[index];
    let from_frame = current.frame.max(range.start);

    // The sample after `index` is the first one past current_frame
    if let Some(next) = samples.get(index + 1)
        && next.frame <= range.end
    {
        return Ok(Bracket {
            current,
            from_frame,
            next: Some((next, next.frame.saturating_sub(from_frame))),
        });
    }

    // Nothing left in the clip: loop back to the sample posing the clip
    // start, which is the last one at or before it, else the first inside it
    // (index 0 whenever every sample lies past the start)
    let first = find_sample_index(samples, range.start).unwrap_or(0);
    let next = samples
        .get(first)
        .filter(|e| first != index && e.frame <= range.end)
        .map(|e| {
            let distance = range.end.saturating_sub(from_frame)
                + (e.frame.max(range.start) - range.start);
            (e, distance)
        });

    Ok(Bracket {
        current,
        from_frame,
        next,
    })
}

/// Resolve a bone's pose held at its last keyframe, reporting missing data
pub fn try_get(
    interp: &AnimationInterpolation,
    track: &KeyframeTrack,
    num_bones: usize,
    bone: usize,
) -> Result<Pose> {
    let samples = bone_samples(track, num_bones, bone)?;
    let index = current_index(samples, bone, interp.current_frame)?;
    Ok(samples[index].pose())
}

/// Resolve a bone's pose blended between keyframes, reporting missing data
pub fn try_lerp(
    interp: &AnimationInterpolation,
    track: &KeyframeTrack,
    num_bones: usize,
    bone: usize,
) -> Result<Pose> {
    let samples = bone_samples(track, num_bones, bone)?;
    let bracket = resolve_bracket(interp, samples, bone)?;
    let current = bracket.current.pose();

    let Some((next, distance)) = bracket.next else {
        return Ok(current);
    };
    if distance == 0 {
        return Ok(current);
    }

    let elapsed = interp.current_frame.saturating_sub(bracket.from_frame) as f32 + interp.t;
    let weight = (elapsed / distance as f32).clamp(0.0, 1.0);
    trace!(
        "bone {}: frames {} -> {} weight {}",
        bone, bracket.current.frame, next.frame, weight
    );

    Ok(current.lerp(&next.pose(), weight))
}

/// Resolve a bone's pose held at its last keyframe
///
/// Missing data degrades to [`Pose::IDENTITY`] with a warning.
pub fn get(
    interp: &AnimationInterpolation,
    track: &KeyframeTrack,
    num_bones: usize,
    bone: usize,
) -> Pose {
    try_get(interp, track, num_bones, bone).unwrap_or_else(|e| {
        warn!("{e}; using identity pose");
        Pose::IDENTITY
    })
}

/// Resolve a bone's pose blended between keyframes
///
/// Missing data degrades to [`Pose::IDENTITY`] with a warning.
pub fn lerp(
    interp: &AnimationInterpolation,
    track: &KeyframeTrack,
    num_bones: usize,
    bone: usize,
) -> Pose {
    try_lerp(interp, track, num_bones, bone).unwrap_or_else(|e| {
        warn!("{e}; using identity pose");
        Pose::IDENTITY
    })
}

/// Resolve a bone's pose with the given sampling mode
pub fn sample(
    mode: SampleMode,
    interp: &AnimationInterpolation,
    track: &KeyframeTrack,
    num_bones: usize,
    bone: usize,
) -> Pose {
    match mode {
        SampleMode::Lerp => lerp(interp, track, num_bones, bone),
        SampleMode::Held => get(interp, track, num_bones, bone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::calc_progress;
    use crate::range::AnimationRange;
    use crate::types::EulerDegrees;
    use glam::Vec3;

    fn key(frame: u32, part: usize, x: f32) -> KeyframeEntry {
        KeyframeEntry::new(frame, part, Vec3::new(x, 0.0, 0.0), EulerDegrees::ZERO)
    }

    fn interp_at(current_frame: u32, t: f32, start: u32, end: u32) -> AnimationInterpolation {
        AnimationInterpolation {
            current_frame,
            next_frame: if current_frame >= end { start } else { current_frame + 1 },
            t,
            range: AnimationRange::new(start, end),
        }
    }

    #[test]
    fn test_get_holds_last_keyframe() {
        let track = KeyframeTrack::new(vec![key(0, 0, 1.0), key(8, 0, 9.0)], 1).unwrap();
        assert_eq!(get(&interp_at(7, 0.9, 0, 10), &track, 1, 0).position.x, 1.0);
        assert_eq!(get(&interp_at(8, 0.0, 0, 10), &track, 1, 0).position.x, 9.0);
    }

    #[test]
    fn test_lerp_spans_sparse_bracket() {
        let track = KeyframeTrack::new(vec![key(0, 0, 0.0), key(4, 0, 8.0)], 1).unwrap();
        let pose = lerp(&interp_at(1, 0.5, 0, 4), &track, 1, 0);
        assert!((pose.position.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_ignores_samples_past_clip_end() {
        // Frame 20 belongs to a later clip and must not be blended towards
        let track = KeyframeTrack::new(
            vec![key(0, 0, 0.0), key(5, 0, 5.0), key(20, 0, 100.0)],
            1,
        )
        .unwrap();
        let pose = lerp(&interp_at(7, 0.0, 0, 9), &track, 1, 0);

        // Loops back towards frame 0: distance (9 - 5) + 0 = 4, elapsed 2
        assert!((pose.position.x - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_wraps_to_first_sample_in_clip() {
        let track = KeyframeTrack::new(
            vec![key(0, 0, -50.0), key(10, 0, 0.0), key(16, 0, 6.0)],
            1,
        )
        .unwrap();
        // Clip 10..=20; bone holds frame 16 then loops to its frame-10 sample
        let pose = lerp(&interp_at(19, 0.5, 10, 20), &track, 1, 0);
        // distance (20 - 16) + (10 - 10) = 4, elapsed 3.5
        let expected = 6.0 + (0.0 - 6.0) * (3.5 / 4.0);
        assert!((pose.position.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_holds_sample_from_before_clip() {
        // Bone only keyed in an earlier clip: held, never wrapped to itself
        let track = KeyframeTrack::new(vec![key(2, 0, 4.0)], 1).unwrap();
        let pose = lerp(&interp_at(12, 0.5, 10, 20), &track, 1, 0);
        assert_eq!(pose.position.x, 4.0);
    }

    #[test]
    fn test_pre_clip_sample_anchors_loop() {
        // Clip 10..=20; the bone is keyed before the clip (x = 0) and once inside it
        let track = KeyframeTrack::new(vec![key(2, 0, 0.0), key(15, 0, 13.0)], 1).unwrap();
        let at = |frame, t| lerp(&interp_at(frame, t, 10, 20), &track, 1, 0).position.x;

        assert_eq!(at(10, 0.0), 0.0);
        assert!((at(12, 0.5) - 6.5).abs() < 1e-5);
        assert_eq!(at(15, 0.0), 13.0);
        // Blends from 13 back to the clip start pose over frames 15..20
        assert!((at(19, 0.0) - 13.0 * 0.2).abs() < 1e-5);
        assert!((at(20, 0.0) - at(10, 0.0)).abs() < 1e-5);
    }

    #[test]
    fn test_missing_keyframe_degrades_to_identity() {
        let track = KeyframeTrack::new(vec![key(5, 0, 1.0)], 2).unwrap();
        let interp = interp_at(2, 0.0, 0, 10);

        assert!(matches!(
            try_lerp(&interp, &track, 2, 0),
            Err(AnimError::MissingKeyframe { part: 0, frame: 2 })
        ));
        assert_eq!(lerp(&interp, &track, 2, 0), Pose::IDENTITY);
        assert_eq!(get(&interp, &track, 2, 1), Pose::IDENTITY);
    }

    #[test]
    fn test_bone_out_of_range_degrades_to_identity() {
        let track = KeyframeTrack::new(vec![key(0, 0, 1.0)], 1).unwrap();
        let interp = interp_at(0, 0.0, 0, 0);
        assert!(matches!(
            try_get(&interp, &track, 1, 3),
            Err(AnimError::BoneOutOfRange { index: 3, .. })
        ));
        assert_eq!(get(&interp, &track, 1, 3), Pose::IDENTITY);
        // num_bones smaller than the track narrows the valid range too
        assert_eq!(lerp(&interp, &track, 0, 0), Pose::IDENTITY);
    }

    #[test]
    fn test_sample_dispatches_on_mode() {
        let track = KeyframeTrack::new(vec![key(0, 0, 0.0), key(10, 0, 10.0)], 1).unwrap();
        let interp = calc_progress(0.5, &AnimationRange::new(0, 10));
        assert_eq!(sample(SampleMode::Held, &interp, &track, 1, 0).position.x, 0.0);
        assert!((sample(SampleMode::Lerp, &interp, &track, 1, 0).position.x - 5.0).abs() < 1e-5);
    }
}
