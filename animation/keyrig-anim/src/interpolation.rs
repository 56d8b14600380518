//! Interpolation calculator: maps clip progress onto the rig's frame track

use crate::range::AnimationRange;
use crate::state::AnimationRuntimeState;

/// Largest f32 strictly below 1.0
const MAX_PROGRESS: f32 = 1.0 - f32::EPSILON / 2.0;

/// Frame pair and blend fraction for one character for one tick
///
/// Produced by [`calc`] and consumed by the samplers within the same pass;
/// never stored on the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationInterpolation {
    /// Absolute frame at or before the playback position
    pub current_frame: u32,
    /// Frame after `current_frame`, wrapping to the clip start
    pub next_frame: u32,
    /// Blend fraction in `[0, 1)` from `current_frame` towards `next_frame`
    pub t: f32,
    /// Clip the frames were computed in; bounds the samplers' lookups
    pub range: AnimationRange,
}

impl AnimationInterpolation {
    /// Fractional playback position in absolute frames
    pub fn raw_frame(&self) -> f32 {
        self.current_frame as f32 + self.t
    }
}

/// Whether progress is inside the nominal `[0, 1)` domain
pub fn progress_in_domain(progress: f32) -> bool {
    (0.0..1.0).contains(&progress)
}

/// Clamp progress into `[0, 1)`, mapping NaN to 0
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, MAX_PROGRESS)
    }
}

/// Compute the interpolation for a character's current progress within `range`
pub fn calc(state: &AnimationRuntimeState, range: &AnimationRange) -> AnimationInterpolation {
    calc_progress(state.progress(), range)
}

/// Compute the interpolation for a progress value within `range`
///
/// Progress outside `[0, 1)` is clamped and a reversed range is treated as
/// the single-frame clip at its start; neither faults.
pub fn calc_progress(progress: f32, range: &AnimationRange) -> AnimationInterpolation {
    let range = range.clamped();
    let span = range.span();

    if span == 0 {
        return AnimationInterpolation {
            current_frame: range.start,
            next_frame: range.start,
            t: 0.0,
            range,
        };
    }

    let offset = clamp_progress(progress) * span as f32;
    let whole = offset.floor();
    let t = offset - whole;

    let current_frame = range
        .start
        .saturating_add(whole as u32)
        .clamp(range.start, range.end);
    let next_frame = if current_frame >= range.end {
        range.start
    } else {
        current_frame + 1
    };

    AnimationInterpolation {
        current_frame,
        next_frame,
        t,
        range,
    }
}
