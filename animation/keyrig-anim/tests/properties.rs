//! Property tests for the interpolation calculator and samplers

use glam::{Mat4, Vec3};
use keyrig_anim::attachment::{ItemAttachment, ModelId};
use keyrig_anim::sampler::{get, lerp};
use keyrig_anim::{
    AnimationInterpolation, AnimationRange, EulerDegrees, KeyframeEntry, KeyframeTrack, Pose,
    calc_progress,
};
use proptest::prelude::*;

fn range_strategy() -> impl Strategy<Value = AnimationRange> {
    (0u32..500, 0u32..200).prop_map(|(start, span)| AnimationRange::new(start, start + span))
}

fn coord() -> impl Strategy<Value = f32> {
    -100.0f32..100.0
}

fn pose_strategy() -> impl Strategy<Value = (Vec3, EulerDegrees)> {
    (coord(), coord(), coord(), coord(), coord(), coord())
        .prop_map(|(x, y, z, rx, ry, rz)| (Vec3::new(x, y, z), EulerDegrees::new(rx, ry, rz)))
}

/// A one-bone track keyed on every frame of `0..=frames`
fn dense_track_strategy() -> impl Strategy<Value = (KeyframeTrack, u32)> {
    (1u32..24).prop_flat_map(|frames| {
        prop::collection::vec(pose_strategy(), (frames + 1) as usize).prop_map(move |poses| {
            let entries = poses
                .into_iter()
                .enumerate()
                .map(|(frame, (p, r))| KeyframeEntry::new(frame as u32, 0, p, r))
                .collect();
            (KeyframeTrack::new(entries, 1).unwrap(), frames)
        })
    })
}

fn pose_near(a: &Pose, b: &Pose) -> bool {
    let eps = 1e-3;
    a.position.abs_diff_eq(b.position, eps)
        && (a.rotation.x - b.rotation.x).abs() < eps
        && (a.rotation.y - b.rotation.y).abs() < eps
        && (a.rotation.z - b.rotation.z).abs() < eps
}

proptest! {
    #[test]
    fn test_calc_stays_in_range(progress in 0.0f32..1.0, range in range_strategy()) {
        let interp = calc_progress(progress, &range);
        prop_assert!(range.contains(interp.current_frame));
        prop_assert!(range.contains(interp.next_frame));
        prop_assert!((0.0..1.0).contains(&interp.t));
    }

    #[test]
    fn test_calc_clamps_any_input(progress in any::<f32>(), start in 0u32..100, end in 0u32..100) {
        let range = AnimationRange::new(start, end);
        let interp = calc_progress(progress, &range);
        let effective = range.clamped();
        prop_assert!(effective.contains(interp.current_frame));
        prop_assert!(effective.contains(interp.next_frame));
        prop_assert!((0.0..1.0).contains(&interp.t));
    }

    #[test]
    fn test_calc_is_monotonic(a in 0.0f32..1.0, b in 0.0f32..1.0, range in range_strategy()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let first = calc_progress(lo, &range);
        let second = calc_progress(hi, &range);
        prop_assert!(first.current_frame <= second.current_frame);
    }

    #[test]
    fn test_lerp_at_zero_matches_get((track, frames) in dense_track_strategy(), at in 0u32..24) {
        let current_frame = at % (frames + 1);
        let interp = AnimationInterpolation {
            current_frame,
            next_frame: if current_frame == frames { 0 } else { current_frame + 1 },
            t: 0.0,
            range: AnimationRange::new(0, frames),
        };
        prop_assert_eq!(lerp(&interp, &track, 1, 0), get(&interp, &track, 1, 0));
    }

    #[test]
    fn test_lerp_approaches_next_sample((track, frames) in dense_track_strategy(), at in 0u32..24) {
        let current_frame = at % frames;
        let interp = AnimationInterpolation {
            current_frame,
            next_frame: current_frame + 1,
            t: 1.0,
            range: AnimationRange::new(0, frames),
        };
        let next = track.samples(0)[(current_frame + 1) as usize].pose();
        prop_assert!(pose_near(&lerp(&interp, &track, 1, 0), &next));
    }

    #[test]
    fn test_sampling_is_deterministic(
        (track, frames) in dense_track_strategy(),
        progress in 0.0f32..1.0,
    ) {
        let interp = calc_progress(progress, &AnimationRange::new(0, frames));
        let a = lerp(&interp, &track, 1, 0);
        let b = lerp(&interp, &track, 1, 0);
        prop_assert_eq!(a.position.to_array().map(f32::to_bits), b.position.to_array().map(f32::to_bits));
        prop_assert_eq!(get(&interp, &track, 1, 0), get(&interp, &track, 1, 0));
    }

    #[test]
    fn test_attachment_only_on_its_bone(bound in 0usize..12, evaluated in 0usize..12) {
        let item = ItemAttachment::new(bound, ModelId(1), Vec3::Y, EulerDegrees::ZERO);
        let transform = item.transform_for(evaluated, &Mat4::IDENTITY);
        prop_assert_eq!(transform.is_some(), bound == evaluated);
    }
}
