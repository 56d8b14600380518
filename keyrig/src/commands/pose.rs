//! Single-pass posing

use anyhow::{Context, Result, anyhow};
use glam::{Mat4, Vec3};
use serde_json::json;
use std::path::PathBuf;

use keyrig_anim::{
    AnimConfig, AnimationRuntimeState, Animator, EulerDegrees, ItemAttachment, ModelId,
    RigDescriptor, SampleMode, StateId,
};

use super::load_rig;
use crate::utils::{add_table_row, create_table, format_euler, format_sample_mode, format_vec3};

/// Options for one pose run
#[derive(Debug, Clone)]
pub struct PoseArgs {
    pub file: PathBuf,
    pub state: String,
    pub progress: f32,
    pub mode: Option<SampleMode>,
    pub attach_bone: Option<usize>,
    pub attach_offset: Vec3,
    pub world: bool,
    pub json: bool,
}

/// Resolve a clip name, falling back to a numeric state id
fn resolve_state(rig: &RigDescriptor, state: &str) -> Result<StateId> {
    if let Ok(id) = rig.state_id(state) {
        return Ok(id);
    }
    let id = state
        .parse::<u16>()
        .map(StateId)
        .map_err(|_| anyhow!("Rig '{}' has no clip named '{state}'", rig.name()))?;
    rig.range_for(id)
        .map(|_| id)
        .ok_or_else(|| anyhow!("Rig '{}' has no state {}", rig.name(), id.0))
}

pub fn execute(args: &PoseArgs) -> Result<()> {
    let rig = load_rig(&args.file)?;
    let state_id = resolve_state(&rig, &args.state)?;

    let animator = Animator::new(AnimConfig {
        sample_mode_override: args.mode,
        ..AnimConfig::default()
    });
    let mut state = AnimationRuntimeState::new(state_id);
    state.set_progress(args.progress);

    if let Some(bone) = args.attach_bone {
        let item = ItemAttachment::new(bone, ModelId(0), args.attach_offset, EulerDegrees::ZERO);
        rig.bind_item(&mut state, item)
            .with_context(|| format!("Cannot attach to bone {bone}"))?;
    }

    let interp = animator
        .pose_character(&rig, &mut state)
        .ok_or_else(|| anyhow!("Rig '{}' has no clip for state {}", rig.name(), state_id.0))?;
    let mode = animator.config().effective_mode(rig.sample_mode());

    let root = if args.world {
        rig.up_axis().to_y_up()
    } else {
        Mat4::IDENTITY
    };
    let place = |m: &Mat4| (root * *m).w_axis.truncate();
    let attachment = state.attachment_transform().map(place);

    if args.json {
        let bones: Vec<_> = state
            .bone_poses()
            .iter()
            .zip(state.bone_transforms())
            .enumerate()
            .map(|(bone, (pose, transform))| {
                json!({
                    "bone": bone,
                    "part": rig.mesh_name(bone),
                    "position": place(transform).to_array(),
                    "rotation": [pose.rotation.x, pose.rotation.y, pose.rotation.z],
                })
            })
            .collect();
        let report = json!({
            "rig": rig.name(),
            "state": args.state,
            "mode": format_sample_mode(mode),
            "current_frame": interp.current_frame,
            "next_frame": interp.next_frame,
            "t": interp.t,
            "bones": bones,
            "attachment": attachment.map(|v| v.to_array()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Rig '{}' state '{}' ({}) progress {:.3}",
        rig.name(),
        args.state,
        format_sample_mode(mode),
        args.progress
    );
    println!(
        "Frame {} -> {} (t = {:.3})",
        interp.current_frame, interp.next_frame, interp.t
    );

    let mut table = create_table(&["Bone", "Part", "Position", "Rotation"]);
    for (bone, (pose, transform)) in state
        .bone_poses()
        .iter()
        .zip(state.bone_transforms())
        .enumerate()
    {
        add_table_row(
            &mut table,
            vec![
                bone.to_string(),
                rig.mesh_name(bone).unwrap_or("?").to_string(),
                format_vec3(place(transform)),
                format_euler(pose.rotation),
            ],
        );
    }
    table.printstd();

    if let (Some(bone), Some(translation)) = (args.attach_bone, attachment) {
        println!(
            "Attachment on bone {} ({}): {}",
            bone,
            rig.mesh_name(bone).unwrap_or("?"),
            format_vec3(translation)
        );
    }

    Ok(())
}
