//! Rig information display

use anyhow::Result;
use std::path::Path;

use keyrig_anim::VERSION;
use keyrig_anim::rig::layouts;

use super::load_rig;
use crate::utils::{add_table_row, create_table, format_sample_mode, format_up_axis};

pub fn execute(path: &Path) -> Result<()> {
    let rig = load_rig(path)?;

    println!("=== Rig Information ===");
    println!("Name: {}", rig.name());
    println!("Bones: {}", rig.bone_count());
    println!("Sample mode: {}", format_sample_mode(rig.sample_mode()));
    println!("Up axis: {}", format_up_axis(rig.up_axis()));
    println!("Keyframes: {}", rig.track().len());
    if let Some((first, last)) = rig.track().frame_extent() {
        println!("Frames: {first}..={last}");
    }

    println!("\n=== Parts ===");
    let mut parts = create_table(&["Bone", "Part", "Keyframes"]);
    for (bone, part) in rig.part_names().iter().enumerate() {
        add_table_row(
            &mut parts,
            vec![
                bone.to_string(),
                part.clone(),
                rig.track().samples(bone).len().to_string(),
            ],
        );
    }
    parts.printstd();

    println!("\n=== Clips ===");
    if rig.ranges().is_empty() {
        println!("(none)");
    } else {
        let mut clips = create_table(&["State", "Name", "Start", "End", "Frames"]);
        for (id, name, range) in rig.ranges().iter() {
            add_table_row(
                &mut clips,
                vec![
                    id.0.to_string(),
                    name.to_string(),
                    range.start.to_string(),
                    range.end.to_string(),
                    (range.span() + 1).to_string(),
                ],
            );
        }
        clips.printstd();
    }

    Ok(())
}

pub fn list_layouts() -> Result<()> {
    println!("Built-in rig layouts (keyrig-anim {VERSION}):");
    for layout in &layouts::ALL {
        println!(
            "\n{} ({} parts, {}, {})",
            layout.name,
            layout.parts.len(),
            format_sample_mode(layout.sample_mode),
            format_up_axis(layout.up_axis)
        );
        for (bone, part) in layout.parts.iter().enumerate() {
            println!("  {bone:>2}  {part}");
        }
    }
    Ok(())
}
