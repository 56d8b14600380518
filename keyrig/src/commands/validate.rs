//! Rig validation

use anyhow::{Result, bail};
use std::path::Path;

use super::load_rig;

pub fn execute(path: &Path) -> Result<()> {
    println!("Validating rig: {}", path.display());

    let rig = load_rig(path)?;
    let issues = rig.check_content();

    if issues.is_empty() {
        println!(
            "✓ Rig '{}' is valid: {} bones, {} clips, {} keyframes",
            rig.name(),
            rig.bone_count(),
            rig.ranges().len(),
            rig.track().len()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("  ✗ {issue}");
    }
    bail!(
        "Rig '{}' has {} content issue(s)",
        rig.name(),
        issues.len()
    )
}
