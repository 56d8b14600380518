//! Normalized rig export

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use keyrig_anim::RigDocument;

use super::load_rig;

pub fn execute(input: &Path, output: Option<&Path>) -> Result<()> {
    let rig = load_rig(input)?;
    let json = RigDocument::from_descriptor(&rig).to_json_pretty()?;

    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote rig '{}' to {}", rig.name(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
