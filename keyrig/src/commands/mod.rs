//! Command implementations

pub mod export;
pub mod info;
pub mod pose;
pub mod validate;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use keyrig_anim::{RigDescriptor, RigDocument};

/// Read and parse a rig document without validating it
pub fn read_document(path: &Path) -> Result<RigDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rig file {}", path.display()))?;
    RigDocument::from_json(&json)
        .with_context(|| format!("Failed to parse rig file {}", path.display()))
}

/// Load and validate a rig document
pub fn load_rig(path: &Path) -> Result<RigDescriptor> {
    read_document(path)?
        .into_descriptor()
        .with_context(|| format!("Invalid rig in {}", path.display()))
}
