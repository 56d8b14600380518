//! JSON rig documents
//!
//! ```json
//! {
//!   "name": "goose",
//!   "layout": "goose",
//!   "clips": [{ "name": "idle", "start": 0, "end": 20 }],
//!   "keyframes": [
//!     { "frame": 0, "part": "body", "position": [0, 0, 1.2], "rotation": [0, 0, 0] }
//!   ]
//! }
//! ```
//!
//! Clip state ids follow the order of the `clips` list. A keyframe's `part`
//! is either a bone index or a part name.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{AnimError, Result};
use crate::keyframe::{KeyframeEntry, KeyframeTrack};
use crate::range::{AnimationRange, AnimationRangeTable};
use crate::rig::{RigDescriptor, layouts};
use crate::sampler::SampleMode;
use crate::transform::UpAxis;
use crate::types::EulerDegrees;

/// Reference to a bone by index or part name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartRef {
    Index(usize),
    Name(String),
}

/// One named clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipDocument {
    pub name: String,
    pub start: u32,
    pub end: u32,
}

/// One authored keyframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeDocument {
    pub frame: u32,
    pub part: PartRef,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: EulerDegrees,
}

/// Serialized form of a rig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigDocument {
    pub name: String,
    /// Built-in layout supplying defaults for the fields left out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_axis: Option<UpAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_mode: Option<SampleMode>,
    #[serde(default)]
    pub clips: Vec<ClipDocument>,
    #[serde(default)]
    pub keyframes: Vec<KeyframeDocument>,
}

impl RigDocument {
    /// Parse a document without validating it
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Document describing an existing descriptor, with parts spelled out
    pub fn from_descriptor(rig: &RigDescriptor) -> Self {
        let clips = rig
            .ranges()
            .iter()
            .map(|(_, name, range)| ClipDocument {
                name: name.to_string(),
                start: range.start,
                end: range.end,
            })
            .collect();
        let keyframes = rig
            .track()
            .entries()
            .iter()
            .map(|e| KeyframeDocument {
                frame: e.frame,
                part: rig
                    .mesh_name(e.part)
                    .map_or(PartRef::Index(e.part), |n| PartRef::Name(n.to_string())),
                position: e.position.to_array(),
                rotation: e.rotation,
            })
            .collect();

        Self {
            name: rig.name().to_string(),
            layout: None,
            parts: rig.part_names().to_vec(),
            up_axis: Some(rig.up_axis()),
            sample_mode: Some(rig.sample_mode()),
            clips,
            keyframes,
        }
    }

    /// Validate the document and build its descriptor
    pub fn into_descriptor(self) -> Result<RigDescriptor> {
        let layout = match self.layout.as_deref() {
            Some(name) => Some(
                layouts::find(name)
                    .ok_or_else(|| AnimError::UnknownLayout(name.to_string()))?,
            ),
            None => None,
        };

        let parts = match (self.parts.is_empty(), layout) {
            (true, Some(layout)) => layout.parts.iter().map(|p| (*p).to_string()).collect(),
            _ => self.parts,
        };
        let sample_mode = self
            .sample_mode
            .or(layout.map(|l| l.sample_mode))
            .unwrap_or_default();
        let up_axis = self
            .up_axis
            .or(layout.map(|l| l.up_axis))
            .unwrap_or_default();

        let mut ranges = AnimationRangeTable::new();
        for clip in &self.clips {
            ranges.insert(&clip.name, AnimationRange::new(clip.start, clip.end))?;
        }

        let entries = self
            .keyframes
            .into_iter()
            .map(|k| {
                let part = resolve_part(&parts, &k.part)?;
                Ok(KeyframeEntry::new(
                    k.frame,
                    part,
                    k.position.into(),
                    k.rotation,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let track = KeyframeTrack::new(entries, parts.len())?;
        let rig = RigDescriptor::new(self.name, parts, ranges, track)?
            .with_sample_mode(sample_mode)
            .with_up_axis(up_axis);

        debug!(
            "Loaded rig '{}' with {} clips and {} keyframes",
            rig.name(),
            rig.ranges().len(),
            rig.track().len()
        );
        Ok(rig)
    }
}

fn resolve_part(parts: &[String], part: &PartRef) -> Result<usize> {
    match part {
        PartRef::Index(i) => Ok(*i),
        PartRef::Name(name) => parts
            .iter()
            .position(|p| p == name)
            .ok_or_else(|| AnimError::UnknownPart(name.clone())),
    }
}

/// Parse and validate a JSON rig document
pub fn load_rig_json(json: &str) -> Result<RigDescriptor> {
    RigDocument::from_json(json)?.into_descriptor()
}
