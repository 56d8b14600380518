use thiserror::Error;

/// Error types for rig construction, content validation, and attachment binding
#[derive(Error, Debug)]
pub enum AnimError {
    /// The rig declares more bones than a runtime state can cache
    #[error("Rig '{rig}' has {bones} bones, exceeding the per-character capacity of {capacity}")]
    BoneCapacityExceeded {
        rig: String,
        bones: usize,
        capacity: usize,
    },

    /// The rig declares no bones at all
    #[error("Rig '{0}' has no bones")]
    EmptyRig(String),

    /// A bone index outside `[0, bone_count)`
    #[error("Bone index {index} is out of range for a rig with {bone_count} bones")]
    BoneOutOfRange { index: usize, bone_count: usize },

    /// A clip range whose start lies after its end
    #[error("Malformed range for state '{state}': start {start} > end {end}")]
    MalformedRange { state: String, start: u32, end: u32 },

    /// The state id or name has no range in the rig
    #[error("Unknown animation state: {0}")]
    UnknownState(String),

    /// Two ranges were declared for the same state
    #[error("Duplicate animation state: {0}")]
    DuplicateState(String),

    /// A table already holds as many entries as its 16-bit ids can address
    #[error("Cannot add {kind} '{name}': the table already holds {capacity} entries")]
    IdSpaceExhausted {
        kind: &'static str,
        name: String,
        capacity: usize,
    },

    /// No built-in layout has this name
    #[error("Unknown rig layout: {0}")]
    UnknownLayout(String),

    /// The rig id or name is not registered
    #[error("Unknown rig: {0}")]
    UnknownRig(String),

    /// Two rigs were registered under the same name
    #[error("Duplicate rig: {0}")]
    DuplicateRig(String),

    /// Keyframes for a bone are not in non-decreasing frame order
    #[error("Keyframes for bone {part} are out of order: frame {frame} follows frame {previous}")]
    TrackOrder { part: usize, previous: u32, frame: u32 },

    /// No keyframe for the bone at or before the requested frame
    #[error("Bone {part} has no keyframe at or before frame {frame}")]
    MissingKeyframe { part: usize, frame: u32 },

    /// The number of part names does not match the rig bone count
    #[error("Rig '{rig}' names {names} parts but declares {bones} bones")]
    BoneNameCount {
        rig: String,
        names: usize,
        bones: usize,
    },

    /// A part name referenced by content does not exist in the rig
    #[error("Unknown part name: {0}")]
    UnknownPart(String),

    /// Error decoding JSON rig content
    #[cfg(feature = "serde-support")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using AnimError
pub type Result<T> = std::result::Result<T, AnimError>;
