//! Animation range table: maps a rig's animation states to clip frame ranges

use std::collections::HashMap;

use crate::error::{AnimError, Result};

/// Identifier of an animation state within one rig's state set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct StateId(pub u16);

impl From<u16> for StateId {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// Inclusive `[start, end]` frame range of one clip within the rig's track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationRange {
    pub start: u32,
    pub end: u32,
}

impl AnimationRange {
    /// Create a new range
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether `start <= end`
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Number of frame steps from start to end (0 for a single-frame clip)
    pub fn span(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the frame lies inside the clip
    pub fn contains(&self, frame: u32) -> bool {
        (self.start..=self.end).contains(&frame)
    }

    /// The range with a reversed end collapsed onto `start`
    pub fn clamped(&self) -> Self {
        Self {
            start: self.start,
            end: self.end.max(self.start),
        }
    }
}

/// Largest number of entries a table keyed by 16-bit ids can hold
pub(crate) const MAX_U16_IDS: usize = u16::MAX as usize + 1;

/// Next dense 16-bit id for a table currently holding `len` entries
pub(crate) fn next_id(kind: &'static str, name: &str, len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| AnimError::IdSpaceExhausted {
        kind,
        name: name.to_string(),
        capacity: MAX_U16_IDS,
    })
}

/// Per-rig table of clip ranges, indexed densely by `StateId`
#[derive(Debug, Clone, Default)]
pub struct AnimationRangeTable {
    entries: Vec<(StateId, String, AnimationRange)>,
    by_name: HashMap<String, StateId>,
}

impl AnimationRangeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named clip, returning the state id assigned to it
    pub fn insert(&mut self, name: &str, range: AnimationRange) -> Result<StateId> {
        if !range.is_valid() {
            return Err(AnimError::MalformedRange {
                state: name.to_string(),
                start: range.start,
                end: range.end,
            });
        }
        if self.by_name.contains_key(name) {
            return Err(AnimError::DuplicateState(name.to_string()));
        }

        let id = StateId(next_id("clip", name, self.entries.len())?);
        self.entries.push((id, name.to_string(), range));
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Range of a state, if the rig declares one
    pub fn get(&self, state: StateId) -> Option<&AnimationRange> {
        self.entries.get(state.0 as usize).map(|(_, _, r)| r)
    }

    /// Look up a state id by clip name
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }

    /// Clip name of a state
    pub fn name(&self, state: StateId) -> Option<&str> {
        self.entries
            .get(state.0 as usize)
            .map(|(_, n, _)| n.as_str())
    }

    /// Number of declared states
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no state is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(state, name, range)` in state order
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &str, &AnimationRange)> {
        self.entries.iter().map(|(id, n, r)| (*id, n.as_str(), r))
    }
}
