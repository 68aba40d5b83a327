//! ═══════════════════════════════════════════════════════════════════════════════
//! ELEMENT — One Component of a Complex
//! ═══════════════════════════════════════════════════════════════════════════════
//! Each element carries a single activity level in [0, 1]. Elements are created
//! once with their complex and only their activity ever changes.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest activity an element can hold
pub const MIN_ACTIVITY: f64 = 0.0;

/// Highest activity an element can hold
pub const MAX_ACTIVITY: f64 = 1.0;

/// Element identifier, unique within its complex (conventionally 1..=4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u8);

impl ElementId {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for ElementId {
    fn from(id: u8) -> Self {
        ElementId(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single element and its current activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: ElementId,
    activity: f64,
}

impl Element {
    /// Create an element; the initial activity is clamped into [0, 1]
    pub fn new(id: u8, activity: f64) -> Self {
        Self {
            id: ElementId(id),
            activity: clamp_activity(activity).unwrap_or(MIN_ACTIVITY),
        }
    }

    /// Current activity level
    pub fn activity(&self) -> f64 {
        self.activity
    }

    /// Overwrite the activity level.
    ///
    /// Out-of-range values are clamped. NaN is rejected and leaves the element
    /// untouched. Returns the previous level when a write happened.
    pub fn set_activity(&mut self, level: f64) -> Option<f64> {
        let level = clamp_activity(level)?;
        let previous = self.activity;
        self.activity = level;
        Some(previous)
    }
}

/// Clamp a level into the activity domain. `None` for NaN.
pub fn clamp_activity(level: f64) -> Option<f64> {
    if level.is_nan() {
        return None;
    }
    Some(level.clamp(MIN_ACTIVITY, MAX_ACTIVITY))
}
