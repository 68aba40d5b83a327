//! ═══════════════════════════════════════════════════════════════════════════════
//! COMPLEX — A Small Causal System
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! A complex is a named, ordered set of elements plus a fixed weight table.
//! Only element activity levels change after construction.
//!
//! `ComplexSpec` is the serde-facing description used for the built-in
//! examples and for complexes loaded from JSON.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::element::{Element, ElementId};
use crate::error::ValidationError;
use crate::weights::{WeightEntry, WeightTable};

/// Number of elements a projectable complex carries
pub const COMPLEX_ARITY: usize = 4;

/// Opaque complex identifier, generated at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplexId(Uuid);

impl ComplexId {
    pub fn new() -> Self {
        ComplexId(Uuid::new_v4())
    }
}

impl Default for ComplexId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComplexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A modeled system: elements plus their causal weight table
#[derive(Debug, Clone, Serialize)]
pub struct Complex {
    id: ComplexId,
    pub name: String,
    pub description: String,
    elements: Vec<Element>,
    weights: WeightTable,
}

impl Complex {
    /// Build a complex with a fresh id.
    ///
    /// No arity check happens here: a complex with other than four elements is
    /// representable and projects to the origin.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        elements: Vec<Element>,
        weights: WeightTable,
    ) -> Self {
        Self {
            id: ComplexId::new(),
            name: name.into(),
            description: description.into(),
            elements,
            weights,
        }
    }

    pub fn id(&self) -> ComplexId {
        self.id
    }

    /// Elements in position order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Activity levels in position order
    pub fn activities(&self) -> Vec<f64> {
        self.elements.iter().map(Element::activity).collect()
    }

    /// Overwrite one element's activity.
    ///
    /// Returns `(previous, new)` on success; `None` for an unknown element or a
    /// NaN level, in which case nothing changed.
    pub fn set_activity(&mut self, element: ElementId, level: f64) -> Option<(f64, f64)> {
        let el = self.elements.iter_mut().find(|e| e.id == element)?;
        let previous = el.set_activity(level)?;
        Some((previous, el.activity()))
    }

    /// Set every element in position order; extra levels are ignored
    pub fn set_activities(&mut self, levels: &[f64]) {
        for (el, level) in self.elements.iter_mut().zip(levels) {
            el.set_activity(*level);
        }
    }

    pub fn has_projectable_arity(&self) -> bool {
        self.elements.len() == COMPLEX_ARITY
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPLEX SPEC — Serializable definition
// ═══════════════════════════════════════════════════════════════════════════════

/// Declarative complex definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Initial activity per element, in position order. Element ids are 1-based
    /// positions.
    pub activities: Vec<f64>,
    #[serde(default)]
    pub weights: Vec<WeightEntry>,
}

impl ComplexSpec {
    /// Four elements at the same starting level
    pub fn uniform(
        name: impl Into<String>,
        description: impl Into<String>,
        level: f64,
        weights: Vec<WeightEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            activities: vec![level; COMPLEX_ARITY],
            weights,
        }
    }

    /// Check the definition before building.
    ///
    /// Arity is not enforced; projection handles other arities with its
    /// fallback point.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidInput {
                field: "name".to_string(),
                message: "complex name must not be empty".to_string(),
            });
        }

        if self.activities.len() > u8::MAX as usize {
            return Err(ValidationError::InvalidInput {
                field: format!("{}.activities", self.name),
                message: format!("at most {} elements supported", u8::MAX),
            });
        }

        for (i, level) in self.activities.iter().enumerate() {
            if !(0.0..=1.0).contains(level) {
                return Err(ValidationError::InvalidInput {
                    field: format!("{}.activities[{}]", self.name, i),
                    message: format!("activity {} outside [0, 1]", level),
                });
            }
        }

        let ids: HashSet<ElementId> = self.element_ids().collect();
        for entry in &self.weights {
            if entry.a == entry.b {
                return Err(ValidationError::InvalidInput {
                    field: format!("{}.weights", self.name),
                    message: format!("self-pair ({}, {}) is not a valid key", entry.a, entry.b),
                });
            }
            if !ids.contains(&entry.a) || !ids.contains(&entry.b) {
                return Err(ValidationError::InvalidInput {
                    field: format!("{}.weights", self.name),
                    message: format!("pair ({}, {}) names an unknown element", entry.a, entry.b),
                });
            }
            if !entry.weight.is_finite() {
                return Err(ValidationError::InvalidInput {
                    field: format!("{}.weights", self.name),
                    message: format!("weight for ({}, {}) is not finite", entry.a, entry.b),
                });
            }
        }

        Ok(())
    }

    fn element_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (1..=self.activities.len()).map(|i| ElementId(i as u8))
    }

    /// Validate and build a live complex with a fresh id. The name is trimmed.
    pub fn build(&self) -> Result<Complex, ValidationError> {
        self.validate()?;
        let elements = self
            .activities
            .iter()
            .enumerate()
            .map(|(i, level)| Element::new((i + 1) as u8, *level))
            .collect();
        Ok(Complex::new(
            self.name.trim(),
            self.description.clone(),
            elements,
            WeightTable::from_entries(self.weights.iter().copied()),
        ))
    }
}
