//! ═══════════════════════════════════════════════════════════════════════════════
//! QUALIA SPACE — Toy Projection of Small Causal Complexes
//! ═══════════════════════════════════════════════════════════════════════════════
//! Two example four-element systems, each with a fixed symmetric weight table.
//! Activity levels change; a closed-form weighted sum places each system in a
//! 2D "qualia space". Same activities, different tables, different points.
//! ═══════════════════════════════════════════════════════════════════════════════

#![allow(clippy::new_without_default)]
#![allow(clippy::doc_lazy_continuation)]

// ═══════════════════════════════════════════════════════════════════════════════
// DATA MODEL
// ═══════════════════════════════════════════════════════════════════════════════

pub mod complex;
pub mod element;
pub mod weights;

// ═══════════════════════════════════════════════════════════════════════════════
// PROJECTION + REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

pub mod projection;
pub mod registry;

// ═══════════════════════════════════════════════════════════════════════════════
// SUPPORT
// ═══════════════════════════════════════════════════════════════════════════════

pub mod error;

pub use complex::{Complex, ComplexId, ComplexSpec, COMPLEX_ARITY};
pub use element::{Element, ElementId};
pub use error::{ConfigError, QualiaError, QualiaResult, ValidationError};
pub use projection::{
    compute_point, ProjectionConfig, Projector, QualiaPoint, DEFAULT_NORMALIZATION,
};
pub use registry::{builtin_specs, ActivityChange, ComplexRegistry, ComplexView};
pub use weights::{PairKey, WeightEntry, WeightTable};

/// Load complex definitions from a JSON file (an array of `ComplexSpec`)
pub fn load_specs(path: &std::path::Path) -> QualiaResult<Vec<ComplexSpec>> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()).into());
    }
    let contents = std::fs::read_to_string(path)?;
    let specs: Vec<ComplexSpec> = serde_json::from_str(&contents)?;
    for spec in &specs {
        spec.validate()?;
    }
    Ok(specs)
}
