//! ═══════════════════════════════════════════════════════════════════════════════
//! QUALIA VIEW — Terminal Front End for Qualia Space
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Stands in for the rendering and plotting collaborators of the core:
//! colored cards for each complex, an ASCII scatter of their points, and an
//! interactive loop that feeds `(complex, element, level)` changes into the
//! registry.
//!
//! # Usage
//!
//! ```no_run
//! use qualia_view::{ViewConfig, ViewRunner};
//! use qualia_space::ComplexRegistry;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ViewConfig::load()?;
//!     let mut runner = ViewRunner::new(config, ComplexRegistry::builtin());
//!     runner.run()
//! }
//! ```
//!
//! ═══════════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod display;
pub mod plot;
pub mod runner;

pub use config::ViewConfig;
pub use plot::{plot_views, PlotGrid};
pub use runner::{parse_line, Input, ViewRunner};

use qualia_space::{load_specs, ComplexRegistry, Projector, QualiaResult};

/// Build the session registry from config: custom complexes file if set,
/// otherwise the built-in pair
pub fn build_registry(config: &ViewConfig) -> QualiaResult<ComplexRegistry> {
    let projector = Projector::new(config.projection.clone());
    match &config.complexes_file {
        Some(path) => {
            let specs = load_specs(path)?;
            tracing::info!(path = %path.display(), count = specs.len(), "loaded complexes");
            ComplexRegistry::from_specs(&specs, projector)
        }
        None => Ok(ComplexRegistry::builtin_with(projector)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_registry_builtin() {
        let reg = build_registry(&ViewConfig::default()).unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_build_registry_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("complexes.json");
        std::fs::write(
            &path,
            r#"[
                { "name": "Ring", "activities": [1, 1, 1, 1],
                  "weights": [
                    { "a": 1, "b": 2, "weight": 1.0 },
                    { "a": 4, "b": 1, "weight": 1.0 }
                  ] }
            ]"#,
        )
        .unwrap();

        let mut config = ViewConfig::default();
        config.complexes_file = Some(path);
        let reg = build_registry(&config).unwrap();
        assert_eq!(reg.len(), 1);
        let view = &reg.views()[0];
        assert_eq!(view.name, "Ring");
        // x: W12 + W21 = 2.0 → 0.2, y: W42 = 0
        assert!((view.point.x - 0.2).abs() < 1e-12);
        assert_eq!(view.point.y, 0.0);
    }

    #[test]
    fn test_build_registry_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("complexes.json");
        std::fs::write(&path, r#"[ { "name": "Bad", "activities": [2.0] } ]"#).unwrap();

        let mut config = ViewConfig::default();
        config.complexes_file = Some(path);
        assert!(build_registry(&config).is_err());
    }
}
