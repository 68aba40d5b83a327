//! ═══════════════════════════════════════════════════════════════════════════════
//! VIEW CONFIG — Projection and Display Settings
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use qualia_space::{ConfigError, ProjectionConfig, QualiaResult};

/// Main view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Projection normalization
    pub projection: ProjectionConfig,

    /// Plot columns
    pub plot_width: usize,

    /// Plot rows
    pub plot_height: usize,

    /// Colored terminal output
    pub color: bool,

    /// JSON file of complex definitions replacing the built-ins
    pub complexes_file: Option<PathBuf>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            plot_width: 41,
            plot_height: 21,
            color: true,
            complexes_file: None,
        }
    }
}

impl ViewConfig {
    /// Defaults, then config file (if present), then environment
    pub fn load() -> QualiaResult<Self> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Read a specific config file
    pub fn load_from(path: &Path) -> QualiaResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: ViewConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `QUALIA_NORMALIZATION` and `QUALIA_COMPLEXES` overrides
    pub fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var("QUALIA_NORMALIZATION") {
            match raw.trim().parse::<f64>() {
                Ok(value) => self.projection.normalization = value,
                Err(_) => tracing::warn!(value = %raw, "ignoring unparsable QUALIA_NORMALIZATION"),
            }
        }

        if let Ok(path) = std::env::var("QUALIA_COMPLEXES") {
            if !path.trim().is_empty() {
                self.complexes_file = Some(PathBuf::from(path));
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.projection.validate()?;
        if self.plot_width < 3 {
            return Err(ConfigError::InvalidValue {
                field: "plot_width".to_string(),
                message: "must be at least 3".to_string(),
            });
        }
        if self.plot_height < 3 {
            return Err(ConfigError::InvalidValue {
                field: "plot_height".to_string(),
                message: "must be at least 3".to_string(),
            });
        }
        Ok(())
    }

    /// Default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qualia_space")
            .join("view.json")
    }

    /// Save to the default path
    pub fn save(&self) -> QualiaResult<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> QualiaResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
