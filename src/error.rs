//! ═══════════════════════════════════════════════════════════════════════════════
//! ERROR — Unified Error Type for Qualia Space
//! ═══════════════════════════════════════════════════════════════════════════════
//! Only loading and validation paths return errors. Projection and activity
//! updates absorb every failure locally (fallback point, no-op, zero weight).
//! ═══════════════════════════════════════════════════════════════════════════════

use std::fmt;

/// The unified error type for the qualia_space crate
#[derive(Debug)]
pub enum QualiaError {
    /// I/O error (config and complex files)
    Io(std::io::Error),
    /// JSON serialization/deserialization error
    Json(serde_json::Error),
    /// Configuration error
    Config(ConfigError),
    /// Validation error
    Validation(ValidationError),
}

impl std::error::Error for QualiaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QualiaError::Io(e) => Some(e),
            QualiaError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for QualiaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualiaError::Io(e) => write!(f, "I/O error: {}", e),
            QualiaError::Json(e) => write!(f, "JSON error: {}", e),
            QualiaError::Config(e) => write!(f, "Configuration error: {}", e),
            QualiaError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl From<std::io::Error> for QualiaError {
    fn from(err: std::io::Error) -> Self {
        QualiaError::Io(err)
    }
}

impl From<serde_json::Error> for QualiaError {
    fn from(err: serde_json::Error) -> Self {
        QualiaError::Json(err)
    }
}

/// Configuration-specific errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid value
    InvalidValue { field: String, message: String },
    /// File not found
    FileNotFound(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for QualiaError {
    fn from(err: ConfigError) -> Self {
        QualiaError::Config(err)
    }
}

/// Validation errors raised while building complexes from specs
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Input validation failed
    InvalidInput { field: String, message: String },
    /// Constraint violation
    ConstraintViolation(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{}': {}", field, message)
            }
            ValidationError::ConstraintViolation(msg) => write!(f, "Constraint violation: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for QualiaError {
    fn from(err: ValidationError) -> Self {
        QualiaError::Validation(err)
    }
}

/// Type alias for Result with QualiaError
pub type QualiaResult<T> = Result<T, QualiaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QualiaError::Config(ConfigError::InvalidValue {
            field: "normalization".to_string(),
            message: "must be positive".to_string(),
        });
        assert!(err.to_string().contains("normalization"));

        let err = QualiaError::Validation(ValidationError::ConstraintViolation(
            "duplicate complex name".to_string(),
        ));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: QualiaError = io_err.into();
        assert!(matches!(err, QualiaError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_display() {
        let err: QualiaError = ConfigError::FileNotFound("/tmp/view.json".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Config file not found: /tmp/view.json");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: QualiaError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
