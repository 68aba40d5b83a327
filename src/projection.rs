//! ═══════════════════════════════════════════════════════════════════════════════
//! PROJECTION — Complex State → Qualia-Space Point
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Closed-form weighted sum over the four activity levels of a complex:
//!
//!   x_raw = a0·W(1,2) + a1·W(2,1) + a2·W(3,4) + a3·W(4,3)
//!   y_raw = a0·W(1,3) + a1·W(2,4) + a2·W(3,1) + a3·W(4,2)
//!
//! Both axes are divided by a fixed normalization constant. The constant is
//! configuration and is never derived from the table at runtime. Any arity
//! other than four projects to the origin.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::complex::{Complex, COMPLEX_ARITY};
use crate::element::Element;
use crate::error::ConfigError;
use crate::weights::WeightTable;

/// Normalization that keeps the shipped example tables inside the unit square
pub const DEFAULT_NORMALIZATION: f64 = 10.0;

/// Point in the 2D conceptual space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualiaPoint {
    pub x: f64,
    pub y: f64,
}

impl QualiaPoint {
    pub const ORIGIN: QualiaPoint = QualiaPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_within_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Euclidean distance
    pub fn distance(&self, other: &QualiaPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Divisor applied to both raw axes
    pub normalization: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            normalization: DEFAULT_NORMALIZATION,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.normalization.is_finite() || self.normalization <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "projection.normalization".to_string(),
                message: format!("must be a positive finite number, got {}", self.normalization),
            });
        }
        Ok(())
    }
}

/// Pure projection from complex state to a point
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectionConfig,
}

impl Projector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project a complex's current activities
    pub fn project(&self, complex: &Complex) -> QualiaPoint {
        self.project_elements(complex.elements(), complex.weights())
    }

    /// Project an activity snapshot against a table
    pub fn project_elements(&self, elements: &[Element], weights: &WeightTable) -> QualiaPoint {
        if elements.len() != COMPLEX_ARITY {
            return QualiaPoint::ORIGIN;
        }

        let ax = elements[0].activity();
        let ay = elements[1].activity();
        let bx = elements[2].activity();
        let by = elements[3].activity();

        let x_raw = ax * weights.w(1, 2)
            + ay * weights.w(2, 1)
            + bx * weights.w(3, 4)
            + by * weights.w(4, 3);
        let y_raw = ax * weights.w(1, 3)
            + ay * weights.w(2, 4)
            + bx * weights.w(3, 1)
            + by * weights.w(4, 2);

        let n = self.config.normalization;
        QualiaPoint::new(x_raw / n, y_raw / n)
    }

    /// Whether every point this table can produce stays within the display
    /// range for the configured normalization. Logs a warning when it does not.
    pub fn check_table(&self, name: &str, weights: &WeightTable) -> bool {
        let bound = weights.projection_bound();
        if bound > self.config.normalization {
            tracing::warn!(
                complex = name,
                bound,
                normalization = self.config.normalization,
                "weight table can project outside the unit display range"
            );
            return false;
        }
        true
    }
}

/// Project with the default normalization
pub fn compute_point(complex: &Complex) -> QualiaPoint {
    Projector::default().project(complex)
}
