//! ═══════════════════════════════════════════════════════════════════════════════
//! REGISTRY — The Session's Complexes
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Owns every complex for the lifetime of the session. Built once at startup,
//! mutated in place by activity updates, never torn down before exit.
//!
//! Change detection for the front end:
//! - `revision()` increments on every successful update (polling)
//! - `subscribe()` hands out a channel of `ActivityChange` notifications
//!
//! Updates against an unknown complex or element are silent no-ops.
//! ═══════════════════════════════════════════════════════════════════════════════

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;

use crate::complex::{Complex, ComplexId, ComplexSpec};
use crate::element::ElementId;
use crate::error::{QualiaResult, ValidationError};
use crate::projection::{Projector, QualiaPoint};
use crate::weights::WeightEntry;

/// Pending notifications per subscriber before it is dropped
const SUBSCRIBER_CAPACITY: usize = 64;

/// Starting activity for every built-in element
const SEED_ACTIVITY: f64 = 0.5;

/// One applied activity change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityChange {
    pub complex: ComplexId,
    pub element: ElementId,
    pub previous: f64,
    pub level: f64,
    pub revision: u64,
}

/// Render snapshot of one complex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexView {
    pub id: ComplexId,
    pub name: String,
    pub description: String,
    pub activities: Vec<(ElementId, f64)>,
    pub point: QualiaPoint,
}

/// The two shipped example definitions
pub fn builtin_specs() -> Vec<ComplexSpec> {
    vec![
        ComplexSpec::uniform(
            "Divergent",
            "Element 1 drives every other element; the rest are causally isolated",
            SEED_ACTIVITY,
            vec![
                WeightEntry::new(1, 2, 2.5),
                WeightEntry::new(1, 3, 2.5),
                WeightEntry::new(1, 4, 2.5),
            ],
        ),
        ComplexSpec::uniform(
            "Chain",
            "Elements pass influence along a line 1 → 2 → 3 → 4",
            SEED_ACTIVITY,
            vec![
                WeightEntry::new(1, 2, 2.5),
                WeightEntry::new(2, 3, 2.5),
                WeightEntry::new(3, 4, 2.5),
            ],
        ),
    ]
}

/// Process-wide store of complexes
pub struct ComplexRegistry {
    complexes: Vec<Complex>,
    seeds: Vec<Vec<f64>>,
    projector: Projector,
    revision: u64,
    subscribers: Vec<Sender<ActivityChange>>,
}

impl ComplexRegistry {
    /// Registry holding "Divergent" and "Chain"
    pub fn builtin() -> Self {
        Self::builtin_with(Projector::default())
    }

    /// Built-in complexes with a custom projector
    pub fn builtin_with(projector: Projector) -> Self {
        let complexes = builtin_specs()
            .iter()
            .filter_map(|spec| match spec.build() {
                Ok(complex) => Some(complex),
                Err(e) => {
                    tracing::error!(
                        complex = %spec.name,
                        error = %e,
                        "built-in complex is invalid"
                    );
                    None
                }
            })
            .collect();
        Self::from_complexes(complexes, projector)
    }

    /// Build from declarative specs. Names must be unique (case-insensitive).
    pub fn from_specs(specs: &[ComplexSpec], projector: Projector) -> QualiaResult<Self> {
        if specs.is_empty() {
            return Err(ValidationError::ConstraintViolation(
                "at least one complex is required".to_string(),
            )
            .into());
        }

        let mut complexes: Vec<Complex> = Vec::with_capacity(specs.len());
        for spec in specs {
            if complexes.iter().any(|c| c.name.eq_ignore_ascii_case(spec.name.trim())) {
                return Err(ValidationError::ConstraintViolation(format!(
                    "duplicate complex name '{}'",
                    spec.name
                ))
                .into());
            }
            complexes.push(spec.build()?);
        }

        Ok(Self::from_complexes(complexes, projector))
    }

    fn from_complexes(complexes: Vec<Complex>, projector: Projector) -> Self {
        for complex in &complexes {
            projector.check_table(&complex.name, complex.weights());
            if !complex.has_projectable_arity() {
                tracing::warn!(
                    complex = %complex.name,
                    elements = complex.elements().len(),
                    "complex will always project to the origin"
                );
            }
        }
        let seeds = complexes.iter().map(Complex::activities).collect();
        Self {
            complexes,
            seeds,
            projector,
            revision: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.complexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complexes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Complex> {
        self.complexes.iter()
    }

    pub fn ids(&self) -> Vec<ComplexId> {
        self.complexes.iter().map(Complex::id).collect()
    }

    pub fn get(&self, id: ComplexId) -> Option<&Complex> {
        self.complexes.iter().find(|c| c.id() == id)
    }

    /// Case-insensitive name lookup
    pub fn find_by_name(&self, name: &str) -> Option<&Complex> {
        self.complexes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Successful updates applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Overwrite one element's activity in place.
    ///
    /// Unknown complex, unknown element, or a NaN level leave all state
    /// unchanged and return `None`.
    pub fn update_activity(
        &mut self,
        complex: ComplexId,
        element: ElementId,
        level: f64,
    ) -> Option<ActivityChange> {
        let Some(target) = self.complexes.iter_mut().find(|c| c.id() == complex) else {
            tracing::debug!(%complex, "activity update for unknown complex ignored");
            return None;
        };

        let Some((previous, applied)) = target.set_activity(element, level) else {
            tracing::debug!(complex = %target.name, %element, level, "activity update ignored");
            return None;
        };

        if applied != level {
            tracing::debug!(complex = %target.name, %element, level, applied, "activity clamped");
        }

        self.revision += 1;
        let change = ActivityChange {
            complex,
            element,
            previous,
            level: applied,
            revision: self.revision,
        };
        tracing::debug!(
            complex = %target.name,
            %element,
            previous,
            level = applied,
            revision = self.revision,
            "activity updated"
        );
        self.publish(change);
        Some(change)
    }

    /// Update by complex name (case-insensitive)
    pub fn update_activity_by_name(
        &mut self,
        name: &str,
        element: ElementId,
        level: f64,
    ) -> Option<ActivityChange> {
        let id = self.find_by_name(name)?.id();
        self.update_activity(id, element, level)
    }

    /// Point for one complex, `None` if the id is unknown
    pub fn compute_point(&self, id: ComplexId) -> Option<QualiaPoint> {
        self.get(id).map(|c| self.projector.project(c))
    }

    /// Render snapshots for every complex, in registration order
    pub fn views(&self) -> Vec<ComplexView> {
        self.complexes.iter().map(|c| self.view_of(c)).collect()
    }

    pub fn view(&self, id: ComplexId) -> Option<ComplexView> {
        self.get(id).map(|c| self.view_of(c))
    }

    fn view_of(&self, complex: &Complex) -> ComplexView {
        ComplexView {
            id: complex.id(),
            name: complex.name.clone(),
            description: complex.description.clone(),
            activities: complex
                .elements()
                .iter()
                .map(|e| (e.id, e.activity()))
                .collect(),
            point: self.projector.project(complex),
        }
    }

    /// Restore every element to its seeded activity
    pub fn reset(&mut self) {
        for (complex, seed) in self.complexes.iter_mut().zip(&self.seeds) {
            complex.set_activities(seed);
        }
        self.revision += 1;
        tracing::debug!(revision = self.revision, "registry reset to seeded activities");
    }

    /// Receive a notification for each successful update
    pub fn subscribe(&mut self) -> Receiver<ActivityChange> {
        let (tx, rx) = bounded(SUBSCRIBER_CAPACITY);
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, change: ActivityChange) {
        self.subscribers.retain(|tx| match tx.try_send(change) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("dropping subscriber with a full notification queue");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }
}

impl Default for ComplexRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionConfig;

    fn snapshot(reg: &ComplexRegistry) -> Vec<Vec<f64>> {
        reg.iter().map(Complex::activities).collect()
    }

    #[test]
    fn test_builtin_has_two_named_complexes() {
        let reg = ComplexRegistry::builtin();
        assert_eq!(reg.len(), 2);
        let names: Vec<&str> = reg.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Divergent", "Chain"]);
        for c in reg.iter() {
            assert_eq!(c.elements().len(), 4);
            assert_eq!(c.activities(), vec![SEED_ACTIVITY; 4]);
        }
    }

    #[test]
    fn test_builtin_tables() {
        let reg = ComplexRegistry::builtin();
        let divergent = reg.find_by_name("divergent").unwrap().weights();
        assert_eq!(divergent.w(1, 4), 2.5);
        assert_eq!(divergent.w(2, 3), 0.0);

        let chain = reg.find_by_name("CHAIN").unwrap().weights();
        assert_eq!(chain.w(3, 2), 2.5);
        assert_eq!(chain.w(1, 3), 0.0);
    }

    #[test]
    fn test_update_moves_only_target_point() {
        let mut reg = ComplexRegistry::builtin();
        let ids = reg.ids();
        let before_chain = reg.compute_point(ids[1]).unwrap();

        let change = reg.update_activity(ids[0], ElementId(1), 1.0).unwrap();
        assert_eq!(change.previous, 0.5);
        assert_eq!(change.level, 1.0);
        assert_eq!(change.revision, 1);

        let divergent = reg.compute_point(ids[0]).unwrap();
        // x: 1.0*2.5 + 0.5*2.5, y: 1.0*2.5 + 0.5*2.5
        assert!((divergent.x - 0.375).abs() < 1e-12);
        assert!((divergent.y - 0.375).abs() < 1e-12);
        assert_eq!(reg.compute_point(ids[1]).unwrap(), before_chain);
    }

    #[test]
    fn test_unknown_complex_is_noop() {
        let mut reg = ComplexRegistry::builtin();
        let before = snapshot(&reg);
        assert!(reg.update_activity(ComplexId::new(), ElementId(1), 0.9).is_none());
        assert_eq!(snapshot(&reg), before);
        assert_eq!(reg.revision(), 0);
    }

    #[test]
    fn test_unknown_element_is_noop() {
        let mut reg = ComplexRegistry::builtin();
        let id = reg.ids()[0];
        let before = snapshot(&reg);
        assert!(reg.update_activity(id, ElementId(5), 0.9).is_none());
        assert!(reg.update_activity(id, ElementId(0), 0.9).is_none());
        assert!(reg.update_activity_by_name("Nope", ElementId(1), 0.9).is_none());
        assert_eq!(snapshot(&reg), before);
    }

    #[test]
    fn test_nan_update_is_noop() {
        let mut reg = ComplexRegistry::builtin();
        let id = reg.ids()[1];
        assert!(reg.update_activity(id, ElementId(2), f64::NAN).is_none());
        assert_eq!(reg.get(id).unwrap().activities(), vec![0.5; 4]);
    }

    #[test]
    fn test_update_clamps_level() {
        let mut reg = ComplexRegistry::builtin();
        let change = reg
            .update_activity_by_name("Chain", ElementId(4), 2.0)
            .unwrap();
        assert_eq!(change.level, 1.0);
    }

    #[test]
    fn test_subscribers_receive_changes() {
        let mut reg = ComplexRegistry::builtin();
        let rx = reg.subscribe();
        let id = reg.ids()[0];

        reg.update_activity(id, ElementId(2), 0.1);
        reg.update_activity(id, ElementId(9), 0.1);
        reg.update_activity(id, ElementId(3), 0.2);

        let received: Vec<ActivityChange> = rx.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].element, ElementId(2));
        assert_eq!(received[1].revision, 2);
    }

    #[test]
    fn test_disconnected_subscriber_is_pruned() {
        let mut reg = ComplexRegistry::builtin();
        let rx = reg.subscribe();
        drop(rx);
        let id = reg.ids()[0];
        assert!(reg.update_activity(id, ElementId(1), 0.3).is_some());
        assert!(reg.subscribers.is_empty());
    }

    #[test]
    fn test_full_subscriber_is_dropped() {
        let mut reg = ComplexRegistry::builtin();
        let rx = reg.subscribe();
        let id = reg.ids()[0];

        for i in 0..70 {
            let level = if i % 2 == 0 { 0.1 } else { 0.9 };
            assert!(reg.update_activity(id, ElementId(1), level).is_some());
        }
        assert!(reg.subscribers.is_empty());
        assert_eq!(rx.try_iter().count(), SUBSCRIBER_CAPACITY);

        // Dropped for good: draining does not re-register it
        reg.update_activity(id, ElementId(1), 0.4);
        assert!(rx.try_recv().is_err());
        assert_eq!(reg.revision(), 71);
    }

    #[test]
    fn test_builtin_specs_all_build() {
        for spec in builtin_specs() {
            assert!(spec.validate().is_ok(), "{}", spec.name);
        }
        assert_eq!(ComplexRegistry::builtin().len(), builtin_specs().len());
    }

    #[test]
    fn test_reset_restores_seeds() {
        let mut reg = ComplexRegistry::builtin();
        reg.update_activity_by_name("Divergent", ElementId(1), 0.9);
        reg.update_activity_by_name("Chain", ElementId(4), 0.0);
        reg.reset();
        for c in reg.iter() {
            assert_eq!(c.activities(), vec![SEED_ACTIVITY; 4]);
        }
        assert_eq!(reg.revision(), 3);
    }

    #[test]
    fn test_views_carry_points() {
        let reg = ComplexRegistry::builtin();
        let views = reg.views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "Divergent");
        assert_eq!(views[0].point, QualiaPoint::new(0.25, 0.25));
        assert_eq!(views[1].point, QualiaPoint::new(0.5, 0.0));
        assert_eq!(views[1].activities[3], (ElementId(4), 0.5));
    }

    #[test]
    fn test_from_specs_rejects_duplicates_and_empty() {
        let mut specs = builtin_specs();
        specs[1].name = "divergent".to_string();
        assert!(ComplexRegistry::from_specs(&specs, Projector::default()).is_err());
        assert!(ComplexRegistry::from_specs(&[], Projector::default()).is_err());
    }

    #[test]
    fn test_from_specs_names_are_trimmed() {
        let mut specs = builtin_specs();
        specs[1].name = " divergent ".to_string();
        assert!(ComplexRegistry::from_specs(&specs, Projector::default()).is_err());

        let mut specs = builtin_specs();
        specs[1].name = " Chain".to_string();
        let reg = ComplexRegistry::from_specs(&specs, Projector::default()).unwrap();
        assert_eq!(reg.find_by_name("Chain").map(|c| c.name.as_str()), Some("Chain"));
    }

    #[test]
    fn test_from_specs_uses_projector() {
        let projector = Projector::new(ProjectionConfig { normalization: 5.0 });
        let reg = ComplexRegistry::from_specs(&builtin_specs(), projector).unwrap();
        assert_eq!(reg.views()[1].point, QualiaPoint::new(1.0, 0.0));
    }
}
