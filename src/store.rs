//! In-memory shape collection with snapshot undo/redo.
//!
//! Every mutation follows the same discipline: validate, snapshot the
//! current collection onto the undo stack (which clears redo), then mutate.
//! Validation failures leave both the collection and the history untouched.

use std::collections::HashSet;

use chrono::Utc;

use crate::model::{Shape, ShapeId, ValidationError};
use crate::undo::{UndoConfig, UndoStack};

/// Shapes of the active project plus their edit history.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    history: UndoStack<Vec<Shape>>,
}

impl ShapeStore {
    /// Create an empty store with unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a history configuration.
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            shapes: Vec::new(),
            history: UndoStack::with_config(config),
        }
    }

    /// Add a shape. It receives a fresh id and creation time.
    ///
    /// Returns the assigned id, or the validation error with the store unchanged.
    pub fn add(&mut self, mut shape: Shape) -> Result<ShapeId, ValidationError> {
        shape.validate()?;

        shape.id = ShapeId::new();
        shape.created_at = Utc::now();
        let id = shape.id;

        self.checkpoint();
        self.shapes.push(shape);
        log::debug!("Added shape {} ({} total)", id, self.shapes.len());
        Ok(id)
    }

    /// Remove a shape by id. Unknown ids change nothing and record no history.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        self.checkpoint();
        let removed = self.shapes.remove(index);
        log::debug!("Removed shape {}", id);
        Some(removed)
    }

    /// Replace a shape with a new value at the same id (label or data edits).
    pub fn replace(&mut self, shape: Shape) -> Result<(), ValidationError> {
        shape.validate()?;
        let index = self
            .shapes
            .iter()
            .position(|s| s.id == shape.id)
            .ok_or(ValidationError::UnknownShape(shape.id))?;

        self.checkpoint();
        log::debug!("Replaced shape {}", shape.id);
        self.shapes[index] = shape;
        Ok(())
    }

    /// Remove every shape as a single undoable step.
    pub fn clear(&mut self) {
        if self.shapes.is_empty() {
            return;
        }
        self.checkpoint();
        log::debug!("Cleared {} shapes", self.shapes.len());
        self.shapes.clear();
    }

    /// Append a batch of shapes as a single undoable step.
    ///
    /// The whole batch is validated first. Incoming ids are kept unless they
    /// collide with an existing shape or with each other.
    pub fn merge(&mut self, shapes: Vec<Shape>) -> Result<Vec<ShapeId>, ValidationError> {
        shapes.iter().try_for_each(Shape::validate)?;
        if shapes.is_empty() {
            return Ok(Vec::new());
        }

        self.checkpoint();
        let mut taken: HashSet<ShapeId> = self.shapes.iter().map(|s| s.id).collect();
        let mut ids = Vec::with_capacity(shapes.len());
        for mut shape in shapes {
            if !taken.insert(shape.id) {
                shape.id = ShapeId::new();
                taken.insert(shape.id);
            }
            ids.push(shape.id);
            self.shapes.push(shape);
        }
        log::debug!("Merged {} shapes ({} total)", ids.len(), self.shapes.len());
        Ok(ids)
    }

    /// Replace the whole collection and drop all history.
    ///
    /// This is what loading or starting a project does; it is not undoable.
    pub fn reset(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.history.clear();
    }

    /// Restore the most recent snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = std::mem::take(&mut self.shapes);
        match self.history.undo(current) {
            Some(previous) => {
                self.shapes = previous;
                log::debug!("Undo: {} shapes", self.shapes.len());
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone state. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = std::mem::take(&mut self.shapes);
        match self.history.redo(current) {
            Some(next) => {
                self.shapes = next;
                log::debug!("Redo: {} shapes", self.shapes.len());
                true
            }
            None => false,
        }
    }

    /// Get a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// All shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the store holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    /// Number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    fn checkpoint(&mut self) {
        self.history.push(self.shapes.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, Geometry, ZoneData, ZoneType};

    fn point(lat: f64, lon: f64) -> Shape {
        Shape::new(
            ZoneType::SurveySite,
            Geometry::Point {
                position: Coordinate::new(lat, lon),
            },
        )
    }

    fn triangle() -> Shape {
        Shape::new(
            ZoneType::ProtectedArea,
            Geometry::Polygon {
                positions: vec![
                    Coordinate::new(0.0, 0.0),
                    Coordinate::new(0.0, 1.0),
                    Coordinate::new(1.0, 0.5),
                ],
            },
        )
    }

    #[test]
    fn test_add_assigns_fresh_id() {
        let mut store = ShapeStore::new();
        let shape = point(1.0, 1.0);
        let original_id = shape.id;
        let id = store.add(shape).unwrap();
        assert_ne!(id, original_id);
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_some());
        assert!(store.can_undo());
    }

    #[test]
    fn test_two_point_polygon_rejected() {
        let mut store = ShapeStore::new();
        store.add(point(0.0, 0.0)).unwrap();

        let bad = Shape::new(
            ZoneType::FishingZone,
            Geometry::Polygon {
                positions: vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
            },
        );
        assert!(matches!(
            store.add(bad),
            Err(ValidationError::TooFewPositions { .. })
        ));
        assert_eq!(store.len(), 1);
        assert_eq!(store.undo_count(), 1);
    }

    #[test]
    fn test_undo_all_returns_to_empty_then_redo_restores() {
        let mut store = ShapeStore::new();
        let a = store.add(point(0.0, 0.0)).unwrap();
        store.add(triangle()).unwrap();
        store.remove(a).unwrap();
        store.add(point(2.0, 2.0)).unwrap();
        store.clear();
        let final_state = store.shapes().to_vec();
        let mutations = 5;

        for _ in 0..mutations {
            assert!(store.undo());
        }
        assert!(store.is_empty());
        assert!(!store.undo());

        for _ in 0..mutations {
            assert!(store.redo());
        }
        assert_eq!(store.shapes(), final_state.as_slice());
        assert!(!store.redo());
    }

    #[test]
    fn test_undo_then_redo_is_identity() {
        let mut store = ShapeStore::new();
        store.add(point(0.0, 0.0)).unwrap();
        store.add(triangle()).unwrap();
        let before = store.shapes().to_vec();

        assert!(store.undo());
        assert_eq!(store.len(), 1);
        assert!(store.redo());
        assert_eq!(store.shapes(), before.as_slice());
    }

    #[test]
    fn test_clear_is_one_step() {
        let mut store = ShapeStore::new();
        for i in 0..4 {
            store.add(point(i as f64, 0.0)).unwrap();
        }
        let before = store.shapes().to_vec();
        let steps = store.undo_count();

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.undo_count(), steps + 1);

        assert!(store.undo());
        assert_eq!(store.shapes(), before.as_slice());
    }

    #[test]
    fn test_clear_empty_records_nothing() {
        let mut store = ShapeStore::new();
        store.clear();
        assert!(!store.can_undo());
    }

    #[test]
    fn test_mutation_clears_redo() {
        let mut store = ShapeStore::new();
        store.add(point(0.0, 0.0)).unwrap();
        store.undo();
        assert!(store.can_redo());

        store.add(point(1.0, 1.0)).unwrap();
        assert!(!store.can_redo());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = ShapeStore::new();
        store.add(point(0.0, 0.0)).unwrap();
        assert!(store.remove(ShapeId::new()).is_none());
        assert_eq!(store.undo_count(), 1);
    }

    #[test]
    fn test_replace_keeps_id_and_is_undoable() {
        let mut store = ShapeStore::new();
        let id = store.add(triangle()).unwrap();
        let edited = store
            .get(id)
            .unwrap()
            .clone()
            .with_label("No-take reef")
            .with_data(ZoneData::Protection {
                designation: "no-take".to_string(),
                restrictions: vec!["anchoring".to_string()],
            });

        store.replace(edited).unwrap();
        assert_eq!(store.get(id).unwrap().label.as_deref(), Some("No-take reef"));

        store.undo();
        assert!(store.get(id).unwrap().label.is_none());

        let stranger = point(0.0, 0.0);
        let stranger_id = stranger.id;
        assert_eq!(
            store.replace(stranger),
            Err(ValidationError::UnknownShape(stranger_id))
        );
    }

    #[test]
    fn test_merge_is_one_step_and_keeps_ids() {
        let mut store = ShapeStore::new();
        let existing = store.add(point(0.0, 0.0)).unwrap();

        let incoming = vec![point(1.0, 1.0), triangle()];
        let incoming_ids: Vec<_> = incoming.iter().map(|s| s.id).collect();
        let ids = store.merge(incoming).unwrap();
        assert_eq!(ids, incoming_ids);
        assert_eq!(store.len(), 3);

        store.undo();
        assert_eq!(store.len(), 1);
        assert!(store.get(existing).is_some());
    }

    #[test]
    fn test_merge_reassigns_colliding_ids() {
        let mut store = ShapeStore::new();
        let id = store.add(point(0.0, 0.0)).unwrap();
        let mut dup = point(1.0, 1.0);
        dup.id = id;

        let ids = store.merge(vec![dup]).unwrap();
        assert_ne!(ids[0], id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_merge_invalid_batch_untouched() {
        let mut store = ShapeStore::new();
        let bad = Shape::new(
            ZoneType::ResearchZone,
            Geometry::Circle {
                center: Coordinate::new(0.0, 0.0),
                radius_m: 0.0,
            },
        );
        assert!(store.merge(vec![point(0.0, 0.0), bad]).is_err());
        assert!(store.is_empty());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_reset_drops_history() {
        let mut store = ShapeStore::new();
        store.add(point(0.0, 0.0)).unwrap();
        store.add(point(1.0, 0.0)).unwrap();
        store.undo();

        store.reset(vec![triangle()]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.undo_count(), 0);
        assert_eq!(store.redo_count(), 0);
    }

    #[test]
    fn test_history_cap() {
        let mut store = ShapeStore::with_config(UndoConfig {
            max_history: Some(2),
        });
        for i in 0..5 {
            store.add(point(i as f64, 0.0)).unwrap();
        }
        assert_eq!(store.undo_count(), 2);
        store.undo();
        store.undo();
        assert_eq!(store.len(), 3);
    }
}
