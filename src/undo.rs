//! Snapshot-based undo/redo history.
//!
//! Each undoable edit records a full copy of the state it replaces. Undo
//! hands back the newest recorded copy and keeps the caller's current state
//! for redo; redo does the reverse. Recording a new edit forgets anything
//! that could have been redone.

/// History limits for an [`UndoStack`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UndoConfig {
    /// Snapshots kept for undo; `None` keeps everything.
    pub max_history: Option<usize>,
}

/// Undo/redo history over whole-state snapshots.
///
/// ```
/// use msp_zones::undo::UndoStack;
///
/// let mut history: UndoStack<Vec<u32>> = UndoStack::new();
/// history.push(vec![1]);
///
/// let edited = vec![1, 2];
/// assert_eq!(history.undo(edited), Some(vec![1]));
/// assert_eq!(history.redo(vec![1]), Some(vec![1, 2]));
/// ```
#[derive(Debug, Clone)]
pub struct UndoStack<T: Clone> {
    /// Older states, newest last
    past: Vec<T>,
    /// Undone states, newest last
    future: Vec<T>,
    config: UndoConfig,
}

impl<T: Clone> Default for UndoStack<T> {
    fn default() -> Self {
        Self::with_config(UndoConfig::default())
    }
}

impl<T: Clone> UndoStack<T> {
    /// Unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history with the given limits.
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            config,
        }
    }

    /// Record `before`, the state an edit is about to replace.
    pub fn push(&mut self, before: T) {
        self.past.push(before);
        self.future.clear();

        let Some(max) = self.config.max_history else {
            return;
        };
        let excess = self.past.len().saturating_sub(max);
        if excess > 0 {
            self.past.drain(..excess);
            log::debug!("Undo: dropped {} oldest snapshot(s)", excess);
        }
    }

    /// Whether [`Self::undo`] would return a state.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether [`Self::redo`] would return a state.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Swap `current` for the newest recorded state.
    ///
    /// `current` is kept for redo. With empty history it is dropped and
    /// `None` comes back.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let restored = self.past.pop()?;
        self.future.push(current);
        Some(restored)
    }

    /// Swap `current` for the most recently undone state.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let restored = self.future.pop()?;
        self.past.push(current);
        Some(restored)
    }

    /// Snapshots available to undo.
    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    /// Snapshots available to redo.
    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    /// Forget all history in both directions.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        log::debug!("Undo history cleared");
    }
}
