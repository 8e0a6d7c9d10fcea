//! Linear undo/redo history.
//!
//! The history is a list of immutable snapshots plus a cursor. The first
//! entry is always the state the history was created with, so undoing the
//! first real edit lands on a well-defined state instead of underflowing.
//! Committing after an undo discards everything after the cursor.

use std::collections::VecDeque;

/// Default number of entries kept, including the initial one.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Linear history over snapshots of type `T`.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    index: usize,
    limit: usize,
}

impl<T: Clone> History<T> {
    /// Create a history whose only entry is `initial`.
    ///
    /// `limit` is clamped to at least 1.
    pub fn new(initial: T, limit: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Append a snapshot after the current entry.
    ///
    /// Any redo-able entries are discarded first. When the history grows past
    /// its limit the oldest entries are dropped.
    pub fn commit(&mut self, snapshot: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry and return it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward one entry and return it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The entry the cursor points at.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.index)
    }

    /// Position of the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of entries, including the initial one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every entry and start over from `initial`.
    pub fn clear(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_initial_entry() {
        let history = History::new("empty", 10);
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert_eq!(history.current(), Some(&"empty"));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_at_oldest_is_noop() {
        let mut history = History::new(0, 10);
        assert!(history.undo().is_none());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut history = History::new(0, 10);
        history.commit(1);
        assert!(history.redo().is_none());
        assert_eq!(history.current(), Some(&1));
    }

    #[test]
    fn test_undo_returns_previous() {
        let mut history = History::new(0, 10);
        history.commit(1);
        history.commit(2);
        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), Some(&0));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_commit_after_undo_discards_future() {
        let mut history = History::new("init", 10);
        history.commit("A");
        history.commit("B");
        history.undo();
        history.commit("C");

        assert!(history.redo().is_none());
        assert_eq!(history.current(), Some(&"C"));
        assert_eq!(history.undo(), Some(&"A"));
        // B is gone for good.
        assert_eq!(history.redo(), Some(&"C"));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new(0, 10);
        for i in 1..=5 {
            history.commit(i);
        }
        for _ in 0..3 {
            let before = *history.current().unwrap();
            history.undo();
            assert_eq!(history.redo(), Some(&before));
            history.undo();
        }
        assert_eq!(history.current(), Some(&2));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(0, 3);
        history.commit(1);
        history.commit(2);
        history.commit(3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.undo(), Some(&2));
        assert_eq!(history.undo(), Some(&1));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_zero_limit_keeps_one_entry() {
        let mut history = History::new(0, 0);
        history.commit(1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&1));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_clear_resets() {
        let mut history = History::new(0, 10);
        history.commit(1);
        history.clear(7);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&7));
    }
}
