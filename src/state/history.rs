//! Undo history of editor snapshots

use super::editor::EditorState;
use std::collections::VecDeque;

/// Default number of snapshots kept for undo
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded stack of previous editor snapshots.
///
/// Snapshots are never mutated after being produced by the reducer, so
/// storing them as-is is enough to restore an earlier state.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: VecDeque<EditorState>,
    capacity: usize,
}

impl SnapshotHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Remember `snapshot` as the state to return to on the next undo.
    /// The oldest snapshot is dropped once the capacity is reached.
    pub fn record(&mut self, snapshot: EditorState) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Take the most recent snapshot
    pub fn undo(&mut self) -> Option<EditorState> {
        self.snapshots.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}
