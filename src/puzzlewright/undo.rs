//! The host undo collaborator seam.
//!
//! The editing session calls [`UndoSink::record`] with the pre-mutation
//! document and a human-readable label before applying every structural
//! change. What the host does with the snapshot is its business; this crate
//! never replays one. [`SnapshotUndo`] is a ready-made in-memory sink for
//! hosts without their own undo system (and for tests that need to observe
//! the record-before-mutate contract).

use crate::model::Puzzle;

/// Receives a snapshot of the document before each structural mutation.
///
/// Fire-and-forget from the session's perspective: recording cannot fail
/// and never blocks a mutation.
pub trait UndoSink {
    fn record(&mut self, puzzle: &Puzzle, label: &str);
}

/// For hosts with no undo system.
#[derive(Debug, Default)]
pub struct NullUndo;

impl UndoSink for NullUndo {
    fn record(&mut self, _puzzle: &Puzzle, _label: &str) {}
}

#[derive(Debug, Clone)]
pub struct UndoEntry {
    pub label: String,
    pub snapshot: Puzzle,
}

const DEFAULT_UNDO_LIMIT: usize = 64;

/// A bounded stack of labeled document snapshots.
///
/// When the limit is reached the oldest entry is discarded.
#[derive(Debug)]
pub struct SnapshotUndo {
    limit: usize,
    entries: Vec<UndoEntry>,
}

impl SnapshotUndo {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            entries: Vec::new(),
        }
    }

    /// Most recent entry without removing it.
    pub fn last(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    /// Pop the most recent entry. The caller restores the snapshot itself,
    /// typically via `PuzzleApi::load`.
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SnapshotUndo {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoSink for SnapshotUndo {
    fn record(&mut self, puzzle: &Puzzle, label: &str) {
        if self.entries.len() == self.limit {
            self.entries.remove(0);
        }
        self.entries.push(UndoEntry {
            label: label.to_string(),
            snapshot: puzzle.clone(),
        });
    }
}
