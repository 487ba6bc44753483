//! # The Editing Session
//!
//! [`PuzzleApi`] is the single entry point for all puzzle editing
//! operations, regardless of the host driving it. It owns at most one
//! loaded puzzle at a time plus the two collaborators every edit runs
//! through: the document store and the host undo sink.
//!
//! ## Role and Responsibilities
//!
//! The session:
//! - **Owns** the loaded document; hosts read it via [`PuzzleApi::loaded`]
//!   and change it only through the operations here
//! - **Records undo** with the pre-mutation document *before* applying any
//!   structural change
//! - **Marks the store dirty** after every applied change
//!
//! ## What the Session Does NOT Do
//!
//! - **Presentation**: no dialogs, no strings formatted for a screen;
//!   failures come back as [`PuzzleError`] values for the host to present
//! - **Undo replay**: snapshots go to the [`UndoSink`]; restoring one is
//!   the host's call (typically via [`PuzzleApi::load`])
//!
//! ## Atomicity
//!
//! No operation partially mutates state and then fails: preconditions
//! (loaded document, index bounds, argument validity) are checked before
//! the undo record, so a failed call leaves the document, the store, and
//! the undo stack exactly as they were.
//!
//! ## Generic Over Collaborators
//!
//! `PuzzleApi<S: DocumentStore, U: UndoSink>` works against any store and
//! undo implementation:
//! - Production: `PuzzleApi<FileStore, HostUndo>`
//! - Testing: `PuzzleApi<InMemoryStore, SnapshotUndo>`
//!
//! There is deliberately no global "current puzzle": a session is an
//! ordinary value, so a host can keep several open documents by keeping
//! several sessions.

use crate::codec;
use crate::error::{PuzzleError, Result};
use crate::model::{InteractableType, LogicType, Puzzle, PuzzleStep};
use crate::store::{DocumentMeta, DocumentStore, RefreshReport};
use crate::undo::UndoSink;
use crate::validate;
use std::fs;
use std::path::Path;

/// Explicit field list for editing one step.
///
/// `None` leaves a field untouched. The id is editable (hosts expose it as
/// a text field); the validation pass reports the collisions and blanks
/// that can result.
#[derive(Debug, Clone, Default)]
pub struct StepUpdate {
    pub id: Option<String>,
    pub description: Option<String>,
    pub required_object_id: Option<String>,
    pub interactable_id: Option<String>,
    pub expected_type: Option<InteractableType>,
    pub is_optional: Option<bool>,
    pub requires_sequence: Option<bool>,
}

/// Explicit field list for editing the outcome. The generated outcome id
/// is not editable.
#[derive(Debug, Clone, Default)]
pub struct OutcomeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unlocks_path: Option<bool>,
    pub path_id_to_unlock: Option<String>,
    pub gives_reward: Option<bool>,
    pub reward_item_id: Option<String>,
    pub ends_puzzle: Option<bool>,
}

/// The puzzle editing session.
pub struct PuzzleApi<S: DocumentStore, U: UndoSink> {
    store: S,
    undo: U,
    loaded: Option<Puzzle>,
}

impl<S: DocumentStore, U: UndoSink> PuzzleApi<S, U> {
    pub fn new(store: S, undo: U) -> Self {
        Self {
            store,
            undo,
            loaded: None,
        }
    }

    // --- Loading ---

    /// Create a fresh step-based puzzle, register it with the store, and
    /// load it.
    pub fn create_puzzle(&mut self, name: impl Into<String>) -> Result<&Puzzle> {
        let puzzle = Puzzle::new(name);
        self.store.create(&puzzle)?;
        Ok(self.loaded.insert(puzzle))
    }

    /// Replace the loaded puzzle with one the caller already has.
    /// Does not persist anything.
    pub fn load(&mut self, puzzle: Puzzle) {
        self.loaded = Some(puzzle);
    }

    /// Resolve a stored reference and load the document.
    pub fn open(&mut self, id: &str) -> Result<&Puzzle> {
        let puzzle = self.store.open(id)?;
        Ok(self.loaded.insert(puzzle))
    }

    /// Clear the current selection, handing the document back if one was
    /// loaded.
    pub fn unload(&mut self) -> Option<Puzzle> {
        self.loaded.take()
    }

    /// The currently loaded puzzle, if any. Never fails.
    pub fn loaded(&self) -> Option<&Puzzle> {
        self.loaded.as_ref()
    }

    // --- Structural mutation ---

    /// Append a new step with a freshly generated unique id and default
    /// field values. Returns the new step's id.
    pub fn add_step(&mut self) -> Result<String> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        self.undo.record(puzzle, "Add Puzzle Step");

        let step = PuzzleStep::new();
        let step_id = step.id.clone();
        puzzle.steps.push(step);

        self.store.mark_dirty(&puzzle.id)?;
        Ok(step_id)
    }

    /// Remove and return the step at `index`.
    pub fn remove_step(&mut self, index: usize) -> Result<PuzzleStep> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        let len = puzzle.steps.len();
        if index >= len {
            return Err(PuzzleError::IndexOutOfRange { index, len });
        }
        self.undo.record(puzzle, "Remove Puzzle Step");

        let step = puzzle.steps.remove(index);
        self.store.mark_dirty(&puzzle.id)?;
        Ok(step)
    }

    /// Move the step at `old_index` to `new_index`, preserving the
    /// relative order of all other steps (a move, not a swap).
    pub fn reorder_step(&mut self, old_index: usize, new_index: usize) -> Result<()> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        let len = puzzle.steps.len();
        if old_index >= len {
            return Err(PuzzleError::IndexOutOfRange {
                index: old_index,
                len,
            });
        }
        if new_index >= len {
            return Err(PuzzleError::IndexOutOfRange {
                index: new_index,
                len,
            });
        }
        self.undo.record(puzzle, "Reorder Puzzle Steps");

        let step = puzzle.steps.remove(old_index);
        puzzle.steps.insert(new_index, step);

        self.store.mark_dirty(&puzzle.id)?;
        Ok(())
    }

    /// Apply an explicit field update to the step at `index`.
    pub fn update_step(&mut self, index: usize, update: StepUpdate) -> Result<()> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        let len = puzzle.steps.len();
        if index >= len {
            return Err(PuzzleError::IndexOutOfRange { index, len });
        }
        self.undo.record(puzzle, "Edit Puzzle Step");

        let step = &mut puzzle.steps[index];
        if let Some(id) = update.id {
            step.id = id;
        }
        if let Some(description) = update.description {
            step.description = description;
        }
        if let Some(required_object_id) = update.required_object_id {
            step.required_object_id = required_object_id;
        }
        if let Some(interactable_id) = update.interactable_id {
            step.interactable_id = interactable_id;
        }
        if let Some(expected_type) = update.expected_type {
            step.expected_type = expected_type;
        }
        if let Some(is_optional) = update.is_optional {
            step.is_optional = is_optional;
        }
        if let Some(requires_sequence) = update.requires_sequence {
            step.requires_sequence = requires_sequence;
        }

        self.store.mark_dirty(&puzzle.id)?;
        Ok(())
    }

    /// Change the puzzle's display name.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        self.undo.record(puzzle, "Rename Puzzle");

        puzzle.name = name.into();
        self.store.mark_dirty(&puzzle.id)?;
        Ok(())
    }

    /// Switch which collection (steps or checklist) is authoritative.
    /// The inactive collection is kept as-is.
    pub fn set_logic_type(&mut self, logic_type: LogicType) -> Result<()> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        self.undo.record(puzzle, "Change Puzzle Logic");

        puzzle.logic_type = logic_type;
        self.store.mark_dirty(&puzzle.id)?;
        Ok(())
    }

    /// Append a checklist item.
    pub fn add_checklist_item(&mut self, text: impl Into<String>) -> Result<()> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        self.undo.record(puzzle, "Add Checklist Item");

        puzzle.checklist_items.push(text.into());
        self.store.mark_dirty(&puzzle.id)?;
        Ok(())
    }

    /// Remove and return the checklist item at `index`.
    pub fn remove_checklist_item(&mut self, index: usize) -> Result<String> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        let len = puzzle.checklist_items.len();
        if index >= len {
            return Err(PuzzleError::IndexOutOfRange { index, len });
        }
        self.undo.record(puzzle, "Remove Checklist Item");

        let item = puzzle.checklist_items.remove(index);
        self.store.mark_dirty(&puzzle.id)?;
        Ok(item)
    }

    /// Apply an explicit field update to the outcome.
    pub fn update_outcome(&mut self, update: OutcomeUpdate) -> Result<()> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;
        self.undo.record(puzzle, "Edit Puzzle Outcome");

        let outcome = &mut puzzle.outcome;
        if let Some(name) = update.name {
            outcome.name = name;
        }
        if let Some(description) = update.description {
            outcome.description = description;
        }
        if let Some(unlocks_path) = update.unlocks_path {
            outcome.unlocks_path = unlocks_path;
        }
        if let Some(path_id_to_unlock) = update.path_id_to_unlock {
            outcome.path_id_to_unlock = path_id_to_unlock;
        }
        if let Some(gives_reward) = update.gives_reward {
            outcome.gives_reward = gives_reward;
        }
        if let Some(reward_item_id) = update.reward_item_id {
            outcome.reward_item_id = reward_item_id;
        }
        if let Some(ends_puzzle) = update.ends_puzzle {
            outcome.ends_puzzle = ends_puzzle;
        }

        self.store.mark_dirty(&puzzle.id)?;
        Ok(())
    }

    // --- Queries ---

    /// Indices of steps whose description or id contains `query`,
    /// case-insensitively. An empty query matches every step.
    pub fn filter_steps(&self, query: &str) -> Result<Vec<usize>> {
        let puzzle = self.loaded.as_ref().ok_or(PuzzleError::NoPuzzleLoaded)?;
        let needle = query.to_lowercase();

        Ok(puzzle
            .steps
            .iter()
            .enumerate()
            .filter(|(_, step)| {
                needle.is_empty()
                    || step.description.to_lowercase().contains(&needle)
                    || step.id.to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect())
    }

    /// Run the validation pass over the loaded puzzle.
    pub fn validate(&self) -> Result<Vec<String>> {
        let puzzle = self.loaded.as_ref().ok_or(PuzzleError::NoPuzzleLoaded)?;
        Ok(validate::validate(puzzle))
    }

    // --- Persistence ---

    /// Commit all pending in-memory changes to the document store.
    pub fn save(&mut self) -> Result<()> {
        let puzzle = self.loaded.as_ref().ok_or(PuzzleError::NoPuzzleLoaded)?;
        self.store.save(puzzle)
    }

    /// Signal unsaved changes to the store without committing them.
    pub fn mark_dirty(&mut self) -> Result<()> {
        let puzzle = self.loaded.as_ref().ok_or(PuzzleError::NoPuzzleLoaded)?;
        self.store.mark_dirty(&puzzle.id)
    }

    /// Serialize the loaded puzzle to pretty-printed JSON at `path`,
    /// overwriting any existing file.
    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let puzzle = self.loaded.as_ref().ok_or(PuzzleError::NoPuzzleLoaded)?;

        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(PuzzleError::InvalidArgument(
                "Invalid file path for export.".to_string(),
            ));
        }

        let json = codec::encode(puzzle)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read JSON from `path` and overwrite the loaded puzzle's fields in
    /// place, then mark the document dirty. The input is parsed completely
    /// before any field changes, so a malformed file leaves the document
    /// untouched.
    pub fn import_from_json<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let puzzle = self.loaded.as_mut().ok_or(PuzzleError::NoPuzzleLoaded)?;

        let path = path.as_ref();
        if path.as_os_str().is_empty() || !path.exists() {
            return Err(PuzzleError::InvalidArgument(
                "Invalid or nonexistent file path for import.".to_string(),
            ));
        }

        let json = fs::read_to_string(path)?;
        codec::decode_into(&json, puzzle)?;

        self.store.mark_dirty(&puzzle.id)?;
        Ok(())
    }

    // --- Store pass-throughs ---

    /// Index metadata for every stored puzzle.
    pub fn documents(&self) -> Result<Vec<DocumentMeta>> {
        self.store.list()
    }

    /// Reconcile the store's index with its backing medium.
    pub fn refresh(&mut self) -> Result<RefreshReport> {
        self.store.refresh()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn undo(&self) -> &U {
        &self.undo
    }
}
