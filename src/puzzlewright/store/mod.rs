//! # Storage Layer
//!
//! This module defines the document-store abstraction. The [`DocumentStore`]
//! trait stands in for the host's asset persistence layer, so the editing
//! session never touches the filesystem directly.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** (a real engine asset database) without
//!   changing the session
//! - Keep editing logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Index metadata stored in `data.json`
//!   - Document bodies in individual files: `puzzle-{id}.json`, in the
//!     export wire format
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!
//! ## Dirty State
//!
//! Dirtiness means "the loaded document has unsaved changes". It lives with
//! the store because the store is what eventually persists them: the session
//! marks a document dirty after every mutation, and `save` clears the flag.
//! Marking an id the store has never seen is a deliberate no-op success, so
//! a puzzle loaded straight into the session (never registered) can still be
//! edited; it joins the index at its first save.
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! puzzles/
//! ├── data.json               # Index metadata for all puzzles
//! ├── puzzle-{id}.json        # Individual puzzle documents
//! └── config.json             # Authoring configuration
//! ```
//!
//! Index metadata and document bodies are stored separately so listing
//! puzzles doesn't require decoding every document.

use crate::error::Result;
use crate::model::Puzzle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Index record for one stored puzzle document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentMeta {
    pub fn new(puzzle: &Puzzle) -> Self {
        let now = Utc::now();
        Self {
            id: puzzle.id.clone(),
            name: puzzle.name.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Report from the `refresh` reconciliation pass.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Document files found on the medium but missing from the index
    pub adopted: usize,
    /// Index entries whose document file is gone
    pub pruned: usize,
}

/// Abstract interface for puzzle document persistence.
pub trait DocumentStore {
    /// Register and persist a brand-new document. Fails if the id is
    /// already stored.
    fn create(&mut self, puzzle: &Puzzle) -> Result<()>;

    /// Resolve a stored reference into a document.
    fn open(&self, id: &str) -> Result<Puzzle>;

    /// Commit a document (create or update) and clear its dirty flag.
    fn save(&mut self, puzzle: &Puzzle) -> Result<()>;

    /// Record that a document has unsaved changes. Unknown ids are
    /// tolerated; see the module docs.
    fn mark_dirty(&mut self, id: &str) -> Result<()>;

    /// Whether a document has unsaved changes.
    fn is_dirty(&self, id: &str) -> bool;

    /// Reconcile the index with the backing medium.
    fn refresh(&mut self) -> Result<RefreshReport>;

    /// Index metadata for all stored documents, sorted by name.
    fn list(&self) -> Result<Vec<DocumentMeta>>;

    /// Backing file path for a document (for file-based stores).
    fn document_path(&self, id: &str) -> Result<PathBuf>;
}
