use super::{DocumentMeta, DocumentStore, RefreshReport};
use crate::error::{PuzzleError, Result};
use crate::model::Puzzle;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    puzzles: HashMap<String, Puzzle>,
    metas: HashMap<String, DocumentMeta>,
    dirty: HashSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryStore {
    fn create(&mut self, puzzle: &Puzzle) -> Result<()> {
        if puzzle.id.is_empty() {
            return Err(PuzzleError::InvalidArgument(
                "Cannot store a puzzle with an empty id.".to_string(),
            ));
        }
        if self.puzzles.contains_key(&puzzle.id) {
            return Err(PuzzleError::Store(format!(
                "Puzzle already stored: {}",
                puzzle.id
            )));
        }
        self.metas
            .insert(puzzle.id.clone(), DocumentMeta::new(puzzle));
        self.puzzles.insert(puzzle.id.clone(), puzzle.clone());
        Ok(())
    }

    fn open(&self, id: &str) -> Result<Puzzle> {
        self.puzzles
            .get(id)
            .cloned()
            .ok_or_else(|| PuzzleError::PuzzleNotFound(id.to_string()))
    }

    fn save(&mut self, puzzle: &Puzzle) -> Result<()> {
        match self.metas.get_mut(&puzzle.id) {
            Some(meta) => {
                meta.name = puzzle.name.clone();
                meta.updated_at = Utc::now();
            }
            None => {
                self.metas
                    .insert(puzzle.id.clone(), DocumentMeta::new(puzzle));
            }
        }
        self.puzzles.insert(puzzle.id.clone(), puzzle.clone());
        self.dirty.remove(&puzzle.id);
        Ok(())
    }

    fn mark_dirty(&mut self, id: &str) -> Result<()> {
        self.dirty.insert(id.to_string());
        Ok(())
    }

    fn is_dirty(&self, id: &str) -> bool {
        self.dirty.contains(id)
    }

    fn refresh(&mut self) -> Result<RefreshReport> {
        // Nothing external to reconcile with
        Ok(RefreshReport::default())
    }

    fn list(&self) -> Result<Vec<DocumentMeta>> {
        let mut metas: Vec<DocumentMeta> = self.metas.values().cloned().collect();
        metas.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(metas)
    }

    fn document_path(&self, _id: &str) -> Result<PathBuf> {
        Err(PuzzleError::Store(
            "In-memory store has no document files".to_string(),
        ))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::PuzzleStep;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_puzzles(mut self, count: usize) -> Self {
            for i in 0..count {
                let puzzle = Puzzle::new(format!("Test Puzzle {}", i + 1));
                self.store.create(&puzzle).unwrap();
            }
            self
        }

        pub fn with_puzzle(mut self, name: &str) -> Self {
            let puzzle = Puzzle::new(name);
            self.store.create(&puzzle).unwrap();
            self
        }

        pub fn with_stepped_puzzle(mut self, name: &str, steps: usize) -> Self {
            let mut puzzle = Puzzle::new(name);
            for _ in 0..steps {
                puzzle.steps.push(PuzzleStep::new());
            }
            self.store.create(&puzzle).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn test_create_open_roundtrip() {
        let mut store = InMemoryStore::new();
        let puzzle = Puzzle::new("Mem");
        store.create(&puzzle).unwrap();
        assert_eq!(store.open(&puzzle.id).unwrap(), puzzle);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let mut store = InMemoryStore::new();
        let puzzle = Puzzle::new("Dup");
        store.create(&puzzle).unwrap();
        assert!(matches!(
            store.create(&puzzle).unwrap_err(),
            PuzzleError::Store(_)
        ));
    }

    #[test]
    fn test_open_unknown_fails() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.open("ghost").unwrap_err(),
            PuzzleError::PuzzleNotFound(_)
        ));
    }

    #[test]
    fn test_dirty_lifecycle() {
        let mut store = InMemoryStore::new();
        let puzzle = Puzzle::new("Dirty");
        store.create(&puzzle).unwrap();

        assert!(!store.is_dirty(&puzzle.id));
        store.mark_dirty(&puzzle.id).unwrap();
        assert!(store.is_dirty(&puzzle.id));
        store.save(&puzzle).unwrap();
        assert!(!store.is_dirty(&puzzle.id));
    }

    #[test]
    fn test_mark_dirty_tolerates_unknown_id() {
        let mut store = InMemoryStore::new();
        store.mark_dirty("never-registered").unwrap();
        assert!(store.is_dirty("never-registered"));
    }

    #[test]
    fn test_save_upserts() {
        let mut store = InMemoryStore::new();
        let mut puzzle = Puzzle::new("Up");
        store.save(&puzzle).unwrap();

        puzzle.name = "Upserted".to_string();
        store.save(&puzzle).unwrap();

        assert_eq!(store.open(&puzzle.id).unwrap().name, "Upserted");
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_document_path_unsupported() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.document_path("any").unwrap_err(),
            PuzzleError::Store(_)
        ));
    }

    #[test]
    fn test_fixture_builders() {
        let fixture = StoreFixture::new().with_puzzles(2).with_puzzle("Named");
        assert_eq!(fixture.store.list().unwrap().len(), 3);
    }
}
